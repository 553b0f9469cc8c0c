//! Helpers for constructing graph-encoded path descriptions in tests.

use oxigraph::model::vocab::rdf;
use oxigraph::model::{BlankNode, Graph, NamedNode, NamedNodeRef, Term, Triple};

use crate::named_nodes::SHACL;

/// A named node under the `http://example.com/` namespace.
pub fn ex(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{name}"))
}

/// Builds an RDF collection of `items` and returns its head.
pub fn list(graph: &mut Graph, items: &[Term]) -> Term {
    let mut head = Term::from(rdf::NIL.into_owned());
    for item in items.iter().rev() {
        let cell = BlankNode::default();
        graph.insert(&Triple::new(
            cell.clone(),
            rdf::FIRST.into_owned(),
            item.clone(),
        ));
        graph.insert(&Triple::new(cell.clone(), rdf::REST.into_owned(), head));
        head = cell.into();
    }
    head
}

/// Builds an RDF collection of `items` headed by the named node `head`.
pub fn named_list_at(graph: &mut Graph, head: NamedNode, items: &[Term]) {
    let (first, rest) = match items {
        [first, rest @ ..] => (first, rest),
        [] => {
            return;
        }
    };
    let tail = list(graph, rest);
    graph.insert(&Triple::new(
        head.clone(),
        rdf::FIRST.into_owned(),
        first.clone(),
    ));
    graph.insert(&Triple::new(head, rdf::REST.into_owned(), tail));
}

/// Inserts `_:b predicate object` with a fresh blank node and returns it.
pub fn pblank(graph: &mut Graph, predicate: NamedNodeRef<'_>, object: Term) -> Term {
    let node = BlankNode::default();
    graph.insert(&Triple::new(
        node.clone(),
        predicate.into_owned(),
        object,
    ));
    node.into()
}

/// A `[ sh:inversePath inner ]` description node.
pub fn inverse_of(graph: &mut Graph, inner: Term) -> Term {
    let shacl = SHACL::new();
    pblank(graph, shacl.inverse_path, inner)
}

/// A `[ sh:alternativePath ( branches... ) ]` description node.
pub fn alternative_of(graph: &mut Graph, branches: &[Term]) -> Term {
    let shacl = SHACL::new();
    let head = list(graph, branches);
    pblank(graph, shacl.alternative_path, head)
}

/// A `[ sh:zeroOrMorePath inner ]` description node.
pub fn zero_or_more_of(graph: &mut Graph, inner: Term) -> Term {
    let shacl = SHACL::new();
    pblank(graph, shacl.zero_or_more_path, inner)
}

/// A `[ sh:oneOrMorePath inner ]` description node.
pub fn one_or_more_of(graph: &mut Graph, inner: Term) -> Term {
    let shacl = SHACL::new();
    pblank(graph, shacl.one_or_more_path, inner)
}

/// A `[ sh:zeroOrOnePath inner ]` description node.
pub fn zero_or_one_of(graph: &mut Graph, inner: Term) -> Term {
    let shacl = SHACL::new();
    pblank(graph, shacl.zero_or_one_path, inner)
}

/// A `[ sh:negatedPropertySet ( members... ) ]` description node.
pub fn negated_set_of(graph: &mut Graph, members: &[Term]) -> Term {
    let shacl = SHACL::new();
    let head = list(graph, members);
    pblank(graph, shacl.negated_property_set, head)
}
