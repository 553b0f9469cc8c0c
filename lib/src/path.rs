use log::debug;
use oxigraph::model::{NamedNode, NamedNodeRef, Term};

use crate::error::PathError;
use crate::named_nodes::SHACL;
use crate::store::FactStore;

/// A [SHACL Property Path](https://www.w3.org/TR/shacl/#property-paths) as
/// an abstract syntax tree.
///
/// The tree is built once, either from a bare predicate or by decoding a
/// graph-encoded description with [`ShaclPropertyPath::from_term`], and is
/// immutable from then on. Consumers walk it through the
/// [`PathVisitor`](crate::PathVisitor) protocol and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShaclPropertyPath {
    /// A single-hop traversal via one directed edge label.
    Predicate(NamedNode),
    /// An ordered composition of at least two paths; the output of each
    /// step feeds the next.
    Sequence(Vec<ShaclPropertyPath>),
    /// A union of at least two paths (`sh:alternativePath`).
    Alternative(Vec<ShaclPropertyPath>),
    /// A path traversed against the edge direction (`sh:inversePath`).
    Inverse(Box<ShaclPropertyPath>),
    /// An optional single application (`sh:zeroOrOnePath`).
    ZeroOrOne(Box<ShaclPropertyPath>),
    /// The reflexive-transitive closure of the inner path
    /// (`sh:zeroOrMorePath`).
    ZeroOrMore(Box<ShaclPropertyPath>),
    /// The transitive closure of the inner path (`sh:oneOrMorePath`).
    OneOrMore(Box<ShaclPropertyPath>),
    /// All direct edges except a finite excluded set of predicates, each
    /// optionally reversed.
    NegatedPropertySet(Vec<NegatedProperty>),
}

/// A member of a negated property set: a predicate, or the inverse of a
/// predicate. Nested composite paths are not representable here, which is
/// exactly the SHACL restriction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NegatedProperty {
    Direct(NamedNode),
    Inverse(NamedNode),
}

/// Options controlling how graph-encoded descriptions are decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathOptions {
    /// Treat an IRI appearing where a composite path is expected as a
    /// potential head of an RDF list, so that named nodes can encode
    /// sequence paths. Off by default: a bare IRI is then always a
    /// predicate path, matching the usual SHACL reading.
    pub allow_named_node_sequence_paths: bool,
}

impl ShaclPropertyPath {
    /// Decodes a graph-encoded path description rooted at `node`.
    ///
    /// A named node is a predicate path, an RDF list is a sequence, and a
    /// blank node is inspected for its composite marker (`sh:inversePath`,
    /// `sh:alternativePath`, `sh:zeroOrMorePath`, `sh:oneOrMorePath`,
    /// `sh:zeroOrOnePath`, `sh:negatedPropertySet`, in that order of
    /// priority). Anything else fails with [`PathError::Malformed`].
    pub fn from_term<S: FactStore>(
        store: &S,
        node: &Term,
        options: PathOptions,
    ) -> Result<Self, PathError> {
        transform_node(store, node, options)
    }

    /// Like [`from_term`](Self::from_term), for callers holding the set of
    /// candidate root nodes found at some position (e.g. the objects of
    /// `sh:path` on a property shape). Anything but exactly one candidate
    /// is malformed.
    pub fn from_unique_term<S: FactStore>(
        store: &S,
        candidates: &[Term],
        options: PathOptions,
    ) -> Result<Self, PathError> {
        match candidates {
            [node] => transform_node(store, node, options),
            [] => Err(PathError::Malformed(
                "SHACL path must be a single node, found none".into(),
            )),
            _ => Err(PathError::Malformed(format!(
                "SHACL path must be a single node, found {}",
                candidates.len()
            ))),
        }
    }
}

fn transform_node<S: FactStore>(
    store: &S,
    node: &Term,
    options: PathOptions,
) -> Result<ShaclPropertyPath, PathError> {
    if let Term::NamedNode(predicate) = node {
        if !options.allow_named_node_sequence_paths {
            return Ok(ShaclPropertyPath::Predicate(predicate.clone()));
        }
    }

    if let Some(items) = store.decode_list(node)? {
        debug!("decoding sequence path of {} steps at {node}", items.len());
        expect_list_arity(&items)?;
        let steps = items
            .iter()
            .map(|item| transform_node(store, item, options))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ShaclPropertyPath::Sequence(steps));
    }

    if matches!(node, Term::BlankNode(_)) {
        let shacl = SHACL::new();

        if let Some(inner) = unique_object(store, node, shacl.inverse_path)? {
            let inner = transform_node(store, &inner, options)?;
            return Ok(ShaclPropertyPath::Inverse(Box::new(inner)));
        }

        if let Some(list_node) = unique_object(store, node, shacl.alternative_path)? {
            let items = store.decode_list(&list_node)?.ok_or_else(|| {
                PathError::Malformed("sh:alternativePath must point at a SHACL list".into())
            })?;
            expect_list_arity(&items)?;
            let branches = items
                .iter()
                .map(|item| transform_node(store, item, options))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(ShaclPropertyPath::Alternative(branches));
        }

        if let Some(inner) = unique_object(store, node, shacl.zero_or_more_path)? {
            let inner = transform_node(store, &inner, options)?;
            return Ok(ShaclPropertyPath::ZeroOrMore(Box::new(inner)));
        }

        if let Some(inner) = unique_object(store, node, shacl.one_or_more_path)? {
            let inner = transform_node(store, &inner, options)?;
            return Ok(ShaclPropertyPath::OneOrMore(Box::new(inner)));
        }

        if let Some(inner) = unique_object(store, node, shacl.zero_or_one_path)? {
            let inner = transform_node(store, &inner, options)?;
            return Ok(ShaclPropertyPath::ZeroOrOne(Box::new(inner)));
        }

        if let Some(list_node) = unique_object(store, node, shacl.negated_property_set)? {
            let items = store.decode_list(&list_node)?.ok_or_else(|| {
                PathError::Malformed("sh:negatedPropertySet must point at a SHACL list".into())
            })?;
            if items.is_empty() {
                return Err(PathError::Malformed(
                    "sh:negatedPropertySet must exclude at least one property".into(),
                ));
            }
            let excluded = items
                .iter()
                .map(|item| negated_member(store, item))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(ShaclPropertyPath::NegatedPropertySet(excluded));
        }
    }

    // With allow_named_node_sequence_paths, an IRI that headed no list is
    // still just a predicate.
    if let Term::NamedNode(predicate) = node {
        return Ok(ShaclPropertyPath::Predicate(predicate.clone()));
    }

    Err(PathError::Malformed(format!(
        "unrecognized property path {node}"
    )))
}

/// The single object of `node --predicate-->`, if the edge is present.
/// More than one object makes the description ambiguous.
fn unique_object<S: FactStore>(
    store: &S,
    node: &Term,
    predicate: NamedNodeRef<'_>,
) -> Result<Option<Term>, PathError> {
    let mut objects = store.outgoing(node, predicate)?;
    match objects.len() {
        0 => Ok(None),
        1 => Ok(objects.pop()),
        n => Err(PathError::Malformed(format!(
            "{predicate} of {node} must be a single node, found {n}"
        ))),
    }
}

fn expect_list_arity(items: &[Term]) -> Result<(), PathError> {
    if items.len() < 2 {
        return Err(PathError::Malformed(
            "SHACL list must have at least 2 elements".into(),
        ));
    }
    Ok(())
}

fn negated_member<S: FactStore>(store: &S, item: &Term) -> Result<NegatedProperty, PathError> {
    match item {
        Term::NamedNode(predicate) => Ok(NegatedProperty::Direct(predicate.clone())),
        Term::BlankNode(_) => {
            let shacl = SHACL::new();
            let inner = unique_object(store, item, shacl.inverse_path)?.ok_or_else(|| {
                PathError::Malformed(format!(
                    "negated property set member {item} must be a predicate or the inverse of one"
                ))
            })?;
            match inner {
                Term::NamedNode(predicate) => Ok(NegatedProperty::Inverse(predicate)),
                other => Err(PathError::Malformed(format!(
                    "negated property set member inverts {other}, expected a predicate"
                ))),
            }
        }
        other => Err(PathError::Malformed(format!(
            "negated property set member {other} must be a predicate or the inverse of one"
        ))),
    }
}
