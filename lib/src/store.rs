use std::collections::{HashMap, HashSet};

use oxigraph::model::vocab::rdf;
use oxigraph::model::{Graph, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, Term};

use crate::error::PathError;

/// The capability surface a path consumer needs from the underlying graph
/// of subject-predicate-object facts.
///
/// The store is read-only for the duration of a call; implementations are
/// expected to expose a consistent snapshot. Lookup failures are surfaced
/// through [`PathError::Store`] and propagated unchanged.
pub trait FactStore {
    /// The objects of all facts `node predicate ?o`.
    fn outgoing(&self, node: &Term, predicate: NamedNodeRef<'_>) -> Result<Vec<Term>, PathError>;

    /// The subjects of all facts `?s predicate node`.
    fn incoming(&self, node: &Term, predicate: NamedNodeRef<'_>) -> Result<Vec<Term>, PathError>;

    /// All outgoing edges of `node`, grouped by predicate.
    fn all_outgoing(&self, node: &Term) -> Result<HashMap<NamedNode, Vec<Term>>, PathError>;

    /// All incoming edges of `node`, grouped by predicate.
    fn all_incoming(&self, node: &Term) -> Result<HashMap<NamedNode, Vec<Term>>, PathError>;

    /// Decodes `node` as an RDF collection (`rdf:first`/`rdf:rest`).
    ///
    /// Returns `Ok(None)` when `node` does not head a collection at all,
    /// and `Err(Malformed)` for a collection that is cyclic or breaks off
    /// before reaching `rdf:nil`.
    fn decode_list(&self, node: &Term) -> Result<Option<Vec<Term>>, PathError>;
}

/// A term usable in subject position, i.e. not a literal.
fn subject_ref(term: &Term) -> Option<NamedOrBlankNodeRef<'_>> {
    match term {
        Term::NamedNode(n) => Some(n.as_ref().into()),
        Term::BlankNode(b) => Some(b.as_ref().into()),
        _ => None,
    }
}

fn is_nil(term: &Term) -> bool {
    matches!(term, Term::NamedNode(n) if n.as_ref() == rdf::NIL)
}

impl FactStore for Graph {
    fn outgoing(&self, node: &Term, predicate: NamedNodeRef<'_>) -> Result<Vec<Term>, PathError> {
        // Literals have no outgoing edges.
        let Some(subject) = subject_ref(node) else {
            return Ok(Vec::new());
        };
        Ok(self
            .objects_for_subject_predicate(subject, predicate)
            .map(|o| o.into_owned())
            .collect())
    }

    fn incoming(&self, node: &Term, predicate: NamedNodeRef<'_>) -> Result<Vec<Term>, PathError> {
        Ok(self
            .subjects_for_predicate_object(predicate, node)
            .map(|s| Term::from(s.into_owned()))
            .collect())
    }

    fn all_outgoing(&self, node: &Term) -> Result<HashMap<NamedNode, Vec<Term>>, PathError> {
        let mut links: HashMap<NamedNode, Vec<Term>> = HashMap::new();
        if let Some(subject) = subject_ref(node) {
            for triple in self.triples_for_subject(subject) {
                links
                    .entry(triple.predicate.into_owned())
                    .or_default()
                    .push(triple.object.into_owned());
            }
        }
        Ok(links)
    }

    fn all_incoming(&self, node: &Term) -> Result<HashMap<NamedNode, Vec<Term>>, PathError> {
        let mut links: HashMap<NamedNode, Vec<Term>> = HashMap::new();
        for triple in self.triples_for_object(node) {
            links
                .entry(triple.predicate.into_owned())
                .or_default()
                .push(Term::from(triple.subject.into_owned()));
        }
        Ok(links)
    }

    fn decode_list(&self, node: &Term) -> Result<Option<Vec<Term>>, PathError> {
        if is_nil(node) {
            return Ok(Some(Vec::new()));
        }

        let mut items = Vec::new();
        let mut seen: HashSet<Term> = HashSet::new();
        let mut current = node.clone();

        loop {
            let Some(head) = subject_ref(&current) else {
                return if items.is_empty() {
                    Ok(None)
                } else {
                    Err(PathError::Malformed(format!(
                        "RDF list does not end with rdf:nil: {current}"
                    )))
                };
            };

            let first = self
                .object_for_subject_predicate(head, rdf::FIRST)
                .map(|o| o.into_owned());
            let Some(first) = first else {
                // The root simply isn't a list; a dangling tail is broken.
                return if items.is_empty() {
                    Ok(None)
                } else {
                    Err(PathError::Malformed(format!(
                        "RDF list node {current} has no rdf:first"
                    )))
                };
            };

            if !seen.insert(current.clone()) {
                return Err(PathError::Malformed(format!(
                    "RDF list starting at {node} is cyclic"
                )));
            }
            items.push(first);

            let rest = self
                .object_for_subject_predicate(head, rdf::REST)
                .map(|o| o.into_owned())
                .ok_or_else(|| {
                    PathError::Malformed(format!("RDF list node {current} has no rdf:rest"))
                })?;
            if is_nil(&rest) {
                return Ok(Some(items));
            }
            current = rest;
        }
    }
}
