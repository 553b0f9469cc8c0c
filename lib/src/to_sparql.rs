use oxigraph::model::{NamedNode, Term};

use crate::error::PathError;
use crate::path::{NegatedProperty, PathOptions, ShaclPropertyPath};
use crate::store::FactStore;
use crate::visitor::PathVisitor;

/// Serializes a path to SPARQL 1.1 property path surface syntax. The
/// context flags whether the node is the syntactic root of the whole
/// expression: sequences and alternatives are parenthesized only when
/// they are not.
struct ToSparqlVisitor;

impl ToSparqlVisitor {
    fn chain(&mut self, paths: &[ShaclPropertyPath], operator: &str) -> String {
        paths
            .iter()
            .map(|path| self.visit(path, false))
            .collect::<Vec<_>>()
            .join(operator)
    }
}

impl PathVisitor<String, bool> for ToSparqlVisitor {
    fn visit_predicate_path(&mut self, predicate: &NamedNode, _is_root: bool) -> String {
        // N-Triples form, e.g. `<http://example.com/knows>`.
        predicate.to_string()
    }

    fn visit_sequence_path(&mut self, steps: &[ShaclPropertyPath], is_root: bool) -> String {
        let sequence = self.chain(steps, "/");
        if is_root {
            sequence
        } else {
            format!("({sequence})")
        }
    }

    fn visit_alternative_path(&mut self, branches: &[ShaclPropertyPath], is_root: bool) -> String {
        let alternative = self.chain(branches, "|");
        if is_root {
            alternative
        } else {
            format!("({alternative})")
        }
    }

    fn visit_inverse_path(&mut self, inner: &ShaclPropertyPath, _is_root: bool) -> String {
        format!("^{}", self.visit(inner, false))
    }

    fn visit_zero_or_one_path(&mut self, inner: &ShaclPropertyPath, _is_root: bool) -> String {
        format!("{}?", self.visit(inner, false))
    }

    fn visit_zero_or_more_path(&mut self, inner: &ShaclPropertyPath, _is_root: bool) -> String {
        format!("{}*", self.visit(inner, false))
    }

    fn visit_one_or_more_path(&mut self, inner: &ShaclPropertyPath, _is_root: bool) -> String {
        format!("{}+", self.visit(inner, false))
    }

    fn visit_negated_property_set(
        &mut self,
        excluded: &[NegatedProperty],
        _is_root: bool,
    ) -> String {
        let members = excluded
            .iter()
            .map(|member| match member {
                NegatedProperty::Direct(predicate) => predicate.to_string(),
                NegatedProperty::Inverse(predicate) => format!("^{predicate}"),
            })
            .collect::<Vec<_>>()
            .join("|");
        format!("!({members})")
    }
}

/// Renders a path as a SPARQL property path expression with minimal
/// parenthesization. Pure function, no graph access.
pub fn to_sparql(path: &ShaclPropertyPath) -> String {
    ToSparqlVisitor.visit(path, true)
}

/// Builds the path description rooted at `node` and renders it.
pub fn to_sparql_from<S: FactStore>(store: &S, node: &Term) -> Result<String, PathError> {
    let path = ShaclPropertyPath::from_term(store, node, PathOptions::default())?;
    Ok(to_sparql(&path))
}

/// Renders the top-level segments of a sequence path as independent
/// property path expressions, so callers can interleave per-segment
/// processing (e.g. binding a variable per hop). A non-sequence path
/// yields a single segment.
pub fn to_sparql_sequence(path: &ShaclPropertyPath) -> Vec<String> {
    match path {
        ShaclPropertyPath::Sequence(steps) => steps.iter().map(to_sparql).collect(),
        other => vec![to_sparql(other)],
    }
}
