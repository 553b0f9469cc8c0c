use std::collections::HashSet;

use log::debug;
use oxigraph::model::{NamedNode, Term};

use crate::error::PathError;
use crate::path::{NegatedProperty, PathOptions, ShaclPropertyPath};
use crate::store::FactStore;
use crate::visitor::PathVisitor;

type NodesResult = Result<Vec<Term>, PathError>;

/// Evaluates a path against the fact store. The context is the current
/// frontier: the set of nodes the path is applied from. Intermediate
/// results carry duplicates; `find_nodes` deduplicates at the boundary.
struct FindNodesVisitor<'a, S: FactStore> {
    store: &'a S,
}

impl<S: FactStore> FindNodesVisitor<'_, S> {
    /// Worklist fixpoint for the transitive closures. `results` only
    /// admits nodes it has not seen, which both deduplicates and absorbs
    /// cycles in the underlying graph; the loop is iterative, so the
    /// traversal depth is bounded by the number of reachable nodes, not
    /// the call stack.
    fn greedy(&mut self, inner: &ShaclPropertyPath, start: &[Term]) -> NodesResult {
        let mut results: HashSet<Term> = HashSet::new();
        let mut remaining: Vec<Term> = start.to_vec();

        while let Some(current) = remaining.pop() {
            let frontier = [current];
            for next in self.visit(inner, &frontier)? {
                if results.insert(next.clone()) {
                    remaining.push(next);
                }
            }
        }

        Ok(results.into_iter().collect())
    }
}

impl<'b, S: FactStore> PathVisitor<NodesResult, &'b [Term]> for FindNodesVisitor<'_, S> {
    fn visit_predicate_path(&mut self, predicate: &NamedNode, start: &[Term]) -> NodesResult {
        let mut nodes = Vec::new();
        for node in start {
            nodes.extend(self.store.outgoing(node, predicate.as_ref())?);
        }
        Ok(nodes)
    }

    fn visit_sequence_path(&mut self, steps: &[ShaclPropertyPath], start: &[Term]) -> NodesResult {
        let mut current = start.to_vec();
        for step in steps {
            current = self.visit(step, &current)?;
        }
        Ok(current)
    }

    fn visit_alternative_path(
        &mut self,
        branches: &[ShaclPropertyPath],
        start: &[Term],
    ) -> NodesResult {
        let mut nodes = Vec::new();
        for branch in branches {
            nodes.extend(self.visit(branch, start)?);
        }
        Ok(nodes)
    }

    fn visit_inverse_path(&mut self, inner: &ShaclPropertyPath, start: &[Term]) -> NodesResult {
        let ShaclPropertyPath::Predicate(predicate) = inner else {
            return Err(PathError::Unsupported(
                "only the inverse of a predicate path can be evaluated".into(),
            ));
        };
        let mut nodes = Vec::new();
        for node in start {
            nodes.extend(self.store.incoming(node, predicate.as_ref())?);
        }
        Ok(nodes)
    }

    fn visit_zero_or_one_path(&mut self, inner: &ShaclPropertyPath, start: &[Term]) -> NodesResult {
        let mut nodes = start.to_vec();
        nodes.extend(self.visit(inner, start)?);
        Ok(nodes)
    }

    fn visit_zero_or_more_path(
        &mut self,
        inner: &ShaclPropertyPath,
        start: &[Term],
    ) -> NodesResult {
        let mut nodes = start.to_vec();
        nodes.extend(self.greedy(inner, start)?);
        Ok(nodes)
    }

    fn visit_one_or_more_path(&mut self, inner: &ShaclPropertyPath, start: &[Term]) -> NodesResult {
        self.greedy(inner, start)
    }

    fn visit_negated_property_set(
        &mut self,
        excluded: &[NegatedProperty],
        start: &[Term],
    ) -> NodesResult {
        // Incoming edges are only ever touched when some member is
        // inverted.
        let include_inverse = excluded
            .iter()
            .any(|member| matches!(member, NegatedProperty::Inverse(_)));

        let mut nodes = Vec::new();
        for node in start {
            let mut out_links = self.store.all_outgoing(node)?;
            for member in excluded {
                if let NegatedProperty::Direct(predicate) = member {
                    out_links.remove(predicate);
                }
            }
            nodes.extend(out_links.into_values().flatten());

            if include_inverse {
                let mut in_links = self.store.all_incoming(node)?;
                for member in excluded {
                    if let NegatedProperty::Inverse(predicate) = member {
                        in_links.remove(predicate);
                    }
                }
                nodes.extend(in_links.into_values().flatten());
            }
        }
        Ok(nodes)
    }
}

/// Finds all nodes connected to the starting nodes by following a
/// [SHACL Property Path](https://www.w3.org/TR/shacl/#dfn-shacl-property-path).
///
/// Deterministic for a deterministic store; the result is a set with no
/// intrinsic ordering. On error no partial result is returned.
pub fn find_nodes<S: FactStore>(
    store: &S,
    start: &[Term],
    path: &ShaclPropertyPath,
) -> Result<HashSet<Term>, PathError> {
    debug!("evaluating path {path:?} from {} nodes", start.len());
    let mut visitor = FindNodesVisitor { store };
    let nodes = visitor.visit(path, start)?;
    Ok(nodes.into_iter().collect())
}

/// Builds the path description rooted at `node` and evaluates it in one
/// call.
pub fn find_nodes_from<S: FactStore>(
    store: &S,
    start: &[Term],
    node: &Term,
) -> Result<HashSet<Term>, PathError> {
    let path = ShaclPropertyPath::from_term(store, node, PathOptions::default())?;
    find_nodes(store, start, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ex;
    use oxigraph::model::{Graph, Triple};

    fn knows_chain() -> Graph {
        // a -p-> b -p-> c
        let mut graph = Graph::new();
        graph.insert(&Triple::new(ex("a"), ex("p"), ex("b")));
        graph.insert(&Triple::new(ex("b"), ex("p"), ex("c")));
        graph
    }

    fn terms(names: &[&str]) -> HashSet<Term> {
        names.iter().map(|n| Term::from(ex(n))).collect()
    }

    #[test]
    fn predicate_path_follows_one_hop() {
        let graph = knows_chain();
        let path = ShaclPropertyPath::Predicate(ex("p"));

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["b"]));
    }

    #[test]
    fn inverse_predicate_follows_incoming_edges() {
        let graph = knows_chain();
        let path =
            ShaclPropertyPath::Inverse(Box::new(ShaclPropertyPath::Predicate(ex("p"))));

        let nodes = find_nodes(&graph, &[ex("c").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["b"]));
    }

    #[test]
    fn inverse_of_composite_is_unsupported() {
        let graph = knows_chain();
        let path = ShaclPropertyPath::Inverse(Box::new(ShaclPropertyPath::Sequence(vec![
            ShaclPropertyPath::Predicate(ex("p")),
            ShaclPropertyPath::Predicate(ex("q")),
        ])));

        let err = find_nodes(&graph, &[ex("c").into()], &path).unwrap_err();
        assert!(matches!(err, PathError::Unsupported(_)));
    }

    #[test]
    fn sequence_folds_left_to_right() {
        let graph = knows_chain();
        let path = ShaclPropertyPath::Sequence(vec![
            ShaclPropertyPath::Predicate(ex("p")),
            ShaclPropertyPath::Predicate(ex("p")),
        ]);

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["c"]));
    }

    #[test]
    fn alternative_unions_branches() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new(ex("a"), ex("p"), ex("b")));
        graph.insert(&Triple::new(ex("a"), ex("q"), ex("c")));
        let path = ShaclPropertyPath::Alternative(vec![
            ShaclPropertyPath::Predicate(ex("p")),
            ShaclPropertyPath::Predicate(ex("q")),
        ]);

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["b", "c"]));
    }

    #[test]
    fn zero_or_one_always_contains_the_start() {
        let graph = knows_chain();
        let path = ShaclPropertyPath::ZeroOrOne(Box::new(ShaclPropertyPath::Predicate(ex("q"))));

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["a"]));
    }

    #[test]
    fn one_or_more_excludes_the_start() {
        let graph = knows_chain();
        let path = ShaclPropertyPath::OneOrMore(Box::new(ShaclPropertyPath::Predicate(ex("p"))));

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["b", "c"]));
    }

    #[test]
    fn zero_or_more_includes_the_start() {
        let graph = knows_chain();
        let path = ShaclPropertyPath::ZeroOrMore(Box::new(ShaclPropertyPath::Predicate(ex("p"))));

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["a", "b", "c"]));
    }

    #[test]
    fn zero_or_more_is_idempotent() {
        let graph = knows_chain();
        let path = ShaclPropertyPath::ZeroOrMore(Box::new(ShaclPropertyPath::Predicate(ex("p"))));

        let once = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        let start: Vec<Term> = once.iter().cloned().collect();
        let twice = find_nodes(&graph, &start, &path).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    #[ntest::timeout(1000)]
    fn transitive_closure_terminates_on_cycles() {
        // a -p-> b -p-> a
        let mut graph = Graph::new();
        graph.insert(&Triple::new(ex("a"), ex("p"), ex("b")));
        graph.insert(&Triple::new(ex("b"), ex("p"), ex("a")));
        let path = ShaclPropertyPath::OneOrMore(Box::new(ShaclPropertyPath::Predicate(ex("p"))));

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["a", "b"]));
    }

    #[test]
    fn transitive_closure_over_composite_inner_paths() {
        // a -p-> b -q-> c
        let mut graph = Graph::new();
        graph.insert(&Triple::new(ex("a"), ex("p"), ex("b")));
        graph.insert(&Triple::new(ex("b"), ex("q"), ex("c")));
        let path = ShaclPropertyPath::OneOrMore(Box::new(ShaclPropertyPath::Alternative(vec![
            ShaclPropertyPath::Predicate(ex("p")),
            ShaclPropertyPath::Predicate(ex("q")),
        ])));

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["b", "c"]));
    }

    #[test]
    fn negated_set_keeps_unexcluded_predicates() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new(ex("a"), ex("knows"), ex("b")));
        graph.insert(&Triple::new(ex("a"), ex("spouse"), ex("c")));
        let path =
            ShaclPropertyPath::NegatedPropertySet(vec![NegatedProperty::Direct(ex("knows"))]);

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["c"]));
    }

    #[test]
    fn negated_set_without_inverse_members_ignores_incoming_edges() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new(ex("x"), ex("spouse"), ex("a")));
        let path =
            ShaclPropertyPath::NegatedPropertySet(vec![NegatedProperty::Direct(ex("knows"))]);

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn negated_set_with_inverse_members_subtracts_incoming_edges() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new(ex("x"), ex("spouse"), ex("a")));
        graph.insert(&Triple::new(ex("y"), ex("knows"), ex("a")));
        let path =
            ShaclPropertyPath::NegatedPropertySet(vec![NegatedProperty::Inverse(ex("knows"))]);

        let nodes = find_nodes(&graph, &[ex("a").into()], &path).unwrap();
        assert_eq!(nodes, terms(&["x"]));
    }

    #[test]
    fn find_nodes_from_builds_the_description_first() {
        let graph = knows_chain();
        let nodes = find_nodes_from(&graph, &[ex("a").into()], &ex("p").into()).unwrap();
        assert_eq!(nodes, terms(&["b"]));
    }
}
