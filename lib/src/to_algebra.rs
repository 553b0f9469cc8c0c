use std::fmt;

use oxigraph::model::{NamedNode, Term};
use spargebra::algebra::PropertyPathExpression;

use crate::error::PathError;
use crate::path::{NegatedProperty, PathOptions, ShaclPropertyPath};
use crate::store::FactStore;
use crate::visitor::PathVisitor;

/// The operator tag of an algebra node, using the SPARQL property path
/// operator symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathOperator {
    Sequence,
    Alternative,
    Inverse,
    ZeroOrMore,
    OneOrMore,
    ZeroOrOne,
    NegatedPropertySet,
}

impl PathOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            PathOperator::Sequence => "/",
            PathOperator::Alternative => "|",
            PathOperator::Inverse => "^",
            PathOperator::ZeroOrMore => "*",
            PathOperator::OneOrMore => "+",
            PathOperator::ZeroOrOne => "?",
            PathOperator::NegatedPropertySet => "!",
        }
    }
}

impl fmt::Display for PathOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A compiled path: a bare edge-label term, or an operator node. The tree
/// is a direct structural image of the path, with no simplification, for
/// a query planner to consume raw.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathExpression {
    Term(NamedNode),
    Path(PathAlgebra),
}

/// An operator node: a tag and its ordered operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathAlgebra {
    pub operator: PathOperator,
    pub items: Vec<PathExpression>,
}

fn path_node(operator: PathOperator, items: Vec<PathExpression>) -> PathExpression {
    PathExpression::Path(PathAlgebra { operator, items })
}

struct ToAlgebraVisitor;

impl ToAlgebraVisitor {
    fn compile_all(&mut self, paths: &[ShaclPropertyPath]) -> Vec<PathExpression> {
        paths.iter().map(|path| self.visit(path, ())).collect()
    }
}

impl PathVisitor<PathExpression, ()> for ToAlgebraVisitor {
    fn visit_predicate_path(&mut self, predicate: &NamedNode, _arg: ()) -> PathExpression {
        PathExpression::Term(predicate.clone())
    }

    fn visit_sequence_path(&mut self, steps: &[ShaclPropertyPath], _arg: ()) -> PathExpression {
        path_node(PathOperator::Sequence, self.compile_all(steps))
    }

    fn visit_alternative_path(
        &mut self,
        branches: &[ShaclPropertyPath],
        _arg: (),
    ) -> PathExpression {
        path_node(PathOperator::Alternative, self.compile_all(branches))
    }

    fn visit_inverse_path(&mut self, inner: &ShaclPropertyPath, _arg: ()) -> PathExpression {
        path_node(PathOperator::Inverse, vec![self.visit(inner, ())])
    }

    fn visit_zero_or_one_path(&mut self, inner: &ShaclPropertyPath, _arg: ()) -> PathExpression {
        path_node(PathOperator::ZeroOrOne, vec![self.visit(inner, ())])
    }

    fn visit_zero_or_more_path(&mut self, inner: &ShaclPropertyPath, _arg: ()) -> PathExpression {
        path_node(PathOperator::ZeroOrMore, vec![self.visit(inner, ())])
    }

    fn visit_one_or_more_path(&mut self, inner: &ShaclPropertyPath, _arg: ()) -> PathExpression {
        path_node(PathOperator::OneOrMore, vec![self.visit(inner, ())])
    }

    fn visit_negated_property_set(
        &mut self,
        excluded: &[NegatedProperty],
        _arg: (),
    ) -> PathExpression {
        let items = excluded
            .iter()
            .map(|member| match member {
                NegatedProperty::Direct(predicate) => PathExpression::Term(predicate.clone()),
                NegatedProperty::Inverse(predicate) => path_node(
                    PathOperator::Inverse,
                    vec![PathExpression::Term(predicate.clone())],
                ),
            })
            .collect();
        path_node(PathOperator::NegatedPropertySet, items)
    }
}

/// Compiles a path to its generic operator-tree representation. A bare
/// predicate compiles to the bare term, not an operator node.
pub fn to_algebra(path: &ShaclPropertyPath) -> PathExpression {
    ToAlgebraVisitor.visit(path, ())
}

/// Builds the path description rooted at `node` and compiles it.
pub fn to_algebra_from<S: FactStore>(store: &S, node: &Term) -> Result<PathExpression, PathError> {
    let path = ShaclPropertyPath::from_term(store, node, PathOptions::default())?;
    Ok(to_algebra(&path))
}

/// Translates a path into spargebra's SPARQL algebra, for handing to a
/// SPARQL query engine.
///
/// spargebra's sequences and alternatives are binary, so n-ary nodes fold
/// left-associatively. A negated property set splits into its direct and
/// inverse sides per the SPARQL algebra translation of `!(...)`.
pub fn to_property_path_expression(
    path: &ShaclPropertyPath,
) -> Result<PropertyPathExpression, PathError> {
    let algebra = match path {
        ShaclPropertyPath::Predicate(predicate) => {
            PropertyPathExpression::NamedNode(spargebra_term(predicate))
        }
        ShaclPropertyPath::Sequence(steps) => {
            fold_binary(steps, PropertyPathExpression::Sequence)?
        }
        ShaclPropertyPath::Alternative(branches) => {
            fold_binary(branches, PropertyPathExpression::Alternative)?
        }
        ShaclPropertyPath::Inverse(inner) => {
            PropertyPathExpression::Reverse(Box::new(to_property_path_expression(inner)?))
        }
        ShaclPropertyPath::ZeroOrOne(inner) => {
            PropertyPathExpression::ZeroOrOne(Box::new(to_property_path_expression(inner)?))
        }
        ShaclPropertyPath::ZeroOrMore(inner) => {
            PropertyPathExpression::ZeroOrMore(Box::new(to_property_path_expression(inner)?))
        }
        ShaclPropertyPath::OneOrMore(inner) => {
            PropertyPathExpression::OneOrMore(Box::new(to_property_path_expression(inner)?))
        }
        ShaclPropertyPath::NegatedPropertySet(excluded) => {
            let mut direct = Vec::new();
            let mut inverse = Vec::new();
            for member in excluded {
                match member {
                    NegatedProperty::Direct(p) => direct.push(spargebra_term(p)),
                    NegatedProperty::Inverse(p) => inverse.push(spargebra_term(p)),
                }
            }
            match (direct.is_empty(), inverse.is_empty()) {
                (false, true) => PropertyPathExpression::NegatedPropertySet(direct),
                (true, false) => PropertyPathExpression::Reverse(Box::new(
                    PropertyPathExpression::NegatedPropertySet(inverse),
                )),
                (false, false) => PropertyPathExpression::Alternative(
                    Box::new(PropertyPathExpression::NegatedPropertySet(direct)),
                    Box::new(PropertyPathExpression::Reverse(Box::new(
                        PropertyPathExpression::NegatedPropertySet(inverse),
                    ))),
                ),
                (true, true) => {
                    return Err(PathError::Unsupported(
                        "empty negated property set cannot be expressed in SPARQL algebra".into(),
                    ))
                }
            }
        }
    };
    Ok(algebra)
}

fn fold_binary(
    paths: &[ShaclPropertyPath],
    combine: fn(
        Box<PropertyPathExpression>,
        Box<PropertyPathExpression>,
    ) -> PropertyPathExpression,
) -> Result<PropertyPathExpression, PathError> {
    let mut iter = paths.iter();
    let first = iter.next().ok_or_else(|| {
        PathError::Unsupported("empty composite path cannot be expressed in SPARQL algebra".into())
    })?;
    let mut acc = to_property_path_expression(first)?;
    for next in iter {
        acc = combine(Box::new(acc), Box::new(to_property_path_expression(next)?));
    }
    Ok(acc)
}

// spargebra's term types come from oxrdf as well, but going through the
// IRI string keeps this conversion independent of crate version unification.
fn spargebra_term(predicate: &NamedNode) -> spargebra::term::NamedNode {
    spargebra::term::NamedNode::new_unchecked(predicate.as_str())
}
