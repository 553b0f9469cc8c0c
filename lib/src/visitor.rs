use oxigraph::model::NamedNode;

use crate::path::{NegatedProperty, ShaclPropertyPath};

/// Double-dispatch over the path grammar, one method per variant.
///
/// `R` is the consumer's result type and `C` an arbitrary context value
/// threaded through recursive calls (a current frontier, an "is this the
/// syntactic root" flag, or nothing at all). Every consumer must implement
/// all eight methods; adding a ninth path variant therefore forces every
/// consumer in the crate to handle it.
pub trait PathVisitor<R, C> {
    /// Dispatches on the path's variant tag.
    fn visit(&mut self, path: &ShaclPropertyPath, arg: C) -> R {
        match path {
            ShaclPropertyPath::Predicate(predicate) => self.visit_predicate_path(predicate, arg),
            ShaclPropertyPath::Sequence(steps) => self.visit_sequence_path(steps, arg),
            ShaclPropertyPath::Alternative(branches) => {
                self.visit_alternative_path(branches, arg)
            }
            ShaclPropertyPath::Inverse(inner) => self.visit_inverse_path(inner, arg),
            ShaclPropertyPath::ZeroOrOne(inner) => self.visit_zero_or_one_path(inner, arg),
            ShaclPropertyPath::ZeroOrMore(inner) => self.visit_zero_or_more_path(inner, arg),
            ShaclPropertyPath::OneOrMore(inner) => self.visit_one_or_more_path(inner, arg),
            ShaclPropertyPath::NegatedPropertySet(excluded) => {
                self.visit_negated_property_set(excluded, arg)
            }
        }
    }

    fn visit_predicate_path(&mut self, predicate: &NamedNode, arg: C) -> R;
    fn visit_sequence_path(&mut self, steps: &[ShaclPropertyPath], arg: C) -> R;
    fn visit_alternative_path(&mut self, branches: &[ShaclPropertyPath], arg: C) -> R;
    fn visit_inverse_path(&mut self, inner: &ShaclPropertyPath, arg: C) -> R;
    fn visit_zero_or_one_path(&mut self, inner: &ShaclPropertyPath, arg: C) -> R;
    fn visit_zero_or_more_path(&mut self, inner: &ShaclPropertyPath, arg: C) -> R;
    fn visit_one_or_more_path(&mut self, inner: &ShaclPropertyPath, arg: C) -> R;
    fn visit_negated_property_set(&mut self, excluded: &[NegatedProperty], arg: C) -> R;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ex;

    /// Reports which method a given variant dispatched to.
    struct TagVisitor;

    impl PathVisitor<&'static str, ()> for TagVisitor {
        fn visit_predicate_path(&mut self, _: &NamedNode, _: ()) -> &'static str {
            "predicate"
        }
        fn visit_sequence_path(&mut self, _: &[ShaclPropertyPath], _: ()) -> &'static str {
            "sequence"
        }
        fn visit_alternative_path(&mut self, _: &[ShaclPropertyPath], _: ()) -> &'static str {
            "alternative"
        }
        fn visit_inverse_path(&mut self, _: &ShaclPropertyPath, _: ()) -> &'static str {
            "inverse"
        }
        fn visit_zero_or_one_path(&mut self, _: &ShaclPropertyPath, _: ()) -> &'static str {
            "zero-or-one"
        }
        fn visit_zero_or_more_path(&mut self, _: &ShaclPropertyPath, _: ()) -> &'static str {
            "zero-or-more"
        }
        fn visit_one_or_more_path(&mut self, _: &ShaclPropertyPath, _: ()) -> &'static str {
            "one-or-more"
        }
        fn visit_negated_property_set(&mut self, _: &[NegatedProperty], _: ()) -> &'static str {
            "negated"
        }
    }

    #[test]
    fn visit_dispatches_by_variant() {
        let predicate = ShaclPropertyPath::Predicate(ex("p"));
        let cases = [
            (predicate.clone(), "predicate"),
            (
                ShaclPropertyPath::Sequence(vec![predicate.clone(), predicate.clone()]),
                "sequence",
            ),
            (
                ShaclPropertyPath::Alternative(vec![predicate.clone(), predicate.clone()]),
                "alternative",
            ),
            (
                ShaclPropertyPath::Inverse(Box::new(predicate.clone())),
                "inverse",
            ),
            (
                ShaclPropertyPath::ZeroOrOne(Box::new(predicate.clone())),
                "zero-or-one",
            ),
            (
                ShaclPropertyPath::ZeroOrMore(Box::new(predicate.clone())),
                "zero-or-more",
            ),
            (
                ShaclPropertyPath::OneOrMore(Box::new(predicate.clone())),
                "one-or-more",
            ),
            (
                ShaclPropertyPath::NegatedPropertySet(vec![NegatedProperty::Direct(ex("p"))]),
                "negated",
            ),
        ];

        let mut visitor = TagVisitor;
        for (path, expected) in cases {
            assert_eq!(visitor.visit(&path, ()), expected);
        }
    }
}
