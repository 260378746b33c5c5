use pmst_core::CostVector;
use proptest::prelude::*;

fn cost3() -> impl Strategy<Value = CostVector<3>> {
    prop::array::uniform3(0u32..50).prop_map(CostVector::new)
}

proptest! {
    #[test]
    fn dominance_matches_componentwise_definition(a in cost3(), b in cost3()) {
        let expected = (0..3).all(|i| a[i] <= b[i]);
        prop_assert_eq!(a.dominates(&b), expected);
        let strict = (0..3).all(|i| a[i] < b[i]);
        prop_assert_eq!(a.weakly_dominates(&b), strict);
        prop_assert_eq!(a.pareto_dominates(&b), expected && a != b);
    }

    #[test]
    fn dominance_implies_not_lexicographically_greater(a in cost3(), b in cost3()) {
        if a.dominates(&b) {
            prop_assert!(!b.lex_less(&a));
        }
        if a.weakly_dominates(&b) {
            prop_assert!(a.lex_less(&b));
        }
    }

    #[test]
    fn add_then_subtract_restores(a in cost3(), b in cost3()) {
        let sum = a.checked_add(&b).unwrap();
        prop_assert_eq!(sum.checked_sub(&b), Some(a));
        prop_assert!(a.dominates(&sum));
        prop_assert_eq!(sum.total(), a.total() + b.total());
    }

    #[test]
    fn ord_agrees_with_lex_less(a in cost3(), b in cost3()) {
        prop_assert_eq!(a < b, a.lex_less(&b));
    }
}
