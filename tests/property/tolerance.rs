use proptest::prelude::*;
use serde_json::json;
use topodiff::{Node, equivalent};

proptest! {
    /// Floats within the absolute tolerance compare equal. Deltas stay
    /// clear of the 1e-6 boundary so rounding in `a + delta` cannot flip
    /// the verdict.
    #[test]
    fn floats_within_tolerance_compare_equal(
        a in -1.0e6f64..1.0e6,
        delta in -9.0e-7f64..9.0e-7,
    ) {
        prop_assert!(equivalent(&Node::Float(a), &json!(a + delta)));
    }

    /// Floats beyond the tolerance fail.
    #[test]
    fn floats_beyond_tolerance_fail(
        a in -1.0e6f64..1.0e6,
        delta in 2.0e-6f64..1.0,
    ) {
        prop_assert!(!equivalent(&Node::Float(a), &json!(a + delta)));
        prop_assert!(!equivalent(&Node::Float(a), &json!(a - delta)));
    }
}
