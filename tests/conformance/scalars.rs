use serde_json::json;
use topodiff::{MismatchKind, Node, compare, equivalent};

// ─── Floats ─────────────────────────────────────────────────────────────────

#[test]
fn float_within_tolerance_passes() {
    assert!(equivalent(&Node::Float(1.0000004), &json!(1.0)));
}

#[test]
fn float_beyond_tolerance_fails() {
    let err = compare(&Node::Float(1.00002), &json!(1.0)).unwrap_err();
    assert_eq!(err.kind, MismatchKind::Value);
}

#[test]
fn float_against_integer_expected_passes() {
    // Reference fixtures serialize whole floats as integers.
    assert!(equivalent(&Node::Float(42.0), &json!(42)));
}

#[test]
fn float_against_string_expected_fails() {
    let err = compare(&Node::Float(1.0), &json!("1.0")).unwrap_err();
    assert_eq!(err.kind, MismatchKind::Value);
}

// ─── Integers ───────────────────────────────────────────────────────────────

#[test]
fn integer_exact_equality_passes() {
    assert!(equivalent(&Node::Int(3), &json!(3)));
}

#[test]
fn integer_mismatch_fails_with_value_cause() {
    let err = compare(&Node::Int(3), &json!(4)).unwrap_err();
    assert_eq!(err.kind, MismatchKind::Value);
    assert!(err.message.contains('3') && err.message.contains('4'));
}

#[test]
fn integer_against_float_expected_fails() {
    // Integer comparison is exact; no cross-type leniency on this side.
    let err = compare(&Node::Int(4), &json!(4.5)).unwrap_err();
    assert_eq!(err.kind, MismatchKind::Value);
}

// ─── Strings ────────────────────────────────────────────────────────────────

#[test]
fn string_literal_equality_passes() {
    assert!(equivalent(&Node::Str("nation".into()), &json!("nation")));
}

#[test]
fn encoded_json_strings_compare_decoded() {
    // 1 vs 1.0 differ textually but decode to the same structure.
    assert!(equivalent(
        &Node::Str(r#"{"a":1}"#.into()),
        &json!(r#"{"a": 1.0}"#)
    ));
}

#[test]
fn encoded_json_strings_with_different_structure_fail() {
    let err = compare(&Node::Str(r#"{"a":1}"#.into()), &json!(r#"{"a":2}"#)).unwrap_err();
    assert_eq!(err.kind, MismatchKind::Value);
}

#[test]
fn undecodable_strings_fall_back_to_literal_comparison() {
    assert!(equivalent(
        &Node::Str("not json {".into()),
        &json!("not json {")
    ));
    assert!(!equivalent(
        &Node::Str("not json {".into()),
        &json!("also not json {")
    ));
}

#[test]
fn decodable_actual_against_undecodable_expected_compares_literally() {
    // Only one side decodes, so the pair falls back to raw comparison.
    assert!(!equivalent(&Node::Str("123".into()), &json!("123 {")));
}

// ─── Null asymmetry ─────────────────────────────────────────────────────────

#[test]
fn absent_matches_null() {
    assert!(equivalent(&Node::Absent, &json!(null)));
}

#[test]
fn absent_against_value_fails_with_null_asymmetry() {
    let err = compare(&Node::Absent, &json!([1, 2])).unwrap_err();
    assert_eq!(err.kind, MismatchKind::NullAsymmetry);
}

// ─── Bools ──────────────────────────────────────────────────────────────────

#[test]
fn bool_comparison_is_exact() {
    assert!(equivalent(&Node::Bool(true), &json!(true)));
    assert!(!equivalent(&Node::Bool(true), &json!(false)));
    assert!(!equivalent(&Node::Bool(false), &json!(0)));
}
