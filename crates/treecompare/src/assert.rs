//! Assertion helpers for tests
//!
//! These panic with a readable report instead of returning a result, so
//! they can be dropped straight into `#[test]` functions.

use crate::difference::Difference;
use crate::differ::diff;
use crate::options::{Flag, RuleSet};
use crate::value::Value;

/// Render differences one per line as ` - <path>: <message>`
pub fn format_report(diffs: &[Difference]) -> String {
    diffs
        .iter()
        .map(|d| format!(" - {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic unless `expected` and `actual` are equivalent under `rules`
#[track_caller]
pub fn assert_equivalent(expected: &Value, actual: &Value, rules: &RuleSet) {
    let diffs = match diff(expected, actual, rules) {
        Ok(diffs) => diffs,
        Err(e) => panic!("diff failed: {e}"),
    };
    if !diffs.is_empty() {
        panic!(
            "Expected object\n{expected}\nand actual object\n{actual}\n\
             should be considered equal, but the following differences were reported:\n{}\n",
            format_report(&diffs)
        );
    }
}

/// Panic unless diffing `expected` against `actual` yields exactly the given
/// `(path, message)` pairs, in any order.
///
/// The comparison itself is a diff: produced and expected [`Difference`]s
/// are matched as an unordered sequence by path string and message.
#[track_caller]
pub fn assert_differences(
    expected_diffs: &[(&str, &str)],
    expected: &Value,
    actual: &Value,
    rules: &RuleSet,
) {
    let diffs = match diff(expected, actual, rules) {
        Ok(diffs) => diffs,
        Err(e) => panic!("diff failed: {e}"),
    };
    let wanted = Value::sequence(
        expected_diffs
            .iter()
            .map(|(path, message)| Difference::at(path, *message)),
    );
    let produced = Value::sequence(diffs.iter().cloned());

    let unordered = match RuleSet::patterns([(r"^\[\d+\]$", Flag::IgnoreKey)]) {
        Ok(rules) => rules,
        Err(e) => panic!("invalid meta rules: {e}"),
    };
    let meta = match diff(&wanted, &produced, &unordered) {
        Ok(meta) => meta,
        Err(e) => panic!("diff of differences failed: {e}"),
    };
    if !meta.is_empty() {
        panic!(
            "Expected object\n{expected}\nand actual object\n{actual}\n\
             failed to produce the expected differences:\n{}\n\
             differences produced:\n{}\n",
            format_report(&meta),
            format_report(&diffs)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_equivalent_passes_on_equal_trees() {
        assert_equivalent(
            &json!({"foo": ["bar", 3, 1.2], "bipples": null}).into(),
            &json!({"bipples": null, "foo": ["bar", 3, 1.2]}).into(),
            &RuleSet::default(),
        );
    }

    #[test]
    #[should_panic(expected = "should be considered equal")]
    fn test_assert_equivalent_panics_with_report() {
        assert_equivalent(&Value::from(1), &Value::from(2), &RuleSet::default());
    }

    #[test]
    fn test_assert_differences_ignores_order() {
        assert_differences(
            &[
                ("[b][0][y]", "expected 11, got nothing"),
                ("[b][0][z]", "unexpected value: 11"),
            ],
            &json!({"a": 1, "b": [{"x": 10, "y": 11}]}).into(),
            &json!({"a": 1, "b": [{"x": 10, "z": 11}]}).into(),
            &RuleSet::default(),
        );
    }

    #[test]
    #[should_panic(expected = "failed to produce the expected differences")]
    fn test_assert_differences_panics_on_mismatch() {
        assert_differences(
            &[("[0]", "expected 1, got 3")],
            &Value::sequence([1]),
            &Value::sequence([2]),
            &RuleSet::default(),
        );
    }

    #[test]
    fn test_format_report() {
        let diffs = vec![
            Difference::at("[0]", "expected 1, got 2"),
            Difference::at("[1]", "unexpected value: 3"),
        ];
        assert_eq!(
            format_report(&diffs),
            " - [0]: expected 1, got 2\n - [1]: unexpected value: 3"
        );
    }
}
