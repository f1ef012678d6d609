//! Tests for custom values and registered comparators

use std::any::Any;

use pretty_assertions::assert_eq;
use treecompare::{
    Comparator, Context, CustomValue, Difference, Differ, Error, Flag, Result, RuleSet, Value,
};

/// Decomposes into its coordinates
#[derive(Debug)]
struct Point {
    x: i64,
    y: i64,
}

impl CustomValue for Point {
    fn type_name(&self) -> &str {
        "Point"
    }

    fn decompose(&self) -> Option<Vec<(String, Value)>> {
        Some(vec![
            (".x".to_string(), self.x.into()),
            (".y".to_string(), self.y.into()),
        ])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Opaque; only comparable through a registered comparator
#[derive(Debug)]
struct Celsius(f64);

impl CustomValue for Celsius {
    fn type_name(&self) -> &str {
        "Celsius"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Document-like node whose children share a label
#[derive(Debug)]
struct Element(Vec<(&'static str, &'static str)>);

impl CustomValue for Element {
    fn type_name(&self) -> &str {
        "Element"
    }

    fn decompose(&self) -> Option<Vec<(String, Value)>> {
        Some(
            self.0
                .iter()
                .map(|(label, text)| (label.to_string(), Value::from(*text)))
                .collect(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct CelsiusComparator {
    tolerance: f64,
}

impl Comparator for CelsiusComparator {
    fn name(&self) -> &'static str {
        "celsius"
    }

    fn can_diff(&self, actual: &Value) -> bool {
        actual.downcast_ref::<Celsius>().is_some()
    }

    fn diff(
        &self,
        _differ: &Differ,
        ctx: &Context<'_>,
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>> {
        let (Some(e), Some(a)) = (
            expected.downcast_ref::<Celsius>(),
            actual.downcast_ref::<Celsius>(),
        ) else {
            return Ok(vec![ctx.difference("expected a temperature")]);
        };
        if (e.0 - a.0).abs() <= self.tolerance {
            Ok(Vec::new())
        } else {
            Ok(vec![ctx.difference(format!("expected {}C, got {}C", e.0, a.0))])
        }
    }
}

/// Treats every pair of strings as equal
struct AnyTextComparator;

impl Comparator for AnyTextComparator {
    fn name(&self) -> &'static str {
        "any-text"
    }

    fn can_diff(&self, actual: &Value) -> bool {
        matches!(actual, Value::Text(_))
    }

    fn diff(
        &self,
        _differ: &Differ,
        _ctx: &Context<'_>,
        _expected: &Value,
        _actual: &Value,
    ) -> Result<Vec<Difference>> {
        Ok(Vec::new())
    }
}

fn point(x: i64, y: i64) -> Value {
    Value::custom(Point { x, y })
}

#[test]
fn test_decomposable_values_diff_by_label() {
    let diffs = Differ::new()
        .diff(
            &Value::sequence([point(0, 0), point(1, 2)]),
            &Value::sequence([point(0, 0), point(1, 3)]),
            &RuleSet::default(),
        )
        .unwrap();
    let rendered: Vec<String> = diffs.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["[1].y: expected 2, got 3"]);
}

#[test]
fn test_repeated_labels_are_reflexive() {
    let element = Value::custom(Element(vec![("/child", "a"), ("/child", "b")]));
    let diffs = Differ::new()
        .diff(&element, &element, &RuleSet::default())
        .unwrap();
    assert!(diffs.is_empty());
}

#[test]
fn test_repeated_labels_pair_by_occurrence() {
    let diffs = Differ::new()
        .diff(
            &Value::custom(Element(vec![("/child", "a"), ("/child", "b")])),
            &Value::custom(Element(vec![("/child", "a"), ("/child", "c")])),
            &RuleSet::default(),
        )
        .unwrap();
    let rendered: Vec<String> = diffs.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["/child: expected 'b', got 'c'"]);
}

#[test]
fn test_rules_apply_to_decomposed_labels() {
    let rules = RuleSet::patterns([(r"\.y$", Flag::Ignore)]).unwrap();
    let diffs = Differ::new()
        .diff(&point(1, 2), &point(1, 99), &rules)
        .unwrap();
    assert!(diffs.is_empty());
}

#[test]
fn test_decomposable_against_other_kind_is_mismatch() {
    let diffs = Differ::new()
        .diff(&Value::Null, &point(1, 2), &RuleSet::default())
        .unwrap();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].message(), "expected null, got Point(.x=1, .y=2)");
}

#[test]
fn test_opaque_value_without_comparator_fails() {
    let value = Value::custom(Celsius(20.0));
    let err = Differ::new()
        .diff(&value, &value, &RuleSet::default())
        .unwrap_err();
    match err {
        Error::NoComparator { type_name, path } => {
            assert_eq!(type_name, "Celsius");
            assert_eq!(path, "");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_no_comparator_reports_nested_path() {
    let err = Differ::new()
        .diff(
            &Value::mapping([("temp", Value::custom(Celsius(1.0)))]),
            &Value::mapping([("temp", Value::custom(Celsius(1.0)))]),
            &RuleSet::default(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::NoComparator { ref path, .. } if path == "[temp]"));
}

#[test]
fn test_registered_comparator_handles_opaque_values() {
    let differ = Differ::new().register(CelsiusComparator { tolerance: 0.5 });
    let expected = Value::mapping([("inside", Celsius(21.0)), ("outside", Celsius(4.0))]);
    let actual = Value::mapping([("inside", Celsius(21.3)), ("outside", Celsius(9.0))]);

    let diffs = differ.diff(&expected, &actual, &RuleSet::default()).unwrap();
    assert_eq!(
        diffs,
        vec![Difference::at("[outside]", "expected 4C, got 9C")]
    );
}

#[test]
fn test_register_first_overrides_builtins() {
    let differ = Differ::new().register_first(AnyTextComparator);
    let diffs = differ
        .diff(&Value::from("a"), &Value::from("b"), &RuleSet::default())
        .unwrap();
    assert!(diffs.is_empty());

    let diffs = Differ::new()
        .register(AnyTextComparator)
        .diff(&Value::from("a"), &Value::from("b"), &RuleSet::default())
        .unwrap();
    assert_eq!(diffs.len(), 1);
}

impl From<Celsius> for Value {
    fn from(c: Celsius) -> Self {
        Value::custom(c)
    }
}
