//! The value tree compared by the differ
//!
//! A [`Value`] is one of the built-in kinds (null, booleans, numbers, text,
//! sequences, tuples and mappings) or a [`CustomValue`] supplied by the
//! caller. Custom values either decompose into labelled children, which the
//! differ walks generically, or stay opaque and need a registered
//! [`Comparator`](crate::comparators::Comparator).
//!
//! # Examples
//!
//! ```
//! use treecompare::Value;
//! use serde_json::json;
//!
//! let value: Value = json!({"name": "test", "tags": ["a", "b"]}).into();
//! assert_eq!(value.to_string(), "{'name': 'test', 'tags': ['a', 'b']}");
//! assert_eq!(Value::tuple(["x", "y"]).to_string(), "('x', 'y')");
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Capability implemented by caller-defined types that take part in a diff.
///
/// `decompose` returns the ordered `(label, child)` pairs the differ should
/// compare. Each label is used verbatim as a path segment, so it should carry
/// its own syntax (e.g. `".field"`). Returning `None` marks the value opaque.
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// Name used in messages and to decide whether two custom values are
    /// structurally comparable.
    fn type_name(&self) -> &str;

    fn decompose(&self) -> Option<Vec<(String, Value)>> {
        None
    }

    /// Access to the concrete type for registered comparators.
    fn as_any(&self) -> &dyn Any;
}

/// A numeric value. Integer and floating representations compare by value.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Int(i), Number::Float(f)) | (Number::Float(f), Number::Int(i)) => {
                float_to_int(f) == Some(i)
            }
        }
    }
}

/// Exact integer value of `f`, if it has one representable as `i128`
fn float_to_int(f: f64) -> Option<i128> {
    // 2^127; `as` saturates outside [-2^127, 2^127)
    const BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    (f.is_finite() && f.fract() == 0.0 && (-BOUND..BOUND).contains(&f)).then(|| f as i128)
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            // Debug keeps the decimal point on whole floats
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// A node in a tree being compared
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Sequence(Vec<Value>),
    /// Fixed sequence; doubles as the alternatives of `assert_includes`
    Tuple(Vec<Value>),
    /// Key/value pairs with unique keys. Order only affects report order.
    Mapping(Vec<(String, Value)>),
    Custom(Arc<dyn CustomValue>),
}

impl Value {
    /// Build a tuple from anything convertible into values
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Build a sequence from anything convertible into values
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Build a mapping. A repeated key replaces the earlier value in place.
    pub fn mapping<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut entries: Vec<(String, Value)> = Vec::new();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
        Value::Mapping(entries)
    }

    /// Wrap a user-defined value
    pub fn custom(value: impl CustomValue + 'static) -> Self {
        Value::Custom(Arc::new(value))
    }

    /// Name of the runtime shape, used in error messages
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Sequence(_) => "sequence",
            Value::Tuple(_) => "tuple",
            Value::Mapping(_) => "mapping",
            Value::Custom(custom) => custom.type_name(),
        }
    }

    /// The string, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The number, if this is numeric
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Items of a sequence or tuple
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// The user-defined value, if this is one
    pub fn as_custom(&self) -> Option<&dyn CustomValue> {
        match self {
            Value::Custom(custom) => Some(custom.as_ref()),
            _ => None,
        }
    }

    /// Downcast a custom value to its concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_custom()?.as_any().downcast_ref::<T>()
    }

    /// Look up a key in a mapping
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

fn write_text(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("'")?;
    for ch in text.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            _ => write!(f, "{ch}")?,
        }
    }
    f.write_str("'")
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(text) => write_text(f, text),
            Value::Sequence(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_text(f, key)?;
                    write!(f, ": {value}")?;
                }
                f.write_str("}")
            }
            Value::Custom(custom) => match custom.decompose() {
                Some(children) => {
                    write!(f, "{}(", custom.type_name())?;
                    for (i, (label, child)) in children.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{label}={child}")?;
                    }
                    f.write_str(")")
                }
                None => write!(f, "{custom:?}"),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::Int(n as i128))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(Number::Float(f64::from(n)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Float(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::sequence(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Number> for Number {
    fn from(n: serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i128::from(i))
        } else if let Some(u) = n.as_u64() {
            Number::Int(i128::from(u))
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.into()),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::sequence(items),
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_equality_across_representations() {
        assert_eq!(Number::Int(3), Number::Float(3.0));
        assert_eq!(Number::Float(3.0), Number::Int(3));
        assert_ne!(Number::Int(3), Number::Float(3.5));
        assert_ne!(Number::Float(f64::NAN), Number::Float(f64::NAN));
    }

    #[test]
    fn test_out_of_range_float_never_equals_int() {
        assert_ne!(Number::Float(1e300), Number::Int(i128::MAX));
        assert_ne!(Number::Int(i128::MIN), Number::Float(-1e300));
        assert_ne!(Number::Float(f64::INFINITY), Number::Int(i128::MAX));
        assert_ne!(Number::Float(2f64.powi(127)), Number::Int(i128::MAX));
        assert_eq!(Number::Float(-(2f64.powi(127))), Number::Int(i128::MIN));
        assert_eq!(Number::Float(2f64.powi(100)), Number::Int(1 << 100));
    }

    #[test]
    fn test_display_is_repr_like() {
        assert_eq!(Value::from("d").to_string(), "'d'");
        assert_eq!(Value::from("it's\n").to_string(), r"'it\'s\n'");
        assert_eq!(Value::from(11).to_string(), "11");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::tuple([1]).to_string(), "(1,)");
        assert_eq!(
            Value::mapping([("a", 1)]).to_string(),
            "{'a': 1}"
        );
    }

    #[test]
    fn test_from_json_keeps_structure() {
        let value: Value = json!({"a": [1, 2.5, null], "b": true}).into();
        assert_eq!(value.type_name(), "mapping");
        let items = value.get("a").and_then(Value::as_items).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].as_number(), Some(Number::Float(2.5)));
        assert!(matches!(value.get("b"), Some(Value::Bool(true))));
    }

    #[test]
    fn test_mapping_replaces_duplicate_keys() {
        let value = Value::mapping([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(value.to_string(), "{'a': 3, 'b': 2}");
    }

    #[test]
    fn test_option_converts_none_to_null() {
        assert!(matches!(Value::from(None::<i32>), Value::Null));
        assert!(matches!(Value::from(Some("x")), Value::Text(_)));
    }
}
