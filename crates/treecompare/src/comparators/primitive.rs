//! Null and boolean comparator

use super::{Comparator, mismatch};
use crate::context::Context;
use crate::difference::Difference;
use crate::differ::Differ;
use crate::error::Result;
use crate::value::Value;

/// Compares nulls and booleans by equality
#[derive(Debug, Default)]
pub struct PrimitiveComparator;

impl PrimitiveComparator {
    pub fn new() -> Self {
        Self
    }
}

impl Comparator for PrimitiveComparator {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn can_diff(&self, actual: &Value) -> bool {
        matches!(actual, Value::Null | Value::Bool(_))
    }

    fn diff(
        &self,
        _differ: &Differ,
        ctx: &Context<'_>,
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>> {
        let equal = match (expected, actual) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        };
        if equal {
            Ok(Vec::new())
        } else {
            Ok(vec![ctx.difference(mismatch(expected, actual))])
        }
    }
}
