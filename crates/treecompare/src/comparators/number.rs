//! Numeric comparator

use super::{Comparator, mismatch};
use crate::context::Context;
use crate::difference::Difference;
use crate::differ::Differ;
use crate::error::Result;
use crate::value::Value;

/// Compares numbers by value, ignoring integer/float representation
#[derive(Debug, Default)]
pub struct NumberComparator;

impl NumberComparator {
    pub fn new() -> Self {
        Self
    }
}

impl Comparator for NumberComparator {
    fn name(&self) -> &'static str {
        "number"
    }

    fn can_diff(&self, actual: &Value) -> bool {
        matches!(actual, Value::Number(_))
    }

    fn diff(
        &self,
        _differ: &Differ,
        ctx: &Context<'_>,
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>> {
        if expected.as_number() == actual.as_number() {
            Ok(Vec::new())
        } else {
            Ok(vec![ctx.difference(mismatch(expected, actual))])
        }
    }
}
