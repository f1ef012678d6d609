//! Generic comparator for custom values that decompose into children

use super::{Comparator, mismatch, reconcile};
use crate::context::Context;
use crate::difference::Difference;
use crate::differ::Differ;
use crate::error::Result;
use crate::value::Value;

/// Compares custom values of the same type through their `(label, child)`
/// decomposition. Labels are used verbatim as path segments.
#[derive(Debug, Default)]
pub struct DecomposeComparator;

impl DecomposeComparator {
    pub fn new() -> Self {
        Self
    }
}

impl Comparator for DecomposeComparator {
    fn name(&self) -> &'static str {
        "decompose"
    }

    fn can_diff(&self, actual: &Value) -> bool {
        actual
            .as_custom()
            .is_some_and(|custom| custom.decompose().is_some())
    }

    fn diff(
        &self,
        differ: &Differ,
        ctx: &Context<'_>,
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>> {
        let (Some(expected_custom), Some(actual_custom)) =
            (expected.as_custom(), actual.as_custom())
        else {
            return Ok(vec![ctx.difference(mismatch(expected, actual))]);
        };
        if expected_custom.type_name() != actual_custom.type_name() {
            return Ok(vec![ctx.difference(mismatch(expected, actual))]);
        }
        let (Some(expected_children), Some(actual_children)) =
            (expected_custom.decompose(), actual_custom.decompose())
        else {
            return Ok(vec![ctx.difference(mismatch(expected, actual))]);
        };

        reconcile(
            differ,
            ctx,
            expected_children.iter().map(|(l, v)| (l.clone(), v)).collect(),
            actual_children.iter().map(|(l, v)| (l.clone(), v)).collect(),
        )
    }
}
