//! Sequence and tuple comparator

use super::{Comparator, mismatch, reconcile};
use crate::context::{Context, index_segment};
use crate::difference::Difference;
use crate::differ::Differ;
use crate::error::Result;
use crate::value::Value;

fn indexed(items: &[Value]) -> Vec<(String, &Value)> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (index_segment(i), item))
        .collect()
}

/// Compares sequence-like values item by item, keyed by index
#[derive(Debug, Default)]
pub struct SequenceComparator;

impl SequenceComparator {
    pub fn new() -> Self {
        Self
    }
}

impl Comparator for SequenceComparator {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn can_diff(&self, actual: &Value) -> bool {
        actual.as_items().is_some()
    }

    fn diff(
        &self,
        differ: &Differ,
        ctx: &Context<'_>,
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>> {
        let (Some(expected_items), Some(actual_items)) = (expected.as_items(), actual.as_items())
        else {
            return Ok(vec![ctx.difference(mismatch(expected, actual))]);
        };
        reconcile(differ, ctx, indexed(expected_items), indexed(actual_items))
    }
}
