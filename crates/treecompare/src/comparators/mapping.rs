//! Mapping comparator

use super::{Comparator, mismatch, reconcile};
use crate::context::{Context, key_segment};
use crate::difference::Difference;
use crate::differ::Differ;
use crate::error::Result;
use crate::value::Value;

fn keyed(entries: &[(String, Value)]) -> Vec<(String, &Value)> {
    entries
        .iter()
        .map(|(key, value)| (key_segment(key), value))
        .collect()
}

/// Compares mappings entry by entry, keyed by key; entry order is irrelevant
#[derive(Debug, Default)]
pub struct MappingComparator;

impl MappingComparator {
    pub fn new() -> Self {
        Self
    }
}

impl Comparator for MappingComparator {
    fn name(&self) -> &'static str {
        "mapping"
    }

    fn can_diff(&self, actual: &Value) -> bool {
        matches!(actual, Value::Mapping(_))
    }

    fn diff(
        &self,
        differ: &Differ,
        ctx: &Context<'_>,
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>> {
        match (expected, actual) {
            (Value::Mapping(expected_entries), Value::Mapping(actual_entries)) => reconcile(
                differ,
                ctx,
                keyed(expected_entries),
                keyed(actual_entries),
            ),
            _ => Ok(vec![ctx.difference(mismatch(expected, actual))]),
        }
    }
}
