//! Type-specific comparators and the trait they share

mod decompose;
mod mapping;
mod number;
mod primitive;
mod reconcile;
mod sequence;
mod text;

pub use decompose::DecomposeComparator;
pub use mapping::MappingComparator;
pub use number::NumberComparator;
pub use primitive::PrimitiveComparator;
pub use reconcile::reconcile;
pub use sequence::SequenceComparator;
pub use text::{TextComparator, normalize_text};

use crate::context::Context;
use crate::difference::Difference;
use crate::differ::Differ;
use crate::error::Result;
use crate::value::Value;

/// Trait for comparators selected by the runtime shape of the actual value
pub trait Comparator: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// Whether this comparator handles the given actual value
    fn can_diff(&self, actual: &Value) -> bool;

    /// Compare `expected` against `actual` at `ctx`.
    ///
    /// Children are compared by calling back into
    /// [`Differ::diff_at`] with a child context.
    fn diff(
        &self,
        differ: &Differ,
        ctx: &Context<'_>,
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>>;
}

/// Built-in comparators in priority order
pub fn builtin() -> Vec<Box<dyn Comparator>> {
    vec![
        Box::new(PrimitiveComparator::new()),
        Box::new(NumberComparator::new()),
        Box::new(TextComparator::new()),
        Box::new(SequenceComparator::new()),
        Box::new(MappingComparator::new()),
    ]
}

/// Whole-node mismatch message
pub(crate) fn mismatch(expected: &Value, actual: &Value) -> String {
    format!("expected {expected}, got {actual}")
}
