//! Structural diffing of nested value trees
//!
//! Compares an expected tree against an actual one and reports every
//! discrepancy as a [`Difference`] with a path, so a failing assertion says
//! where two trees differ and how, not just that they do. Comparison can be
//! tuned per path with regex rules (see [`options`]).

pub mod assert;
pub mod comparators;
pub mod context;
pub mod differ;
pub mod difference;
pub mod error;
pub mod options;
pub mod value;

pub use comparators::Comparator;
pub use context::Context;
pub use differ::{Differ, diff};
pub use difference::Difference;
pub use error::{Error, Result};
pub use options::{Flag, Flags, RuleSet};
pub use value::{CustomValue, Number, Value};
