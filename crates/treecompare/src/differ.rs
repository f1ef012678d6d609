//! The diff entry point and comparator registry

use crate::comparators::{self, Comparator, DecomposeComparator};
use crate::context::Context;
use crate::difference::Difference;
use crate::error::{Error, Result};
use crate::options::{Flag, RuleSet};
use crate::value::Value;

/// Maximum nesting depth before diffing fails instead of recursing further.
///
/// Comparison recurses once per level, so this bounds stack usage. Raise it
/// with [`Differ::with_max_depth`] for deeper trees on threads with a large
/// enough stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Dispatches nodes to comparators and applies the cross-cutting options
/// (`ignore`, `assert_includes`).
///
/// Trees nested deeper than the configured limit ([`DEFAULT_MAX_DEPTH`] by
/// default) fail with [`Error::DepthExceeded`] rather than risk exhausting
/// the stack.
///
/// # Examples
///
/// ```
/// use treecompare::{Differ, RuleSet};
/// use serde_json::json;
///
/// let differ = Differ::new();
/// let diffs = differ
///     .diff(
///         &json!({"a": 1, "b": [{"x": 10, "y": 11}]}).into(),
///         &json!({"a": 1, "b": [{"x": 10, "z": 11}]}).into(),
///         &RuleSet::default(),
///     )
///     .unwrap();
///
/// let rendered: Vec<String> = diffs.iter().map(ToString::to_string).collect();
/// assert_eq!(
///     rendered,
///     ["[b][0][z]: unexpected value: 11", "[b][0][y]: expected 11, got nothing"]
/// );
/// ```
pub struct Differ {
    decompose: DecomposeComparator,
    comparators: Vec<Box<dyn Comparator>>,
    max_depth: usize,
}

impl Default for Differ {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Differ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.comparators.iter().map(|c| c.name()).collect();
        f.debug_struct("Differ")
            .field("comparators", &names)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl Differ {
    /// Differ with the built-in comparators
    pub fn new() -> Self {
        Self {
            decompose: DecomposeComparator::new(),
            comparators: comparators::builtin(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting depth beyond which diffing fails with
    /// [`Error::DepthExceeded`]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Add a comparator consulted after the built-ins
    pub fn register(mut self, comparator: impl Comparator + 'static) -> Self {
        self.comparators.push(Box::new(comparator));
        self
    }

    /// Add a comparator consulted before the built-ins
    pub fn register_first(mut self, comparator: impl Comparator + 'static) -> Self {
        self.comparators.insert(0, Box::new(comparator));
        self
    }

    /// Compare two trees from the root
    pub fn diff(
        &self,
        expected: &Value,
        actual: &Value,
        rules: &RuleSet,
    ) -> Result<Vec<Difference>> {
        self.diff_at(&Context::root(rules), expected, actual)
    }

    /// Compare two nodes located at `ctx`
    pub fn diff_at(
        &self,
        ctx: &Context<'_>,
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>> {
        if ctx.depth() > self.max_depth {
            return Err(Error::DepthExceeded {
                path: ctx.path_string(),
                limit: self.max_depth,
            });
        }

        let options = ctx.options();
        if options.contains(Flag::Ignore) {
            return Ok(Vec::new());
        }

        if options.contains(Flag::AssertIncludes) {
            if let Value::Tuple(alternatives) = expected {
                return self.assert_includes(ctx, alternatives, expected, actual);
            }
        }

        let comparator = self.comparator_for(ctx, actual)?;
        tracing::trace!(path = %ctx.path_string(), comparator = comparator.name(), "Comparing");
        comparator.diff(self, ctx, expected, actual)
    }

    /// Succeed if `actual` matches any alternative, compared at the same path
    fn assert_includes(
        &self,
        ctx: &Context<'_>,
        alternatives: &[Value],
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>> {
        for alternative in alternatives {
            if self.diff_at(ctx, alternative, actual)?.is_empty() {
                return Ok(Vec::new());
            }
        }
        tracing::debug!(path = %ctx.path_string(), %actual, "No alternative matched");
        Ok(vec![ctx.difference(format!("{actual} not included in {expected}"))])
    }

    fn comparator_for(&self, ctx: &Context<'_>, actual: &Value) -> Result<&dyn Comparator> {
        if self.decompose.can_diff(actual) {
            return Ok(&self.decompose);
        }
        self.comparators
            .iter()
            .find(|c| c.can_diff(actual))
            .map(|c| c.as_ref())
            .ok_or_else(|| {
                tracing::debug!(
                    path = %ctx.path_string(),
                    type_name = actual.type_name(),
                    "No comparator"
                );
                Error::no_comparator(actual.type_name(), ctx.path_string())
            })
    }
}

/// Compare two trees with the built-in comparators
pub fn diff(expected: &Value, actual: &Value, rules: &RuleSet) -> Result<Vec<Difference>> {
    Differ::new().diff(expected, actual, rules)
}
