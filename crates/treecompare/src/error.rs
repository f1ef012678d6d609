//! Error types for treecompare
//!
//! Differences between two trees are never errors. These variants cover the
//! cases where the engine cannot judge equivalence at all.

/// Result type for treecompare operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while diffing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No comparator registered for {type_name} at '{path}'")]
    NoComparator { type_name: String, path: String },

    #[error("Invalid option pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Tree at '{path}' is nested deeper than the limit of {limit}")]
    DepthExceeded { path: String, limit: usize },
}

impl Error {
    /// Create a no-comparator error for a value at `path`
    pub fn no_comparator(type_name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::NoComparator {
            type_name: type_name.into(),
            path: path.into(),
        }
    }

    /// Create an invalid-pattern error from a failed regex compilation
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
