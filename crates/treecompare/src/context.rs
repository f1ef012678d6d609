//! Path tracking and per-node option resolution
//!
//! A [`Context`] is created for every node visited. It carries the path
//! segments from the root and a borrowed [`RuleSet`]. Options are resolved
//! from the full canonical path each time they are asked for, never inherited
//! from the parent, so the same rule is re-evaluated at every depth.

use crate::difference::Difference;
use crate::options::{Flags, RuleSet};

/// Path segment for a sequence index, e.g. `[0]`
pub fn index_segment(index: usize) -> String {
    format!("[{index}]")
}

/// Path segment for a mapping key, e.g. `[name]`
pub fn key_segment(key: &str) -> String {
    format!("[{key}]")
}

/// Position of a node in the tree being diffed
#[derive(Debug, Clone)]
pub struct Context<'r> {
    path: Vec<String>,
    rules: &'r RuleSet,
}

impl<'r> Context<'r> {
    /// Context for the root node, with an empty path
    pub fn root(rules: &'r RuleSet) -> Self {
        Self {
            path: Vec::new(),
            rules,
        }
    }

    /// Context for a direct child, one segment deeper
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().cloned());
        path.push(segment.into());
        Self {
            path,
            rules: self.rules,
        }
    }

    /// Path segments from the root
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Canonical path string: all segments concatenated
    pub fn path_string(&self) -> String {
        self.path.concat()
    }

    /// Number of segments between the root and this node
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Rule set shared by every node of this comparison
    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Flags active at this node
    pub fn options(&self) -> Flags {
        self.rules.resolve(&self.path_string())
    }

    /// A difference located at this node
    pub fn difference(&self, message: impl Into<String>) -> Difference {
        Difference::new(self.path.clone(), message)
    }
}
