//! Located mismatch records

use std::any::Any;
use std::fmt;

use crate::value::{CustomValue, Value};

/// A single mismatch: where it is and what is wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    path: Vec<String>,
    message: String,
}

impl Difference {
    /// A difference at the given path segments
    pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// A difference whose path is given as a canonical path string.
    ///
    /// The string is split into `[...]` segments and `.label` segments, so
    /// `at("[b][0]", m)` equals the difference a comparator reports two
    /// levels down. Keys containing unbalanced brackets do not round-trip.
    pub fn at(path: &str, message: impl Into<String>) -> Self {
        Self::new(split_path(path), message)
    }

    /// Path segments from the root
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Canonical path string: all segments concatenated
    pub fn path_string(&self) -> String {
        self.path.concat()
    }

    /// Number of path segments
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// What is wrong at this path
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn split_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut brackets = 0usize;
    for ch in path.chars() {
        match ch {
            '[' | '.' if brackets == 0 && !current.is_empty() => {
                segments.push(std::mem::take(&mut current));
                current.push(ch);
                if ch == '[' {
                    brackets = 1;
                }
            }
            '[' => {
                brackets += 1;
                current.push(ch);
            }
            ']' if brackets > 0 => {
                brackets -= 1;
                current.push(ch);
                if brackets == 0 {
                    segments.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_string(), self.message)
    }
}

/// Differences compare by canonical path and message
impl CustomValue for Difference {
    fn type_name(&self) -> &str {
        "Difference"
    }

    fn decompose(&self) -> Option<Vec<(String, Value)>> {
        Some(vec![
            (".path".to_string(), Value::Text(self.path_string())),
            (".message".to_string(), Value::Text(self.message.clone())),
        ])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<Difference> for Value {
    fn from(difference: Difference) -> Self {
        Value::custom(difference)
    }
}
