//! Option flags and the rules that activate them per path
//!
//! A [`RuleSet`] is either a fixed set of flags, active everywhere, or a list
//! of regex rules. Pattern rules are searched (not anchored) against the
//! canonical path string of every node, so a rule may fire at any depth.
//!
//! # Examples
//!
//! ```
//! use treecompare::options::{Flag, RuleSet};
//!
//! let rules = RuleSet::patterns([(r"^\[\d+\]$", Flag::IgnoreKey)]).unwrap();
//! assert!(rules.resolve("[3]").contains(Flag::IgnoreKey));
//! assert!(rules.resolve("[3][0]").is_empty());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single comparison option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Skip the node entirely
    Ignore,
    /// Match the node's children regardless of index or key
    IgnoreKey,
    /// Treat an expected tuple as a set of accepted alternatives
    AssertIncludes,
    /// Fold case before comparing text
    IgnoreCase,
    /// Ignore all whitespace except as a token separator
    IgnoreSpacing,
    /// Ignore whitespace around line breaks and at the ends of text
    IgnoreLineWhitespace,
}

impl Flag {
    pub const ALL: [Flag; 6] = [
        Flag::Ignore,
        Flag::IgnoreKey,
        Flag::AssertIncludes,
        Flag::IgnoreCase,
        Flag::IgnoreSpacing,
        Flag::IgnoreLineWhitespace,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Configuration name, e.g. `ignore_key`
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Ignore => "ignore",
            Flag::IgnoreKey => "ignore_key",
            Flag::AssertIncludes => "assert_includes",
            Flag::IgnoreCase => "ignore_case",
            Flag::IgnoreSpacing => "ignore_spacing",
            Flag::IgnoreLineWhitespace => "ignore_line_whitespace",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of [`Flag`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags(u8);

impl Flags {
    pub const fn empty() -> Self {
        Flags(0)
    }

    /// Whether `flag` is set
    pub fn contains(self, flag: Flag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Set `flag`
    pub fn insert(&mut self, flag: Flag) {
        self.0 |= flag.bit();
    }

    /// Flags set in either operand
    pub fn union(self, other: Flags) -> Flags {
        Flags(self.0 | other.0)
    }

    /// Whether no flag is set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set flags in declaration order
    pub fn iter(self) -> impl Iterator<Item = Flag> {
        Flag::ALL.into_iter().filter(move |flag| self.contains(*flag))
    }
}

impl From<Flag> for Flags {
    fn from(flag: Flag) -> Self {
        Flags(flag.bit())
    }
}

impl<const N: usize> From<[Flag; N]> for Flags {
    fn from(flags: [Flag; N]) -> Self {
        flags.into_iter().collect()
    }
}

impl FromIterator<Flag> for Flags {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut flags = Flags::empty();
        for flag in iter {
            flags.insert(flag);
        }
        flags
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Flag::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// A compiled pattern and the flags it activates
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    flags: Flags,
}

impl Rule {
    /// Compile `pattern`, failing with [`Error::InvalidPattern`] if it is not
    /// a valid regex
    pub fn new(pattern: &str, flags: impl Into<Flags>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e))?;
        Ok(Self {
            pattern: regex,
            flags: flags.into(),
        })
    }

    /// Source of the compiled pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Flags applied where the pattern matches
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether the pattern matches anywhere in `path`
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Caller-supplied comparison options
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RuleSpec")]
pub enum RuleSet {
    /// Flags applied at every path
    Fixed(Flags),
    /// Flags applied where a pattern matches the path
    Patterns(Vec<Rule>),
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::Fixed(Flags::empty())
    }
}

impl RuleSet {
    /// The empty rule set
    pub fn none() -> Self {
        Self::default()
    }

    /// The same flags at every path
    pub fn fixed(flags: impl Into<Flags>) -> Self {
        RuleSet::Fixed(flags.into())
    }

    /// Compile `(pattern, flags)` pairs, failing on the first invalid regex.
    pub fn patterns<I, P, F>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, F)>,
        P: AsRef<str>,
        F: Into<Flags>,
    {
        let rules = rules
            .into_iter()
            .map(|(pattern, flags)| Rule::new(pattern.as_ref(), flags))
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleSet::Patterns(rules))
    }

    /// Flags active at the given canonical path string
    pub fn resolve(&self, path: &str) -> Flags {
        match self {
            RuleSet::Fixed(flags) => *flags,
            RuleSet::Patterns(rules) => rules
                .iter()
                .filter(|rule| rule.matches(path))
                .fold(Flags::empty(), |acc, rule| acc.union(rule.flags)),
        }
    }
}

impl From<Flag> for RuleSet {
    fn from(flag: Flag) -> Self {
        RuleSet::fixed(flag)
    }
}

impl From<Flags> for RuleSet {
    fn from(flags: Flags) -> Self {
        RuleSet::Fixed(flags)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Flag),
    Many(Vec<Flag>),
}

impl From<OneOrMany> for Flags {
    fn from(spec: OneOrMany) -> Self {
        match spec {
            OneOrMany::One(flag) => flag.into(),
            OneOrMany::Many(flags) => flags.into_iter().collect(),
        }
    }
}

/// Serialized shape of a [`RuleSet`]
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleSpec {
    Fixed(OneOrMany),
    Patterns(BTreeMap<String, OneOrMany>),
}

impl TryFrom<RuleSpec> for RuleSet {
    type Error = Error;

    fn try_from(spec: RuleSpec) -> Result<Self> {
        match spec {
            RuleSpec::Fixed(flags) => Ok(RuleSet::Fixed(flags.into())),
            RuleSpec::Patterns(map) => RuleSet::patterns(
                map.into_iter()
                    .map(|(pattern, flags)| (pattern, Flags::from(flags))),
            ),
        }
    }
}
