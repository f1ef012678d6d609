//! Text comparator with case and whitespace normalization

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use similar::TextDiff;

use super::{Comparator, mismatch};
use crate::context::Context;
use crate::difference::Difference;
use crate::differ::Differ;
use crate::error::Result;
use crate::options::{Flag, Flags};
use crate::value::Value;

/// Combined length in characters above which a line diff is attached to the message
const LONG_TEXT_THRESHOLD: usize = 32;

static NON_WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static LINE_BREAK_PADDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]*\n[^\S\n]*").unwrap());

fn collapse_spacing(text: &str) -> String {
    let separated = NON_WORD_RUN.replace_all(text, " $0 ");
    let collapsed = WHITESPACE_RUN.replace_all(&separated, " ");
    collapsed.trim().to_string()
}

fn trim_line_whitespace(text: &str) -> String {
    let without_cr = text.replace('\r', "");
    let trimmed = LINE_BREAK_PADDING.replace_all(&without_cr, "\n");
    trimmed.trim().to_string()
}

/// Produce the comparable form of `text` under `flags`.
///
/// Case folding applies first, then at most one whitespace mode;
/// `ignore_spacing` wins over `ignore_line_whitespace`.
pub fn normalize_text(text: &str, flags: Flags) -> Cow<'_, str> {
    let mut text = Cow::Borrowed(text);
    if flags.contains(Flag::IgnoreCase) {
        text = Cow::Owned(text.to_lowercase());
    }
    if flags.contains(Flag::IgnoreSpacing) {
        text = Cow::Owned(collapse_spacing(&text));
    } else if flags.contains(Flag::IgnoreLineWhitespace) {
        text = Cow::Owned(trim_line_whitespace(&text));
    }
    text
}

/// Compares text after the normalizations active at the node
#[derive(Debug, Default)]
pub struct TextComparator;

impl TextComparator {
    pub fn new() -> Self {
        Self
    }
}

impl Comparator for TextComparator {
    fn name(&self) -> &'static str {
        "text"
    }

    fn can_diff(&self, actual: &Value) -> bool {
        matches!(actual, Value::Text(_))
    }

    fn diff(
        &self,
        _differ: &Differ,
        ctx: &Context<'_>,
        expected: &Value,
        actual: &Value,
    ) -> Result<Vec<Difference>> {
        let (Some(expected_text), Some(actual_text)) = (expected.as_text(), actual.as_text())
        else {
            return Ok(vec![ctx.difference(mismatch(expected, actual))]);
        };

        let flags = ctx.options();
        let expected_norm = normalize_text(expected_text, flags);
        let actual_norm = normalize_text(actual_text, flags);
        if expected_norm == actual_norm {
            return Ok(Vec::new());
        }

        let combined = expected_text.chars().count() + actual_text.chars().count();
        let message = if combined > LONG_TEXT_THRESHOLD {
            let text_diff = TextDiff::from_lines(expected_norm.as_ref(), actual_norm.as_ref());
            let trace = text_diff
                .unified_diff()
                .header("expected", "actual")
                .to_string();
            format!("text differs:\n{trace}")
        } else {
            mismatch(expected, actual)
        };
        Ok(vec![ctx.difference(message)])
    }
}
