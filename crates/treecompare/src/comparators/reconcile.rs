//! Matching of expected and actual children
//!
//! Shared by every comparator that descends into children. Children whose
//! path carries `ignore` are dropped from both sides before any matching.
//! The rest are split into keyed children, paired by identical segment in
//! order of occurrence, and
//! unkeyed children (`ignore_key`), which are treated as a multiset:
//!
//! 1. an exact pass pairs each unkeyed actual child with the first remaining
//!    expected candidate that produces no differences;
//! 2. a best-effort pass pairs each leftover actual child with the remaining
//!    candidate whose differences have the greatest total path depth, the
//!    earliest candidate winning ties;
//! 3. expected children never paired are reported missing.
//!
//! This is a greedy approximation of bipartite matching, not an optimal one.

use std::collections::{HashMap, VecDeque};

use crate::context::Context;
use crate::difference::Difference;
use crate::differ::Differ;
use crate::error::Result;
use crate::options::Flag;
use crate::value::Value;

struct Child<'v> {
    segment: String,
    value: &'v Value,
    keyed: bool,
}

/// Drop ignored children and mark which ones are keyed
fn classify<'v>(ctx: &Context<'_>, children: Vec<(String, &'v Value)>) -> Vec<Child<'v>> {
    children
        .into_iter()
        .filter_map(|(segment, value)| {
            let options = ctx.child(segment.as_str()).options();
            if options.contains(Flag::Ignore) {
                tracing::debug!(path = %ctx.path_string(), %segment, "Ignoring child");
                return None;
            }
            Some(Child {
                segment,
                value,
                keyed: !options.contains(Flag::IgnoreKey),
            })
        })
        .collect()
}

fn unexpected(ctx: &Context<'_>, value: &Value) -> Difference {
    ctx.difference(format!("unexpected value: {value}"))
}

fn total_depth(diffs: &[Difference]) -> usize {
    diffs.iter().map(Difference::depth).sum()
}

/// Reconcile the children of two sequence-, mapping- or decomposition-like
/// nodes.
///
/// Results are ordered: keyed pairings, then unkeyed pairings, then missing
/// expected children.
pub fn reconcile(
    differ: &Differ,
    ctx: &Context<'_>,
    expected: Vec<(String, &Value)>,
    actual: Vec<(String, &Value)>,
) -> Result<Vec<Difference>> {
    let expected = classify(ctx, expected);
    let actual = classify(ctx, actual);
    let mut consumed = vec![false; expected.len()];

    // Decomposed labels may repeat: the n-th actual occurrence of a segment
    // pairs with the n-th expected one.
    let mut keyed_expected: HashMap<&str, VecDeque<usize>> = HashMap::new();
    for (i, child) in expected.iter().enumerate().filter(|(_, c)| c.keyed) {
        keyed_expected
            .entry(child.segment.as_str())
            .or_default()
            .push_back(i);
    }

    let mut keyed_diffs = Vec::new();
    let mut unkeyed_actual = Vec::new();
    for child in &actual {
        if !child.keyed {
            unkeyed_actual.push(child);
            continue;
        }
        let child_ctx = ctx.child(child.segment.as_str());
        let next = keyed_expected
            .get_mut(child.segment.as_str())
            .and_then(VecDeque::pop_front);
        match next {
            Some(i) => {
                consumed[i] = true;
                keyed_diffs.extend(differ.diff_at(&child_ctx, expected[i].value, child.value)?);
            }
            None => keyed_diffs.push(unexpected(&child_ctx, child.value)),
        }
    }

    let unkeyed_candidates: Vec<usize> = expected
        .iter()
        .enumerate()
        .filter(|(_, child)| !child.keyed)
        .map(|(i, _)| i)
        .collect();

    // Exact pass
    let mut unresolved = Vec::new();
    for child in unkeyed_actual {
        let child_ctx = ctx.child(child.segment.as_str());
        let mut matched = None;
        for &i in &unkeyed_candidates {
            if consumed[i] {
                continue;
            }
            if differ.diff_at(&child_ctx, expected[i].value, child.value)?.is_empty() {
                matched = Some(i);
                break;
            }
        }
        match matched {
            Some(i) => consumed[i] = true,
            None => unresolved.push((child, child_ctx)),
        }
    }

    // Best-effort pass
    let mut unkeyed_diffs = Vec::new();
    for (child, child_ctx) in unresolved {
        let mut best: Option<(usize, usize, Vec<Difference>)> = None;
        for &i in &unkeyed_candidates {
            if consumed[i] {
                continue;
            }
            let diffs = differ.diff_at(&child_ctx, expected[i].value, child.value)?;
            let score = total_depth(&diffs);
            if best.as_ref().is_none_or(|(_, best_score, _)| score > *best_score) {
                best = Some((i, score, diffs));
            }
        }
        match best {
            Some((i, _, diffs)) => {
                tracing::debug!(
                    path = %child_ctx.path_string(),
                    candidate = %expected[i].segment,
                    "Paired unkeyed child by closest structure"
                );
                consumed[i] = true;
                unkeyed_diffs.extend(diffs);
            }
            None => unkeyed_diffs.push(unexpected(&child_ctx, child.value)),
        }
    }

    let missing = expected
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(child, _)| {
            ctx.child(child.segment.as_str())
                .difference(format!("expected {}, got nothing", child.value))
        });

    let mut diffs = keyed_diffs;
    diffs.extend(unkeyed_diffs);
    diffs.extend(missing);
    Ok(diffs)
}
