//! Range scanning
//!
//! The stateful core of the engine: given the innermost open range and a
//! line of text, decide what happens next — a skip sequence is consumed as
//! interior text, the range closes at its end pattern, a child rule claims
//! a sub-span, or the line runs out. Rule-match arbitration (earliest start
//! wins, declaration order breaks ties) also lives here because the same
//! arbitration applies to top-level rules and to a range's child rules.

use crate::matcher::PatternMatch;
use crate::rules::{CompiledRange, CompiledRule, RuleKind};
use crate::state::LexerState;
use crate::table::RuleTable;

/// A winning rule match at or after a scan position
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleMatch {
    /// Index of the winning rule in the examined slice
    pub rule: usize,
    /// The whole match; scanning resumes after it
    pub whole: PatternMatch,
    /// The sub-span that receives the rule's scope (equals `whole` unless
    /// the rule styles a capture group)
    pub styled: PatternMatch,
}

/// Find the earliest-starting match among `rules` at or after `pos`.
///
/// Ties on start offset go to the earlier-declared rule. A range-start rule
/// whose range is already on the open stack is ignored: ranges of the same
/// kind do not reopen inside themselves (first-open-wins).
pub(crate) fn best_rule_match(
    table: &RuleTable,
    rules: &[CompiledRule],
    state: &LexerState,
    text: &str,
    pos: usize,
) -> Option<RuleMatch> {
    let mut best: Option<RuleMatch> = None;

    for (index, rule) in rules.iter().enumerate() {
        let candidate = match &rule.kind {
            RuleKind::Keywords(pattern) => pattern
                .find_from(text, pos)
                .map(|m| (m, m)),
            RuleKind::Token { pattern, capture } => match capture {
                Some(group) => pattern.find_captured(text, pos, *group),
                None => pattern.find_from(text, pos).map(|m| (m, m)),
            },
            RuleKind::RangeStart(id) => {
                if state.is_open(*id) {
                    None
                } else {
                    table.range(*id).start.find_from(text, pos).map(|m| (m, m))
                }
            }
        };

        if let Some((whole, styled)) = candidate {
            let better = match &best {
                Some(b) => whole.start < b.whole.start,
                None => true,
            };
            if better {
                best = Some(RuleMatch {
                    rule: index,
                    whole,
                    styled,
                });
            }
        }
    }

    best
}

/// Next event while scanning the interior of an open range
#[derive(Debug, Clone, Copy)]
pub(crate) enum RangeEvent {
    /// A skip sequence was consumed as interior text; resume at `resume`
    Skip { resume: usize },
    /// The range closes; `end` is the offset just past the end match
    Close { end: usize },
    /// A child rule claims a sub-span before the range ends
    Child(RuleMatch),
    /// Neither skip, end, nor child matched before end of line
    Exhausted,
}

/// Decide the next event inside `range` at or after `pos`.
///
/// A skip match at or before the nearest end match suppresses it (escape
/// handling). A child rule wins only when it starts strictly before both
/// delimiters; at equal offsets delimiter handling wins.
pub(crate) fn scan_open_range(
    table: &RuleTable,
    range: &CompiledRange,
    state: &LexerState,
    text: &str,
    pos: usize,
) -> RangeEvent {
    let skip = range.skip.as_ref().and_then(|p| p.find_from(text, pos));
    let end = range.end.find_from(text, pos);
    let child = best_rule_match(table, &range.rules, state, text, pos);

    let delimiter = match (skip.map(|m| m.start), end.map(|m| m.start)) {
        (Some(s), Some(e)) => Some(s.min(e)),
        (Some(s), None) => Some(s),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    };

    if let Some(child) = child {
        if delimiter.map_or(true, |d| child.whole.start < d) {
            return RangeEvent::Child(child);
        }
    }

    match (skip, end) {
        (Some(s), Some(e)) if s.start <= e.start => RangeEvent::Skip { resume: s.end },
        (Some(s), None) => RangeEvent::Skip { resume: s.end },
        (_, Some(e)) => RangeEvent::Close { end: e.end },
        (None, None) => RangeEvent::Exhausted,
    }
}
