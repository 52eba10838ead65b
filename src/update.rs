//! Incremental highlighting sessions
//!
//! A [`Highlighter`] owns a shared rule table plus a per-line cache of
//! spans and lexer states for one buffer. The host drives it with edit
//! notifications and render requests; the updater recomputes the smallest
//! forward run of lines an edit could have affected, stopping as soon as
//! the state flowing out of the recomputed run matches the state the next
//! cached line was computed from (the ripple has stabilized).
//!
//! Everything runs synchronously on the caller's thread. Notification
//! indices outside the buffer are treated as "nothing cached yet", never
//! as errors.

use std::borrow::Cow;
use std::sync::Arc;

use crate::state::LexerState;
use crate::style::Span;
use crate::table::RuleTable;

/// Read-only access to the host's buffer content
pub trait LineSource {
    /// Number of lines currently in the buffer
    fn line_count(&self) -> usize;

    /// Text of one line, without its line terminator.
    /// `None` for out-of-range indices.
    fn line_text(&self, index: usize) -> Option<Cow<'_, str>>;
}

/// One cached line
#[derive(Debug, Clone)]
struct CachedLine {
    /// State this line was highlighted from (state entering the line)
    start_state: LexerState,
    /// State entering the next line
    end_state: LexerState,
    spans: Vec<Span>,
}

/// An incremental highlighting session for one buffer
pub struct Highlighter {
    table: Arc<RuleTable>,
    /// Per-line cache; `None` = not computed or invalidated
    lines: Vec<Option<CachedLine>>,
    needs_redraw: bool,
}

impl Highlighter {
    /// Create a session over a shared rule table
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self {
            table,
            lines: Vec::new(),
            needs_redraw: true,
        }
    }

    /// The active rule table (for resolving span scopes to styles)
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Swap the active grammar; all cached state is invalidated
    pub fn set_rule_table(&mut self, table: Arc<RuleTable>) {
        self.table = table;
        self.lines.clear();
        self.needs_redraw = true;
    }

    /// Fetch and clear the redraw hint.
    ///
    /// Set whenever recomputation changed lines beyond the ones the host
    /// already knows it touched; the host coalesces actual drawing.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Buffer content in lines `[first, last]` is about to change.
    ///
    /// Drops cached state for the affected lines. Entries before `first`
    /// are untouched; they carry the pre-edit state the post-edit pass
    /// resumes from.
    pub fn on_before_edit(&mut self, first: usize, last: usize) {
        for i in first..=last.min(self.lines.len().saturating_sub(1)) {
            if let Some(entry) = self.lines.get_mut(i) {
                *entry = None;
            }
        }
    }

    /// Buffer content in lines `[first, last]` has changed.
    ///
    /// Recomputes forward from `first` until the ripple stabilizes or the
    /// buffer ends.
    pub fn on_after_edit(&mut self, first: usize, last: usize, source: &impl LineSource) {
        self.sync_len(source.line_count());
        // Re-drop the edited interval in case the pre notification was
        // never delivered
        self.on_before_edit(first, last);
        self.ripple(first, Some(last), source);
    }

    /// A line was inserted at `index`; cache entries shift down.
    pub fn on_line_inserted(&mut self, index: usize) {
        if index <= self.lines.len() {
            self.lines.insert(index, None);
        }
    }

    /// The line at `index` was deleted; cache entries shift up.
    ///
    /// Recomputation past the deletion point only happens when the
    /// deleted content crossed a range boundary, detected by the same
    /// stabilization check the edit path uses.
    pub fn on_line_deleted(&mut self, index: usize, source: &impl LineSource) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
        self.sync_len(source.line_count());
        self.ripple(index, None, source);
    }

    /// Spans for one line, computing (and caching) anything missing.
    ///
    /// Render path: always returns, possibly empty. A request for a line
    /// whose state is stale after an edit recomputes it synchronously, so
    /// the renderer never observes stale spans.
    pub fn highlight_line(&mut self, index: usize, source: &impl LineSource) -> Vec<Span> {
        let count = source.line_count();
        if index >= count {
            return Vec::new();
        }
        self.sync_len(count);

        if let Some(entry) = self.lines.get(index).and_then(|e| e.as_ref()) {
            return entry.spans.clone();
        }

        let start_state = self.state_entering(index, source);
        let text = source.line_text(index).unwrap_or(Cow::Borrowed(""));
        let result = self.table.highlight_line(&text, &start_state);
        let spans = result.spans.clone();
        self.lines[index] = Some(CachedLine {
            start_state,
            end_state: result.end_state,
            spans: result.spans,
        });
        spans
    }

    /// State entering line `index`, replaying uncached predecessors from
    /// the nearest cached prefix
    fn state_entering(&mut self, index: usize, source: &impl LineSource) -> LexerState {
        let mut start = index;
        let mut state = LexerState::new();
        while start > 0 {
            if let Some(entry) = self.lines.get(start - 1).and_then(|e| e.as_ref()) {
                state = entry.end_state.clone();
                break;
            }
            start -= 1;
        }

        for i in start..index {
            let text = source.line_text(i).unwrap_or(Cow::Borrowed(""));
            let result = self.table.highlight_line(&text, &state);
            let start_state = std::mem::replace(&mut state, result.end_state.clone());
            self.lines[i] = Some(CachedLine {
                start_state,
                end_state: result.end_state,
                spans: result.spans,
            });
        }
        state
    }

    /// Recompute forward from `first`. Lines through `changed_through`
    /// are unconditionally recomputed (their text changed); past that,
    /// stop as soon as a cached line was computed from the state the
    /// replay just produced, or when nothing is cached ahead.
    fn ripple(&mut self, first: usize, changed_through: Option<usize>, source: &impl LineSource) {
        let count = source.line_count();
        if first >= count {
            return;
        }

        let mut state = self.state_entering(first, source);
        for i in first..count {
            let settled = changed_through.map_or(true, |last| i > last);
            if settled {
                if let Some(entry) = self.lines.get(i).and_then(|e| e.as_ref()) {
                    if entry.start_state == state {
                        break;
                    }
                } else if !self.lines[i..].iter().any(|e| e.is_some()) {
                    // Nothing cached from here on; lazy catch-up computes
                    // these lines from the fresh prefix on first render
                    break;
                }
            }

            let text = source.line_text(i).unwrap_or(Cow::Borrowed(""));
            let result = self.table.highlight_line(&text, &state);
            let start_state = std::mem::replace(&mut state, result.end_state.clone());
            self.lines[i] = Some(CachedLine {
                start_state,
                end_state: result.end_state,
                spans: result.spans,
            });
            if settled {
                self.needs_redraw = true;
            }
        }
    }

    /// Grow or shrink the cache to the buffer's line count
    fn sync_len(&mut self, count: usize) {
        self.lines.truncate(count);
        if self.lines.len() < count {
            self.lines.resize(count, None);
        }
    }
}
