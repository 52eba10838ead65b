//! hiline - an incremental, rule-driven syntax highlighting engine
//!
//! Given a declarative grammar of keyword sets, regex token rules, and
//! delimited ranges (comments, strings), the engine assigns attribute
//! scopes to byte spans of line text, and keeps those assignments correct
//! and cheap to recompute while the text is edited one line or one edit at
//! a time. The host editor owns storage, rendering, and event dispatch;
//! this crate owns the grammar and the per-line state machine.
//!
//! - [`RuleTable::compile`] turns ordered [`ScopeDef`]s into an immutable
//!   grammar, shareable across buffers via `Arc`.
//! - [`RuleTable::highlight_line`] maps one line plus the [`LexerState`]
//!   entering it to styled [`Span`]s and the state for the next line.
//! - [`Highlighter`] caches per-line results for one buffer and reacts to
//!   edit notifications, recomputing only until the state ripple
//!   stabilizes.
//!
//! ```
//! use hiline::{Color, LexerState, RangeDef, RuleTable, ScopeDef, Style};
//!
//! let table = RuleTable::compile(vec![
//!     ScopeDef::new("comment", Style::fg(Color::BrightBlack))
//!         .range(RangeDef::new(r"/\*", r"\*/")),
//!     ScopeDef::new("keyword", Style::fg(Color::Magenta)).keywords(&["fn", "let"]),
//! ])?;
//!
//! let result = table.highlight_line("let x = 1; /* note", &LexerState::new());
//! assert_eq!(result.spans.len(), 2);
//! assert!(!result.end_state.is_normal(), "the comment stays open");
//! # Ok::<(), hiline::HighlightError>(())
//! ```

mod error;
pub mod grammars;
mod line;
mod loader;
mod matcher;
mod range;
mod rules;
mod state;
mod style;
mod table;
mod update;

pub use error::{HighlightError, Result};
pub use line::LineResult;
pub use loader::{load_grammar, parse_grammar};
pub use matcher::{keyword_pattern, word_boundary, Pattern, PatternMatch};
pub use rules::{RangeDef, RuleDef, ScopeDef, ScopeId};
pub use state::LexerState;
pub use style::{Color, Span, Style};
pub use table::RuleTable;
pub use update::{Highlighter, LineSource};
