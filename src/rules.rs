//! Rule vocabulary for grammar definitions
//!
//! A grammar is an ordered list of attribute scopes, each owning keyword
//! sets, token patterns, and delimited ranges. Declaration order is
//! precedence order: when two rules could claim the same position, the
//! earlier-declared scope wins. This module holds both the definition types
//! grammar authors build and the compiled forms the engine matches with.

use crate::matcher::Pattern;
use crate::style::Style;

/// Identifier of an attribute scope within a compiled rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) u16);

/// Identifier of a compiled range within a rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeId(pub(crate) u16);

/// An attribute scope definition: a named style class plus the rules that
/// put text into it
#[derive(Debug, Clone)]
pub struct ScopeDef {
    /// Scope name (e.g. "comment", "string", "keyword")
    pub name: String,
    /// Display style for spans in this scope
    pub style: Style,
    /// Rules owned by this scope, in declaration order
    pub rules: Vec<RuleDef>,
}

impl ScopeDef {
    /// Create an empty scope definition
    pub fn new(name: &str, style: Style) -> Self {
        Self {
            name: name.to_string(),
            style,
            rules: Vec::new(),
        }
    }

    /// Builder: add a keyword set matched at word boundaries
    pub fn keywords<S: AsRef<str>>(mut self, words: &[S]) -> Self {
        self.rules.push(RuleDef::Keywords(
            words.iter().map(|w| w.as_ref().to_string()).collect(),
        ));
        self
    }

    /// Builder: add a token pattern; the whole match receives the scope
    pub fn token(mut self, pattern: &str) -> Self {
        self.rules.push(RuleDef::Token {
            pattern: pattern.to_string(),
            capture: None,
        });
        self
    }

    /// Builder: add a token pattern where only capture group `group`
    /// receives the scope (the scan still advances past the whole match)
    pub fn token_capture(mut self, pattern: &str, group: usize) -> Self {
        self.rules.push(RuleDef::Token {
            pattern: pattern.to_string(),
            capture: Some(group),
        });
        self
    }

    /// Builder: add a delimited range
    pub fn range(mut self, range: RangeDef) -> Self {
        self.rules.push(RuleDef::Range(range));
        self
    }
}

/// One rule owned by a scope
#[derive(Debug, Clone)]
pub enum RuleDef {
    /// Exact-match word set, matched only at word boundaries
    Keywords(Vec<String>),
    /// Regex token; optionally only a capture group is styled
    Token {
        pattern: String,
        capture: Option<usize>,
    },
    /// Delimited region (comment, string)
    Range(RangeDef),
}

/// A delimited region definition
///
/// Attributes apply to all text between start and end, delimiters
/// included, except where a child scope claims a sub-span.
#[derive(Debug, Clone)]
pub struct RangeDef {
    /// Pattern that opens the range
    pub start: String,
    /// Pattern that closes the range
    pub end: String,
    /// Sequence inside the range that must not be read as the end pattern
    /// (e.g. an escaped quote)
    pub skip: Option<String>,
    /// Whether the range implicitly closes at end of line
    pub one_line: bool,
    /// Scopes whose rules are active only while inside this range
    pub children: Vec<ScopeDef>,
}

impl RangeDef {
    /// Create a range with start and end patterns
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            skip: None,
            one_line: false,
            children: Vec::new(),
        }
    }

    /// Builder: set the skip pattern
    pub fn skip(mut self, pattern: &str) -> Self {
        self.skip = Some(pattern.to_string());
        self
    }

    /// Builder: close implicitly at end of line
    pub fn one_line(mut self) -> Self {
        self.one_line = true;
        self
    }

    /// Builder: add a child scope active only inside this range
    pub fn child(mut self, scope: ScopeDef) -> Self {
        self.children.push(scope);
        self
    }
}

/// A compiled rule: attribute scope plus matchable form
#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub scope: ScopeId,
    pub kind: RuleKind,
}

/// Matchable form of a compiled rule
#[derive(Debug)]
pub(crate) enum RuleKind {
    /// Keyword alternation, word-bounded
    Keywords(Pattern),
    /// Token pattern, optionally styling only one capture group
    Token {
        pattern: Pattern,
        capture: Option<usize>,
    },
    /// Opens the referenced range
    RangeStart(RangeId),
}

/// A compiled delimited range
#[derive(Debug)]
pub(crate) struct CompiledRange {
    pub scope: ScopeId,
    pub start: Pattern,
    pub end: Pattern,
    pub skip: Option<Pattern>,
    pub one_line: bool,
    /// Rules active while this range is the innermost open range
    pub rules: Vec<CompiledRule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Style};

    #[test]
    fn test_scope_builder_order() {
        let scope = ScopeDef::new("number", Style::fg(Color::Cyan))
            .token(r"\b\d+\b")
            .keywords(&["NaN", "Infinity"]);

        assert_eq!(scope.name, "number");
        assert_eq!(scope.rules.len(), 2);
        assert!(matches!(scope.rules[0], RuleDef::Token { .. }));
        assert!(matches!(scope.rules[1], RuleDef::Keywords(_)));
    }

    #[test]
    fn test_range_builder() {
        let range = RangeDef::new("\"", "\"")
            .skip(r"\\.")
            .one_line()
            .child(ScopeDef::new("escape", Style::fg(Color::BrightYellow)).token(r"\\."));

        assert!(range.one_line);
        assert_eq!(range.skip.as_deref(), Some(r"\\."));
        assert_eq!(range.children.len(), 1);
    }
}
