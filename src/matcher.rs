//! Regex matching primitives
//!
//! This module wraps the regex engine behind the two operations the rule
//! machinery needs: leftmost match at-or-after an offset, and the same with
//! a capture group. Matching is always line-local; patterns never see more
//! than one line of text.

use regex::Regex;

/// A matched byte interval within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    /// Byte offset where the match starts (inclusive)
    pub start: usize,
    /// Byte offset where the match ends (exclusive)
    pub end: usize,
}

impl PatternMatch {
    /// Length of the match in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the match is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A compiled line-local pattern
#[derive(Debug)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(|regex| Self { regex })
    }

    /// The source text of this pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Find the leftmost match at or after `from`.
    ///
    /// The search runs over the full line so word-boundary assertions see
    /// the character before `from`. Empty-width matches are reported as no
    /// match; they cannot carry a span and would stall the scan.
    pub fn find_from(&self, text: &str, from: usize) -> Option<PatternMatch> {
        if from > text.len() {
            return None;
        }
        self.regex
            .find_at(text, from)
            .filter(|m| m.end() > m.start())
            .map(|m| PatternMatch {
                start: m.start(),
                end: m.end(),
            })
    }

    /// Find the leftmost match at or after `from`, returning the whole
    /// match and the span of capture group `group`.
    ///
    /// Returns `None` if the pattern does not match or the group did not
    /// participate in the match.
    pub fn find_captured(
        &self,
        text: &str,
        from: usize,
        group: usize,
    ) -> Option<(PatternMatch, PatternMatch)> {
        if from > text.len() {
            return None;
        }
        let caps = self.regex.captures_at(text, from)?;
        let whole = caps.get(0)?;
        if whole.end() == whole.start() {
            return None;
        }
        let captured = caps.get(group)?;
        Some((
            PatternMatch {
                start: whole.start(),
                end: whole.end(),
            },
            PatternMatch {
                start: captured.start(),
                end: captured.end(),
            },
        ))
    }
}

/// The word-boundary assertion used by keyword and identifier rules.
///
/// Rule definitions use this instead of writing the assertion inline so the
/// boundary semantic ("beginning/end of an identifier-like run") stays in
/// one place per platform.
pub const fn word_boundary() -> &'static str {
    r"\b"
}

/// Build a single bounded alternation matching any word in `words`.
///
/// Words are escaped literally and sorted longest first: the regex engine
/// prefers the leftmost alternative, so "in" before "instanceof" would
/// otherwise split the longer keyword.
pub fn keyword_pattern<S: AsRef<str>>(words: &[S]) -> String {
    let mut words: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let body = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    format!("{b}(?:{body}){b}", b = word_boundary())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_from() {
        let pattern = Pattern::new(r"\d+").unwrap();
        assert_eq!(
            pattern.find_from("abc 123 def", 0),
            Some(PatternMatch { start: 4, end: 7 })
        );
        assert_eq!(
            pattern.find_from("abc 123 def", 5),
            Some(PatternMatch { start: 5, end: 7 })
        );
        assert_eq!(pattern.find_from("no numbers", 0), None);
        assert_eq!(pattern.find_from("123", 10), None);
    }

    #[test]
    fn test_find_from_sees_preceding_text() {
        // The boundary assertion must consider the character before the
        // search offset, not treat the offset as start of text.
        let pattern = Pattern::new(r"\bin\b").unwrap();
        assert_eq!(pattern.find_from("xin", 1), None);
        assert_eq!(
            pattern.find_from("x in", 1),
            Some(PatternMatch { start: 2, end: 4 })
        );
    }

    #[test]
    fn test_empty_match_is_none() {
        let pattern = Pattern::new(r"x*").unwrap();
        assert_eq!(pattern.find_from("aaa", 0), None);
    }

    #[test]
    fn test_find_captured() {
        let pattern = Pattern::new(r"\b(\w+)\(").unwrap();
        let (whole, group) = pattern.find_captured("foo(1)", 0, 1).unwrap();
        assert_eq!(whole, PatternMatch { start: 0, end: 4 });
        assert_eq!(group, PatternMatch { start: 0, end: 3 });
    }

    #[test]
    fn test_keyword_pattern_prefers_longest() {
        let pattern = Pattern::new(&keyword_pattern(&["in", "instanceof"])).unwrap();
        assert_eq!(
            pattern.find_from("a instanceof b", 0),
            Some(PatternMatch { start: 2, end: 12 })
        );
        assert_eq!(
            pattern.find_from("a in b", 0),
            Some(PatternMatch { start: 2, end: 4 })
        );
    }

    #[test]
    fn test_keyword_pattern_word_isolation() {
        let pattern = Pattern::new(&keyword_pattern(&["in"])).unwrap();
        assert_eq!(pattern.find_from("int string", 0), None);
        assert_eq!(
            pattern.find_from("for x in xs", 0),
            Some(PatternMatch { start: 6, end: 8 })
        );
    }

    #[test]
    fn test_keyword_pattern_escapes_metacharacters() {
        let pattern = Pattern::new(&keyword_pattern(&["a.b"])).unwrap();
        assert!(pattern.find_from("use a.b here", 0).is_some());
        assert_eq!(pattern.find_from("use aXb here", 0), None);
    }
}
