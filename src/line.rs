//! Single-line highlighting
//!
//! `highlight_line` is a pure function of the rule table, the line text,
//! and the lexer state entering the line. It produces the line's styled
//! spans and the state entering the next line. Callers that want
//! incremental behavior cache both; see [`crate::update`].

use crate::range::{best_rule_match, scan_open_range, RangeEvent};
use crate::rules::{RuleKind, ScopeId};
use crate::state::LexerState;
use crate::style::Span;
use crate::table::RuleTable;

/// Result of highlighting a single line
#[derive(Debug)]
pub struct LineResult {
    /// Styled spans, non-overlapping and ordered by start offset
    pub spans: Vec<Span>,
    /// State at end of line (input state for the next line)
    pub end_state: LexerState,
}

/// Push a span, dropping empty intervals
fn push_span(spans: &mut Vec<Span>, start: usize, end: usize, scope: ScopeId) {
    if end > start {
        spans.push(Span::new(start, end, scope));
    }
}

impl RuleTable {
    /// Highlight one line of text.
    ///
    /// `start_state` is the stack of ranges open at the start of the line.
    /// Unmatched text receives no span (default style). Never fails: any
    /// input yields a (possibly empty) span list.
    pub fn highlight_line(&self, text: &str, start_state: &LexerState) -> LineResult {
        let mut spans = Vec::new();
        let mut state = start_state.clone();
        let mut pos = 0;
        // Start of the innermost open range's current styled segment
        let mut anchor = 0;

        loop {
            if let Some(id) = state.innermost() {
                let range = self.range(id);
                match scan_open_range(self, range, &state, text, pos) {
                    RangeEvent::Skip { resume } => {
                        pos = resume;
                    }
                    RangeEvent::Close { end } => {
                        push_span(&mut spans, anchor, end, range.scope);
                        state.pop();
                        anchor = end;
                        pos = end;
                    }
                    RangeEvent::Child(m) => match range.rules[m.rule].kind {
                        RuleKind::RangeStart(child_id) => {
                            push_span(&mut spans, anchor, m.whole.start, range.scope);
                            state.push(child_id);
                            anchor = m.whole.start;
                            pos = m.whole.end;
                        }
                        _ => {
                            push_span(&mut spans, anchor, m.styled.start, range.scope);
                            push_span(
                                &mut spans,
                                m.styled.start,
                                m.styled.end,
                                range.rules[m.rule].scope,
                            );
                            anchor = m.styled.end;
                            pos = m.whole.end.max(m.styled.end);
                        }
                    },
                    RangeEvent::Exhausted => {
                        push_span(&mut spans, anchor, text.len(), range.scope);
                        anchor = text.len();
                        pos = text.len();
                        if range.one_line {
                            // Force-close at end of line; an enclosing
                            // range (if any) takes over with nothing left
                            state.pop();
                        } else {
                            break;
                        }
                    }
                }
            } else {
                if pos >= text.len() {
                    break;
                }
                match best_rule_match(self, self.top_rules(), &state, text, pos) {
                    None => break,
                    Some(m) => match self.top_rules()[m.rule].kind {
                        RuleKind::RangeStart(id) => {
                            state.push(id);
                            anchor = m.whole.start;
                            pos = m.whole.end;
                        }
                        _ => {
                            push_span(
                                &mut spans,
                                m.styled.start,
                                m.styled.end,
                                self.top_rules()[m.rule].scope,
                            );
                            pos = m.whole.end.max(m.styled.end);
                        }
                    },
                }
            }
        }

        LineResult {
            spans,
            end_state: state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RangeDef, ScopeDef};
    use crate::style::{Color, Style};

    /// Assert spans are within bounds, ordered, and non-overlapping
    fn assert_partition(result: &LineResult, text: &str) {
        let mut last_end = 0;
        for span in &result.spans {
            assert!(span.start >= last_end, "overlapping spans: {:?}", result.spans);
            assert!(span.end <= text.len(), "span past line end: {:?}", span);
            assert!(span.start < span.end, "empty span: {:?}", span);
            last_end = span.end;
        }
    }

    fn c_like_table() -> RuleTable {
        RuleTable::compile(vec![
            ScopeDef::new("comment", Style::fg(Color::BrightBlack))
                .range(RangeDef::new(r"/\*", r"\*/"))
                .token(r"//.*"),
            ScopeDef::new("string", Style::fg(Color::Green))
                .range(RangeDef::new("\"", "\"").skip(r"\\.").one_line()),
            ScopeDef::new("keyword", Style::fg(Color::Magenta))
                .keywords(&["class", "in", "return"]),
            ScopeDef::new("number", Style::fg(Color::Cyan)).token(r"\b\d+\b"),
        ])
        .unwrap()
    }

    #[test]
    fn test_keywords_and_numbers() {
        let table = c_like_table();
        let result = table.highlight_line("return 42", &LexerState::new());

        assert_partition(&result, "return 42");
        assert!(result.end_state.is_normal());
        let keyword = table.scope_named("keyword").unwrap();
        let number = table.scope_named("number").unwrap();
        assert_eq!(
            result.spans,
            vec![Span::new(0, 6, keyword), Span::new(7, 9, number)]
        );
    }

    #[test]
    fn test_word_boundary_isolation() {
        // "in" must not match inside "int" or "string"
        let table = c_like_table();
        let result = table.highlight_line("int string", &LexerState::new());
        let keyword = table.scope_named("keyword").unwrap();
        assert!(!result.spans.iter().any(|s| s.scope == keyword));
    }

    #[test]
    fn test_idempotence() {
        let table = c_like_table();
        let text = r#"return "a\"b" /* open"#;
        let first = table.highlight_line(text, &LexerState::new());
        let second = table.highlight_line(text, &LexerState::new());
        assert_eq!(first.spans, second.spans);
        assert_eq!(first.end_state, second.end_state);
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let table = c_like_table();
        let text = r#"x = "a\"b";"#;
        let result = table.highlight_line(text, &LexerState::new());

        assert_partition(&result, text);
        assert!(result.end_state.is_normal());
        let string = table.scope_named("string").unwrap();
        // The string literal spans the escaped quote, delimiters included
        assert!(result.spans.contains(&Span::new(4, 10, string)));
    }

    #[test]
    fn test_unterminated_string_force_closes() {
        let table = c_like_table();
        let text = r#"x = "text"#;
        let result = table.highlight_line(text, &LexerState::new());

        let string = table.scope_named("string").unwrap();
        assert!(result.spans.contains(&Span::new(4, text.len(), string)));
        // Single-line range never leaks state into the next line
        assert!(result.end_state.is_normal());
    }

    #[test]
    fn test_cross_line_comment_propagation() {
        let table = c_like_table();
        let comment = table.scope_named("comment").unwrap();
        let lines = ["/* start", "middle", "end */ code"];

        let first = table.highlight_line(lines[0], &LexerState::new());
        assert!(!first.end_state.is_normal());
        assert_eq!(first.spans, vec![Span::new(0, 8, comment)]);

        let second = table.highlight_line(lines[1], &first.end_state);
        assert!(!second.end_state.is_normal());
        assert_eq!(second.spans, vec![Span::new(0, 6, comment)]);

        let third = table.highlight_line(lines[2], &second.end_state);
        assert!(third.end_state.is_normal());
        // Comment closes partway through; "code" is left default-styled
        assert_eq!(third.spans, vec![Span::new(0, 6, comment)]);
    }

    #[test]
    fn test_comment_delimiters_override_keywords() {
        let table = c_like_table();
        let text = "/* class in here */ class";
        let result = table.highlight_line(text, &LexerState::new());

        assert_partition(&result, text);
        let comment = table.scope_named("comment").unwrap();
        let keyword = table.scope_named("keyword").unwrap();
        assert_eq!(result.spans[0], Span::new(0, 19, comment));
        assert_eq!(result.spans[1], Span::new(20, 25, keyword));
    }

    #[test]
    fn test_line_comment_to_eol() {
        let table = c_like_table();
        let text = "x // return 42";
        let result = table.highlight_line(text, &LexerState::new());

        let comment = table.scope_named("comment").unwrap();
        assert_eq!(result.spans, vec![Span::new(2, 14, comment)]);
    }

    #[test]
    fn test_precedence_declaration_order_both_ways() {
        // "class(" matches both the keyword set and a call-style capture;
        // whichever scope is declared first wins the overlap.
        let keyword_first = RuleTable::compile(vec![
            ScopeDef::new("keyword", Style::default()).keywords(&["class"]),
            ScopeDef::new("call", Style::default()).token_capture(r"\b(\w+)\(", 1),
        ])
        .unwrap();
        let result = keyword_first.highlight_line("class(x)", &LexerState::new());
        let keyword = keyword_first.scope_named("keyword").unwrap();
        assert_eq!(result.spans[0], Span::new(0, 5, keyword));

        let call_first = RuleTable::compile(vec![
            ScopeDef::new("call", Style::default()).token_capture(r"\b(\w+)\(", 1),
            ScopeDef::new("keyword", Style::default()).keywords(&["class"]),
        ])
        .unwrap();
        let result = call_first.highlight_line("class(x)", &LexerState::new());
        let call = call_first.scope_named("call").unwrap();
        assert_eq!(result.spans[0], Span::new(0, 5, call));
    }

    #[test]
    fn test_capture_styles_group_only() {
        let table = RuleTable::compile(vec![
            ScopeDef::new("call", Style::default()).token_capture(r"\b(\w+)\s*\(", 1),
        ])
        .unwrap();
        let result = table.highlight_line("foo (x)", &LexerState::new());
        let call = table.scope_named("call").unwrap();
        // Only the identifier is styled, but the scan advances past "foo ("
        assert_eq!(result.spans, vec![Span::new(0, 3, call)]);
    }

    #[test]
    fn test_child_scope_inside_range() {
        let table = RuleTable::compile(vec![ScopeDef::new("string", Style::fg(Color::Green))
            .range(RangeDef::new("\"", "\"").one_line().child(
                ScopeDef::new("escape", Style::fg(Color::BrightYellow)).token(r"\\."),
            ))])
        .unwrap();

        let text = r#""a\nb""#;
        let result = table.highlight_line(text, &LexerState::new());
        assert_partition(&result, text);

        let string = table.scope_named("string").unwrap();
        let escape = table.scope_named("escape").unwrap();
        assert_eq!(
            result.spans,
            vec![
                Span::new(0, 2, string),
                Span::new(2, 4, escape),
                Span::new(4, 6, string),
            ]
        );
        assert!(result.end_state.is_normal());
    }

    #[test]
    fn test_nested_range_inside_range() {
        // An interpolation-style child range inside a string
        let table = RuleTable::compile(vec![ScopeDef::new("string", Style::fg(Color::Green))
            .range(RangeDef::new("\"", "\"").one_line().child(
                ScopeDef::new("interp", Style::fg(Color::Yellow))
                    .range(RangeDef::new(r"\$\{", r"\}").one_line()),
            ))])
        .unwrap();

        let text = r#""a${x}b""#;
        let result = table.highlight_line(text, &LexerState::new());
        assert_partition(&result, text);

        let string = table.scope_named("string").unwrap();
        let interp = table.scope_named("interp").unwrap();
        assert_eq!(
            result.spans,
            vec![
                Span::new(0, 2, string),
                Span::new(2, 6, interp),
                Span::new(6, 8, string),
            ]
        );
        assert!(result.end_state.is_normal());
    }

    #[test]
    fn test_same_range_does_not_reopen_inside_itself() {
        // A hybrid delimiter (same start and end) must close, not nest
        let table = RuleTable::compile(vec![ScopeDef::new("string", Style::fg(Color::Green))
            .range(RangeDef::new("\"", "\"").one_line())])
        .unwrap();

        let text = r#""a" b "c""#;
        let result = table.highlight_line(text, &LexerState::new());
        assert_partition(&result, text);

        let string = table.scope_named("string").unwrap();
        assert_eq!(
            result.spans,
            vec![Span::new(0, 3, string), Span::new(6, 9, string)]
        );
    }

    #[test]
    fn test_empty_line() {
        let table = c_like_table();
        let result = table.highlight_line("", &LexerState::new());
        assert!(result.spans.is_empty());
        assert!(result.end_state.is_normal());
    }

    #[test]
    fn test_empty_line_inside_comment() {
        let table = c_like_table();
        let first = table.highlight_line("/* open", &LexerState::new());
        let result = table.highlight_line("", &first.end_state);
        assert!(result.spans.is_empty());
        assert_eq!(result.end_state, first.end_state);
    }

    #[test]
    fn test_no_rules_no_spans() {
        let table = RuleTable::compile(Vec::new()).unwrap();
        let result = table.highlight_line("anything at all", &LexerState::new());
        assert!(result.spans.is_empty());
        assert!(result.end_state.is_normal());
    }

    #[test]
    fn test_utf8_text_does_not_panic() {
        let table = c_like_table();
        let text = "préfix \"héllo\" // çomment";
        let result = table.highlight_line(text, &LexerState::new());
        assert_partition(&result, text);
    }
}
