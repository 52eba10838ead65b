//! Grammar file loading
//!
//! Grammars can be described in TOML instead of built programmatically:
//! an ordered `[[scope]]` array where each scope carries a style plus any
//! of `keywords`, `tokens` (plain patterns), `[[scope.token]]` tables
//! (patterns with a styled capture group), and `[[scope.range]]` tables
//! with optional recursive `[[scope.range.child]]` scopes.
//!
//! ```toml
//! [[scope]]
//! name = "comment"
//! style = { fg = "bright-black", italic = true }
//! tokens = ['//.*']
//!
//!   [[scope.range]]
//!   start = '/\*'
//!   end = '\*/'
//!
//! [[scope]]
//! name = "keyword"
//! style = { fg = "magenta", bold = true }
//! keywords = ["if", "else", "while"]
//! ```
//!
//! Declaration order in the file is precedence order, exactly as with
//! [`RuleTable::compile`].

use std::path::Path;

use toml::Value;

use crate::error::{HighlightError, Result};
use crate::rules::{RangeDef, RuleDef, ScopeDef};
use crate::style::{Color, Style};
use crate::table::RuleTable;

/// Parse a TOML grammar document into scope definitions
pub fn parse_grammar(text: &str) -> Result<Vec<ScopeDef>> {
    let doc: toml::Table = text
        .parse()
        .map_err(|e: toml::de::Error| HighlightError::Grammar(e.to_string()))?;

    let scopes = doc
        .get("scope")
        .and_then(Value::as_array)
        .ok_or_else(|| HighlightError::Grammar("missing [[scope]] array".to_string()))?;

    scopes.iter().map(parse_scope).collect()
}

/// Load and compile a grammar file
pub fn load_grammar(path: impl AsRef<Path>) -> Result<RuleTable> {
    let text = std::fs::read_to_string(path)?;
    RuleTable::compile(parse_grammar(&text)?)
}

fn parse_scope(value: &Value) -> Result<ScopeDef> {
    let table = value
        .as_table()
        .ok_or_else(|| HighlightError::Grammar("scope entry must be a table".to_string()))?;

    let name = table
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| HighlightError::Grammar("scope missing 'name'".to_string()))?;

    let style = match table.get("style") {
        Some(style) => parse_style(name, style)?,
        None => Style::default(),
    };

    let mut scope = ScopeDef::new(name, style);

    if let Some(keywords) = table.get("keywords") {
        scope.rules.push(RuleDef::Keywords(string_array(name, "keywords", keywords)?));
    }

    if let Some(tokens) = table.get("tokens") {
        for pattern in string_array(name, "tokens", tokens)? {
            scope.rules.push(RuleDef::Token {
                pattern,
                capture: None,
            });
        }
    }

    if let Some(tokens) = table.get("token") {
        let tokens = tokens.as_array().ok_or_else(|| {
            HighlightError::Grammar(format!("scope '{name}': 'token' must be an array of tables"))
        })?;
        for token in tokens {
            scope.rules.push(parse_token(name, token)?);
        }
    }

    if let Some(ranges) = table.get("range") {
        let ranges = ranges.as_array().ok_or_else(|| {
            HighlightError::Grammar(format!("scope '{name}': 'range' must be an array of tables"))
        })?;
        for range in ranges {
            scope.rules.push(RuleDef::Range(parse_range(name, range)?));
        }
    }

    Ok(scope)
}

fn parse_token(scope: &str, value: &Value) -> Result<RuleDef> {
    let table = value
        .as_table()
        .ok_or_else(|| HighlightError::Grammar(format!("scope '{scope}': token must be a table")))?;

    let pattern = table
        .get("pattern")
        .and_then(Value::as_str)
        .ok_or_else(|| HighlightError::Grammar(format!("scope '{scope}': token missing 'pattern'")))?;

    let capture = match table.get("capture") {
        Some(capture) => Some(capture.as_integer().filter(|n| *n >= 0).ok_or_else(|| {
            HighlightError::Grammar(format!("scope '{scope}': 'capture' must be a group index"))
        })? as usize),
        None => None,
    };

    Ok(RuleDef::Token {
        pattern: pattern.to_string(),
        capture,
    })
}

fn parse_range(scope: &str, value: &Value) -> Result<RangeDef> {
    let table = value
        .as_table()
        .ok_or_else(|| HighlightError::Grammar(format!("scope '{scope}': range must be a table")))?;

    let start = table.get("start").and_then(Value::as_str).ok_or_else(|| {
        HighlightError::Grammar(format!("scope '{scope}': range missing 'start'"))
    })?;
    let end = table.get("end").and_then(Value::as_str).ok_or_else(|| {
        HighlightError::Grammar(format!("scope '{scope}': range missing 'end'"))
    })?;

    let mut range = RangeDef::new(start, end);

    if let Some(skip) = table.get("skip") {
        let skip = skip.as_str().ok_or_else(|| {
            HighlightError::Grammar(format!("scope '{scope}': 'skip' must be a string"))
        })?;
        range = range.skip(skip);
    }

    if let Some(one_line) = table.get("one-line") {
        if one_line.as_bool().unwrap_or(false) {
            range = range.one_line();
        }
    }

    if let Some(children) = table.get("child") {
        let children = children.as_array().ok_or_else(|| {
            HighlightError::Grammar(format!("scope '{scope}': 'child' must be an array of tables"))
        })?;
        for child in children {
            range = range.child(parse_scope(child)?);
        }
    }

    Ok(range)
}

fn parse_style(scope: &str, value: &Value) -> Result<Style> {
    let table = value
        .as_table()
        .ok_or_else(|| HighlightError::Grammar(format!("scope '{scope}': style must be a table")))?;

    let mut style = Style::default();
    if let Some(fg) = table.get("fg") {
        style.fg = parse_color(scope, fg)?;
    }
    if let Some(bg) = table.get("bg") {
        style.bg = parse_color(scope, bg)?;
    }
    style.bold = table.get("bold").and_then(Value::as_bool).unwrap_or(false);
    style.italic = table.get("italic").and_then(Value::as_bool).unwrap_or(false);
    style.underline = table
        .get("underline")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Ok(style)
}

fn parse_color(scope: &str, value: &Value) -> Result<Color> {
    value
        .as_str()
        .and_then(Color::from_name)
        .ok_or_else(|| HighlightError::Grammar(format!("scope '{scope}': unknown color {value}")))
}

fn string_array(scope: &str, key: &str, value: &Value) -> Result<Vec<String>> {
    let array = value.as_array().ok_or_else(|| {
        HighlightError::Grammar(format!("scope '{scope}': '{key}' must be an array of strings"))
    })?;
    array
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                HighlightError::Grammar(format!("scope '{scope}': '{key}' must be an array of strings"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LexerState;

    const GRAMMAR: &str = r#"
[[scope]]
name = "comment"
style = { fg = "bright-black", italic = true }
tokens = ['//.*']

  [[scope.range]]
  start = '/\*'
  end = '\*/'

[[scope]]
name = "string"
style = { fg = "green" }

  [[scope.range]]
  start = '"'
  end = '"'
  skip = '\\.'
  one-line = true

    [[scope.range.child]]
    name = "escape"
    style = { fg = "bright-yellow" }
    tokens = ['\\.']

[[scope]]
name = "call"
style = { fg = "blue" }

  [[scope.token]]
  pattern = '\b([A-Za-z_]\w*)\('
  capture = 1

[[scope]]
name = "keyword"
style = { fg = "magenta", bold = true }
keywords = ["if", "else", "while"]
"#;

    #[test]
    fn test_parse_and_compile() {
        let table = RuleTable::compile(parse_grammar(GRAMMAR).unwrap()).unwrap();
        assert_eq!(table.scope_count(), 5);

        let comment = table.scope_named("comment").unwrap();
        let style = table.style(comment);
        assert_eq!(style.fg, Color::BrightBlack);
        assert!(style.italic);

        let keyword = table.scope_named("keyword").unwrap();
        assert!(table.style(keyword).bold);
    }

    #[test]
    fn test_loaded_grammar_highlights() {
        let table = RuleTable::compile(parse_grammar(GRAMMAR).unwrap()).unwrap();
        let result = table.highlight_line("if f(x) // done", &LexerState::new());

        let keyword = table.scope_named("keyword").unwrap();
        let call = table.scope_named("call").unwrap();
        let comment = table.scope_named("comment").unwrap();
        assert_eq!(result.spans.len(), 3);
        assert_eq!(result.spans[0].scope, keyword);
        assert_eq!(result.spans[1].scope, call);
        assert_eq!(result.spans[2].scope, comment);
    }

    #[test]
    fn test_declaration_order_is_file_order() {
        let table = RuleTable::compile(parse_grammar(GRAMMAR).unwrap()).unwrap();
        // "while(" matches both the call capture and the keyword set; the
        // call scope is declared first in the file and wins
        let result = table.highlight_line("while(1)", &LexerState::new());
        let call = table.scope_named("call").unwrap();
        assert_eq!(result.spans[0].scope, call);
    }

    #[test]
    fn test_malformed_toml_is_grammar_error() {
        let err = parse_grammar("not [ valid").unwrap_err();
        assert!(matches!(err, HighlightError::Grammar(_)));
    }

    #[test]
    fn test_missing_scope_array() {
        let err = parse_grammar("other = 1").unwrap_err();
        assert!(matches!(err, HighlightError::Grammar(_)));
    }

    #[test]
    fn test_scope_missing_name() {
        let err = parse_grammar("[[scope]]\nkeywords = [\"if\"]").unwrap_err();
        assert!(matches!(err, HighlightError::Grammar(_)));
    }

    #[test]
    fn test_unknown_color() {
        let err = parse_grammar("[[scope]]\nname = \"x\"\nstyle = { fg = \"mauve\" }")
            .unwrap_err();
        assert!(matches!(err, HighlightError::Grammar(_)));
    }

    #[test]
    fn test_bad_pattern_is_invalid_pattern_error() {
        let defs = parse_grammar("[[scope]]\nname = \"x\"\ntokens = ['(']").unwrap();
        let err = RuleTable::compile(defs).unwrap_err();
        assert!(matches!(err, HighlightError::InvalidPattern { .. }));
    }
}
