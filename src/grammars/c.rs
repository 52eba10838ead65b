//! C grammar definition

use crate::error::Result;
use crate::rules::{RangeDef, ScopeDef};
use crate::style::{Color, Style};
use crate::table::RuleTable;

const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "const", "continue", "default", "do", "else", "enum", "extern",
    "for", "goto", "if", "inline", "register", "restrict", "return", "sizeof", "static",
    "struct", "switch", "typedef", "union", "volatile", "while", "_Alignas", "_Alignof",
    "_Atomic", "_Generic", "_Noreturn", "_Static_assert", "_Thread_local",
];

const TYPENAMES: &[&str] = &[
    "char", "double", "float", "int", "long", "short", "signed", "unsigned", "void", "_Bool",
    "_Complex", "_Imaginary", "size_t", "ptrdiff_t", "intptr_t", "uintptr_t", "int8_t",
    "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t", "FILE",
];

const CONSTANTS: &[&str] = &["NULL", "EOF", "stdin", "stdout", "stderr", "true", "false"];

/// Create the C rule table
pub fn c() -> Result<RuleTable> {
    RuleTable::compile(vec![
        ScopeDef::new("comment", Style::fg(Color::BrightBlack).with_italic())
            .range(RangeDef::new(r"/\*", r"\*/"))
            .token(r"//.*"),
        ScopeDef::new("string", Style::fg(Color::Green))
            .range(RangeDef::new("\"", "\"").skip(r"\\.").one_line()),
        ScopeDef::new("char", Style::fg(Color::Green)).token(r"'(?:[^'\\]|\\.)'"),
        ScopeDef::new("preprocessor", Style::fg(Color::BrightMagenta)).token(r"^\s*#\s*\w+"),
        ScopeDef::new("call", Style::fg(Color::Blue)).token_capture(r"\b([A-Za-z_]\w*)\(", 1),
        ScopeDef::new("keyword", Style::fg(Color::Magenta).with_bold()).keywords(KEYWORDS),
        ScopeDef::new("type", Style::fg(Color::Yellow)).keywords(TYPENAMES),
        ScopeDef::new("constant", Style::fg(Color::BrightRed)).keywords(CONSTANTS),
        ScopeDef::new("number", Style::fg(Color::Cyan))
            .token(r"\b0[xX][0-9a-fA-F]+[uUlL]*\b")
            .token(r"\b\d+\.\d*(?:[eE][+-]?\d+)?[fFlL]?\b")
            .token(r"\b\d+[uUlL]*\b"),
    ])
}
