//! JavaScript grammar definition

use crate::error::Result;
use crate::rules::{RangeDef, ScopeDef};
use crate::style::{Color, Style};
use crate::table::RuleTable;

/// Reserved words and declaration keywords
const KEYWORDS: &[&str] = &[
    "abstract", "arguments", "await", "class", "const", "debugger", "delete", "enum", "eval",
    "export", "extends", "final", "finally", "function", "implements", "import", "in",
    "instanceof", "interface", "let", "native", "new", "package", "private", "protected",
    "public", "static", "super", "synchronized", "transient", "typeof", "var", "volatile",
];

/// Control-flow keywords, styled separately from declarations
const CONTROL_FLOW: &[&str] = &[
    "break", "case", "catch", "continue", "default", "do", "else", "for", "goto", "if",
    "return", "switch", "throw", "throws", "try", "while", "yield",
];

const TYPENAMES: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "long", "int", "short", "unsigned", "void",
];

/// Well-known globals, object members, and DOM names
const BUILTINS: &[&str] = &[
    "Array", "Date", "hasOwnProperty", "Infinity", "isFinite", "isNaN", "isPrototypeOf",
    "length", "Math", "NaN", "name", "Number", "Object", "prototype", "String", "toString",
    "undefined", "valueOf", "onblur", "onclick", "onerror", "onfocus", "onkeydown",
    "onkeypress", "onkeyup", "onmouseover", "onload", "onmouseup", "onmousedown", "onsubmit",
    "alert", "all", "anchor", "anchors", "area", "assign", "blur", "button", "checkbox",
    "clearInterval", "clearTimeout", "clientInformation", "close", "closed", "confirm",
    "constructor", "crypto", "decodeURI", "decodeURIComponent", "defaultStatus", "document",
    "element", "elements", "embed", "embeds", "encodeURI", "encodeURIComponent", "escape",
    "event", "fileUpload", "focus", "form", "forms", "frame", "innerHeight", "innerWidth",
    "layer", "layers", "link", "location", "mimeTypes", "navigate", "navigator", "frames",
    "frameRate", "hidden", "history", "image", "images", "offscreenBuffering", "open",
    "opener", "option", "outerHeight", "outerWidth", "packages", "pageXOffset", "pageYOffset",
    "parent", "parseFloat", "parseInt", "password", "pkcs11", "plugin", "prompt",
    "propertyIsEnum", "radio", "reset", "screenX", "screenY", "scroll", "secure", "select",
    "self", "setInterval", "setTimeout", "status", "submit", "taint", "text", "textarea",
    "top", "unescape", "untaint", "window", "true", "false", "this", "null",
];

/// Create the JavaScript rule table
pub fn javascript() -> Result<RuleTable> {
    let string_escape =
        ScopeDef::new("escape", Style::fg(Color::BrightYellow)).token(r"\\.");

    RuleTable::compile(vec![
        ScopeDef::new("comment", Style::fg(Color::BrightBlack).with_italic())
            .range(RangeDef::new(r"/\*", r"\*/"))
            .token(r"//.*"),
        ScopeDef::new("string", Style::fg(Color::Green))
            .range(
                RangeDef::new("\"", "\"")
                    .one_line()
                    .child(string_escape.clone()),
            )
            .range(RangeDef::new("'", "'").one_line().child(string_escape)),
        ScopeDef::new("call", Style::fg(Color::Blue))
            .token_capture(r"\b([A-Za-z_$][A-Za-z0-9_$]*)\(", 1),
        ScopeDef::new("keyword", Style::fg(Color::Magenta).with_bold()).keywords(KEYWORDS),
        ScopeDef::new("control", Style::fg(Color::Magenta)).keywords(CONTROL_FLOW),
        ScopeDef::new("type", Style::fg(Color::Yellow)).keywords(TYPENAMES),
        ScopeDef::new("builtin", Style::fg(Color::BrightRed)).keywords(BUILTINS),
        ScopeDef::new("number", Style::fg(Color::Cyan))
            .token(r"\b0[xX][0-9a-fA-F]+\b")
            .token(r"\b\d+\.\d*(?:[eE][+-]?\d+)?\b")
            .token(r"\b\d+(?:[eE][+-]?\d+)?\b"),
    ])
}
