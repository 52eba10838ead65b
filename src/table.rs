//! Compiled rule tables
//!
//! A rule table is the compiled form of a grammar: interned attribute
//! scopes, top-level rules in precedence order, and every delimited range
//! the grammar declares (including ranges nested inside other ranges).
//! Tables are immutable after compilation and safely shared by reference
//! across any number of highlighting sessions.

use crate::error::{HighlightError, Result};
use crate::matcher::{keyword_pattern, Pattern};
use crate::rules::{
    CompiledRange, CompiledRule, RangeDef, RangeId, RuleDef, RuleKind, ScopeDef, ScopeId,
};
use crate::style::Style;

/// An interned attribute scope
#[derive(Debug)]
struct Scope {
    name: String,
    style: Style,
}

/// A compiled, immutable grammar
#[derive(Debug)]
pub struct RuleTable {
    scopes: Vec<Scope>,
    rules: Vec<CompiledRule>,
    ranges: Vec<CompiledRange>,
}

impl RuleTable {
    /// Compile an ordered list of scope definitions into a rule table.
    ///
    /// Declaration order defines precedence. Fails with
    /// [`HighlightError::InvalidPattern`] if any pattern does not compile;
    /// there are no partial tables.
    pub fn compile(defs: Vec<ScopeDef>) -> Result<RuleTable> {
        let mut scopes = Vec::new();
        let mut ranges = Vec::new();
        let mut rules = Vec::new();

        for def in &defs {
            let scope = intern_scope(&mut scopes, &def.name, def.style);
            compile_rules(scope, &def.name, &def.rules, &mut scopes, &mut ranges, &mut rules)?;
        }

        Ok(RuleTable {
            scopes,
            rules,
            ranges,
        })
    }

    /// Number of interned scopes
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Name of a scope
    pub fn scope_name(&self, id: ScopeId) -> &str {
        &self.scopes[id.0 as usize].name
    }

    /// Display style of a scope
    pub fn style(&self, id: ScopeId) -> Style {
        self.scopes[id.0 as usize].style
    }

    /// Look up a scope by name
    pub fn scope_named(&self, name: &str) -> Option<ScopeId> {
        self.scopes
            .iter()
            .position(|s| s.name == name)
            .map(|i| ScopeId(i as u16))
    }

    /// Top-level rules in precedence order
    pub(crate) fn top_rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// A compiled range by id
    pub(crate) fn range(&self, id: RangeId) -> &CompiledRange {
        &self.ranges[id.0 as usize]
    }
}

/// Intern a scope name, reusing the existing id on repeat declarations.
/// The first declaration's style wins.
fn intern_scope(scopes: &mut Vec<Scope>, name: &str, style: Style) -> ScopeId {
    if let Some(i) = scopes.iter().position(|s| s.name == name) {
        return ScopeId(i as u16);
    }
    scopes.push(Scope {
        name: name.to_string(),
        style,
    });
    ScopeId((scopes.len() - 1) as u16)
}

/// Compile one pattern, wrapping failures with scope and pattern text
fn compile_pattern(scope_name: &str, pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|source| HighlightError::InvalidPattern {
        scope: scope_name.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Compile a scope's rules into `out`, appending any ranges to `ranges`
fn compile_rules(
    scope: ScopeId,
    scope_name: &str,
    defs: &[RuleDef],
    scopes: &mut Vec<Scope>,
    ranges: &mut Vec<CompiledRange>,
    out: &mut Vec<CompiledRule>,
) -> Result<()> {
    for def in defs {
        match def {
            RuleDef::Keywords(words) => {
                let pattern = compile_pattern(scope_name, &keyword_pattern(words))?;
                out.push(CompiledRule {
                    scope,
                    kind: RuleKind::Keywords(pattern),
                });
            }
            RuleDef::Token { pattern, capture } => {
                let pattern = compile_pattern(scope_name, pattern)?;
                out.push(CompiledRule {
                    scope,
                    kind: RuleKind::Token {
                        pattern,
                        capture: *capture,
                    },
                });
            }
            RuleDef::Range(range) => {
                let id = compile_range(scope, scope_name, range, scopes, ranges)?;
                out.push(CompiledRule {
                    scope,
                    kind: RuleKind::RangeStart(id),
                });
            }
        }
    }
    Ok(())
}

/// Compile a range and its child scopes, returning the new range's id
fn compile_range(
    scope: ScopeId,
    scope_name: &str,
    def: &RangeDef,
    scopes: &mut Vec<Scope>,
    ranges: &mut Vec<CompiledRange>,
) -> Result<RangeId> {
    let start = compile_pattern(scope_name, &def.start)?;
    let end = compile_pattern(scope_name, &def.end)?;
    let skip = match &def.skip {
        Some(pattern) => Some(compile_pattern(scope_name, pattern)?),
        None => None,
    };

    let mut rules = Vec::new();
    for child in &def.children {
        let child_scope = intern_scope(scopes, &child.name, child.style);
        compile_rules(child_scope, &child.name, &child.rules, scopes, ranges, &mut rules)?;
    }

    ranges.push(CompiledRange {
        scope,
        start,
        end,
        skip,
        one_line: def.one_line,
        rules,
    });
    Ok(RangeId((ranges.len() - 1) as u16))
}
