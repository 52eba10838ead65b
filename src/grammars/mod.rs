//! Built-in grammar definitions
//!
//! Ready-made rule tables for common languages, expressed with the same
//! scope/rule vocabulary host-supplied grammars use.

mod c;
mod javascript;

pub use c::c;
pub use javascript::javascript;

use crate::error::Result;
use crate::table::RuleTable;

/// Compile all built-in grammars as (name, table) pairs
pub fn all() -> Result<Vec<(&'static str, RuleTable)>> {
    Ok(vec![("C", c()?), ("JavaScript", javascript()?)])
}
