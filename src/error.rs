//! Error types for the highlighting engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting engine error types
#[derive(Error, Debug)]
pub enum HighlightError {
    /// A rule pattern failed to compile. The whole grammar compile fails;
    /// there are no partial rule tables.
    #[error("invalid pattern {pattern:?} in scope '{scope}': {source}")]
    InvalidPattern {
        scope: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("grammar file: {0}")]
    Grammar(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
