use serde::Serialize;
use thiserror::Error;

/// Failure while parsing one Swift source into an outline.
///
/// Serializable so that CLI JSON consumers get structured error
/// information instead of a bare string.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ParseError {
    /// Brace depth never returned to balance by end of input.
    /// Carries the total line count of the scanned source.
    #[error("Line {line}: Mismatched braces in the Swift code")]
    Structural { line: usize },

    /// Any other failure raised while processing a specific line.
    /// Carries the 1-based line number being processed when it occurred.
    #[error("Line {line}: {message}")]
    Unexpected { line: usize, message: String },
}

impl ParseError {
    /// Create a Structural error at the given line.
    pub fn structural(line: usize) -> Self {
        Self::Structural { line }
    }

    /// Create an Unexpected error at the given line.
    pub fn unexpected(line: usize, message: impl Into<String>) -> Self {
        Self::Unexpected {
            line,
            message: message.into(),
        }
    }

    /// The 1-based line number the parser had reached when it failed.
    pub fn line(&self) -> usize {
        match self {
            Self::Structural { line } | Self::Unexpected { line, .. } => *line,
        }
    }
}
