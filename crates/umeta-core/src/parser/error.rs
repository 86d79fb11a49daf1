use thiserror::Error;

use crate::builder::BuildError;

/// Fatal parse-session errors.
///
/// Malformed declarations and unterminated entities are not errors; they
/// are reported as failure records in the parse outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: {source}")]
    ProtocolViolation {
        line: usize,
        #[source]
        source: BuildError,
    },
}

impl ParseError {
    /// Line the session was on when the error occurred.
    pub fn line(&self) -> usize {
        match self {
            Self::ProtocolViolation { line, .. } => *line,
        }
    }
}
