//! Error handling for texpand
//!
//! This module provides a unified error type and result type for snippet
//! table loading and Unicode conversion.

use std::fmt;

/// Snippet/conversion error type
#[derive(Debug, Clone)]
pub enum SnippetError {
    /// Parse error - a snippet table could not be parsed
    ParseError {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// Invalid input
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for SnippetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetError::ParseError {
                message,
                line,
                column,
            } => {
                if let (Some(l), Some(c)) = (line, column) {
                    write!(f, "Parse error at line {}, column {}: {}", l, c, message)
                } else if let Some(l) = line {
                    write!(f, "Parse error at line {}: {}", l, message)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            SnippetError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            SnippetError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            SnippetError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for SnippetError {}

impl From<std::io::Error> for SnippetError {
    fn from(err: std::io::Error) -> Self {
        SnippetError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SnippetError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json reports line 0 for errors that are not tied to a position
        if err.line() == 0 {
            SnippetError::parse(err.to_string())
        } else {
            SnippetError::parse_at(err.to_string(), err.line(), err.column())
        }
    }
}

/// Result type for snippet operations
pub type SnippetResult<T> = Result<T, SnippetError>;

// Convenience constructors for errors
impl SnippetError {
    pub fn parse(message: impl Into<String>) -> Self {
        SnippetError::ParseError {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn parse_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        SnippetError::ParseError {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        SnippetError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        SnippetError::InternalError {
            message: message.into(),
        }
    }
}
