//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character the lexer does not recognize
    #[error("Unrecognized character at line {line}")]
    UnexpectedCharacter { line: usize },

    /// A token that does not fit the grammar at this point
    #[error("Unexpected token '{found}' at line {line}, expected {expected}")]
    UnexpectedToken {
        line: usize,
        found: String,
        expected: String,
    },

    /// The file ended mid-declaration
    #[error("Unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: String },

    /// A dotted name with an empty or non-identifier segment
    #[error("Invalid name '{name}' at line {line}")]
    InvalidName { line: usize, name: String },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
