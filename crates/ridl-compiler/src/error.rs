//! Compiler error types

use ridl_core::io::IoError;
use ridl_parser::ParseError;
use thiserror::Error;

/// Compiler error
///
/// Every phase is all-or-nothing for its compilation unit: a failure at
/// any phase short-circuits the rest and no partial AST escapes.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Malformed declaration text
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// File-system collaborator failure
    #[error(transparent)]
    Io(#[from] IoError),

    /// An import or type name could not be resolved
    #[error("Unresolved: {0}")]
    Resolution(String),

    /// A semantic rule was violated
    #[error("Invalid declaration: {0}")]
    Validation(String),

    /// A type was re-registered with an incompatible definition
    #[error("Conflicting type definition: {0}")]
    Conflict(String),
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
