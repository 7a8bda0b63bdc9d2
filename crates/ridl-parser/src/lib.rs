//! RIDL Parser - Declaration file parser for the RIDL compiler
//!
//! This crate turns one RIDL file's text into a [`ridl_core::Document`]:
//! the optional package, the imports, and the file's single interface or
//! parcelable declaration. Parsing is a pure function of the text; it has
//! no cross-file knowledge.

pub mod error;
pub mod lexer;
pub mod parser;

// Re-export main parser entry points
pub use error::{ParseError, Result};
pub use lexer::{tokenize, Token};
pub use parser::parse_document;
