//! Parsed document container

use super::decl::Declaration;
use super::import::Import;
use serde::{Deserialize, Serialize};

/// One parsed RIDL file: its imports and its single declaration
///
/// The declared package is carried on the declaration's qualified name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Logical path the file was parsed from
    pub path: String,

    /// Imports in declaration order
    pub imports: Vec<Import>,

    /// The file's single declaration
    pub decl: Declaration,
}

impl Document {
    /// Create a document
    pub fn new(path: impl Into<String>, imports: Vec<Import>, decl: Declaration) -> Self {
        Document {
            path: path.into(),
            imports,
            decl,
        }
    }
}
