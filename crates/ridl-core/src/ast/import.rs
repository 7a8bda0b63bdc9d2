//! Import AST definitions

use super::name::QualifiedName;
use serde::{Deserialize, Serialize};

/// An `import a.b.C;` line referencing another declaration
///
/// Imports are resolved lazily by the compiler's import resolver; the AST
/// only records the referenced name and where it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    /// The imported qualified name
    pub name: QualifiedName,

    /// Source line of the import, for diagnostics
    pub line: usize,
}

impl Import {
    /// Create an import
    pub fn new(name: QualifiedName, line: usize) -> Self {
        Import { name, line }
    }
}
