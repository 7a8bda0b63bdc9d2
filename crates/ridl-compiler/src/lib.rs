//! RIDL Compiler - Import resolution and validation for RIDL declarations
//!
//! This crate is the semantic half of the RIDL front end:
//! - Per-backend type namespaces mapping type names to type descriptors
//! - The preprocessed-declarations cache reader and writer
//! - The import resolver
//! - The semantic validator
//! - The load-and-validate orchestrator and the compile/preprocess drivers
//!
//! Code generation itself is out of scope; backends consume the validated
//! AST this crate hands back.

pub mod compiler;
pub mod error;
pub mod import_resolver;
pub mod namespace;
pub mod preprocessed;
pub mod semantic;

// Re-export the main entry points
pub use compiler::{
    compile_to_cpp, compile_to_java, load_and_validate, preprocess, Options, ValidatedDocument,
};
pub use error::{CompileError, Result};
pub use import_resolver::{ImportResolver, ResolvedImport};
pub use namespace::{
    CppType, CppTypeNamespace, JavaType, JavaTypeNamespace, TypeDescriptor, TypeKind,
    TypeNamespace,
};
pub use preprocessed::{parse_preprocessed_file, write_preprocessed};
pub use semantic::Validator;
