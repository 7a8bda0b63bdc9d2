//! Abstract Syntax Tree (AST) definitions for RIDL
//!
//! This module contains the AST node definitions for:
//! - Qualified names
//! - Declarations (interfaces, parcelables, native-backed parcelables)
//! - Methods, parameters and type references
//! - Imports and parsed documents

pub mod decl;
pub mod document;
pub mod import;
pub mod name;

pub use decl::{
    Declaration, Direction, Interface, Method, NativeParcelable, Param, Parcelable, TypeRef,
};
pub use document::Document;
pub use import::Import;
pub use name::QualifiedName;
