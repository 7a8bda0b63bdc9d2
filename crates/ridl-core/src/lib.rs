//! RIDL Core - Core types for the RIDL interface compiler
//!
//! This crate provides the fundamental types used across the RIDL toolchain:
//! - AST (Abstract Syntax Tree) definitions for parsed declaration files
//! - Qualified name handling
//! - The file-system collaborator trait and its in-memory test double
//! - Error types

pub mod ast;
pub mod error;
pub mod io;

// Re-export commonly used types
pub use ast::{
    Declaration, Direction, Document, Import, Interface, Method, NativeParcelable, Param,
    Parcelable, QualifiedName, TypeRef,
};
pub use error::CoreError;
pub use io::{DiskIo, FileIo, IoError, MemoryIo};
