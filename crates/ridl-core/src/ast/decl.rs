//! Declaration AST definitions
//!
//! A RIDL file declares exactly one interface or parcelable. Declarations
//! are produced once by the parser and are immutable after validation.

use super::name::QualifiedName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level declaration parsed from one RIDL file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    /// An interface with callable methods
    Interface(Interface),

    /// A data-only parcelable type
    Parcelable(Parcelable),

    /// A parcelable backed by a native header rather than declared fields
    NativeParcelable(NativeParcelable),
}

impl Declaration {
    /// The declared qualified name
    pub fn name(&self) -> &QualifiedName {
        match self {
            Declaration::Interface(i) => &i.name,
            Declaration::Parcelable(p) => &p.name,
            Declaration::NativeParcelable(p) => &p.name,
        }
    }

    /// Whether this declaration is an interface
    pub fn is_interface(&self) -> bool {
        matches!(self, Declaration::Interface(_))
    }

    /// The declaration keyword as it appears in source and in
    /// preprocessed-declaration files
    pub fn kind_keyword(&self) -> &'static str {
        match self {
            Declaration::Interface(_) => "interface",
            Declaration::Parcelable(_) | Declaration::NativeParcelable(_) => "parcelable",
        }
    }
}

/// An interface declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// Qualified interface name
    pub name: QualifiedName,

    /// Interface-level oneway flag, inherited by every method
    pub oneway: bool,

    /// Methods in declaration order
    pub methods: Vec<Method>,
}

/// A parcelable declaration, possibly outer-qualified (`Outer.Inner`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcelable {
    /// Qualified parcelable name
    pub name: QualifiedName,
}

/// A parcelable backed by a native header (`parcelable Bar from "path";`)
///
/// The header path is opaque data carried through to native-backend type
/// descriptors; non-native backends ignore it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeParcelable {
    /// Qualified parcelable name
    pub name: QualifiedName,

    /// Header path exactly as written in the declaration
    pub header: String,
}

/// A method declaration inside an interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Method name
    pub name: String,

    /// Method-level oneway flag, independent of the interface-level flag
    pub oneway: bool,

    /// Return type reference
    pub return_type: TypeRef,

    /// Parameters in declaration order
    pub params: Vec<Param>,

    /// Source line of the method, for diagnostics
    pub line: usize,
}

impl Method {
    /// Whether this method is oneway, directly or through its interface
    pub fn is_oneway(&self, interface_oneway: bool) -> bool {
        self.oneway || interface_oneway
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Marshaling direction, `in` when omitted in source
    pub direction: Direction,

    /// Parameter type reference
    pub ty: TypeRef,

    /// Parameter name
    pub name: String,
}

/// Parameter marshaling direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
    Inout,
}

impl Direction {
    /// Whether data flows back to the caller
    pub fn is_outgoing(&self) -> bool {
        matches!(self, Direction::Out | Direction::Inout)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Inout => "inout",
        };
        write!(f, "{s}")
    }
}

/// A reference to a type by name
///
/// Type references are name-keyed lookups into a type namespace, never
/// owning pointers to other declarations. The name may be a generic
/// container spelling such as `List<Foo>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Type name as written, generics included
    pub name: String,

    /// Whether this is an array of the named type
    pub is_array: bool,
}

impl TypeRef {
    /// Create a non-array type reference
    pub fn new(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            is_array: false,
        }
    }

    /// Create an array type reference
    pub fn array(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            is_array: true,
        }
    }

    /// Whether this references the void pseudo-type
    pub fn is_void(&self) -> bool {
        !self.is_array && self.name == "void"
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}
