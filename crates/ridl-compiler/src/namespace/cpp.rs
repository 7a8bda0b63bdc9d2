//! C++-flavor type namespace
//!
//! The native backend requires a package on interface declarations, tracks
//! the headers each type pulls in, and honors the `from "header"` metadata
//! on native-backed parcelables.

use super::{
    file_spellings, nominal_spellings, parse_container_spelling, Provenance, Registry,
    TypeDescriptor, TypeKind, TypeNamespace,
};
use ridl_core::ast::{Interface, NativeParcelable, Parcelable, QualifiedName};
use std::collections::BTreeSet;

/// A type as the C++ backend sees it
#[derive(Debug, Clone, PartialEq)]
pub struct CppType {
    qualified: String,
    cpp_name: String,
    kind: TypeKind,
    headers: BTreeSet<String>,
}

impl CppType {
    fn new(
        qualified: impl Into<String>,
        cpp_name: impl Into<String>,
        kind: TypeKind,
        headers: BTreeSet<String>,
    ) -> Self {
        CppType {
            qualified: qualified.into(),
            cpp_name: cpp_name.into(),
            kind,
            headers,
        }
    }

    /// The C++ spelling of this type (`::p::Bar`, `int32_t`)
    pub fn cpp_name(&self) -> &str {
        &self.cpp_name
    }

    /// Headers that must be included to use this type
    pub fn headers(&self) -> &BTreeSet<String> {
        &self.headers
    }
}

impl TypeDescriptor for CppType {
    fn qualified_name(&self) -> &str {
        &self.qualified
    }

    fn kind(&self) -> TypeKind {
        self.kind
    }

    fn instantiable_name(&self) -> &str {
        &self.cpp_name
    }
}

/// Dotted name to C++ scope resolution (`p.Outer.Inner` -> `::p::Outer::Inner`)
fn scoped_name(name: &QualifiedName) -> String {
    format!("::{}", name.qualified().replace('.', "::"))
}

/// Type namespace for the native C++ binding flavor
pub struct CppTypeNamespace {
    registry: Registry<CppType>,
    initialized: bool,
}

impl CppTypeNamespace {
    /// Create an empty namespace; call `init()` before lookups
    pub fn new() -> Self {
        CppTypeNamespace {
            registry: Registry::new(),
            initialized: false,
        }
    }

    /// Concrete-descriptor lookup for backend code generators
    pub fn lookup(&self, name: &str) -> Option<&CppType> {
        self.registry.find(name).map(|rc| rc.as_ref())
    }

    fn seed(&mut self, name: &str, cpp_name: &str, headers: &[&str]) {
        let headers = headers.iter().map(|h| h.to_string()).collect();
        let desc = CppType::new(name, cpp_name, TypeKind::BuiltIn, headers);
        self.registry
            .register(desc, vec![name.to_string()], Provenance::BuiltIn);
    }
}

impl Default for CppTypeNamespace {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeNamespace for CppTypeNamespace {
    fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.seed("void", "void", &[]);
        self.seed("boolean", "bool", &[]);
        self.seed("byte", "int8_t", &["cstdint"]);
        self.seed("char", "char16_t", &[]);
        self.seed("int", "int32_t", &["cstdint"]);
        self.seed("long", "int64_t", &["cstdint"]);
        self.seed("float", "float", &[]);
        self.seed("double", "double", &[]);
        self.seed("String", "::std::string", &["string"]);
        self.seed("CharSequence", "::std::string", &["string"]);
    }

    fn find(&self, name: &str) -> Option<&dyn TypeDescriptor> {
        self.registry.find(name).map(|rc| rc.as_ref() as &dyn TypeDescriptor)
    }

    fn add_parcelable_type(&mut self, parcelable: &Parcelable, origin: &str) -> bool {
        log::debug!("cpp: registering parcelable {} from {}", parcelable.name, origin);
        let desc = CppType::new(
            parcelable.name.qualified(),
            scoped_name(&parcelable.name),
            TypeKind::Parcelable,
            BTreeSet::new(),
        );
        self.registry
            .register(desc, file_spellings(&parcelable.name), Provenance::File)
    }

    fn add_interface_type(&mut self, interface: &Interface, origin: &str) -> bool {
        log::debug!("cpp: registering interface {} from {}", interface.name, origin);
        let desc = CppType::new(
            interface.name.qualified(),
            scoped_name(&interface.name),
            TypeKind::Interface,
            BTreeSet::new(),
        );
        self.registry
            .register(desc, file_spellings(&interface.name), Provenance::File)
    }

    fn add_native_parcelable_type(&mut self, parcelable: &NativeParcelable, origin: &str) -> bool {
        log::debug!(
            "cpp: registering native parcelable {} from {} with header {}",
            parcelable.name,
            origin,
            parcelable.header
        );
        let mut headers = BTreeSet::new();
        headers.insert(parcelable.header.clone());
        let desc = CppType::new(
            parcelable.name.qualified(),
            scoped_name(&parcelable.name),
            TypeKind::Parcelable,
            headers,
        );
        self.registry
            .register(desc, file_spellings(&parcelable.name), Provenance::File)
    }

    fn add_nominal_type(&mut self, kind: TypeKind, name: &QualifiedName) -> bool {
        if !matches!(kind, TypeKind::Parcelable | TypeKind::Interface) {
            return false;
        }
        let desc = CppType::new(name.qualified(), scoped_name(name), kind, BTreeSet::new());
        self.registry
            .register(desc, nominal_spellings(name), Provenance::Preprocessed)
    }

    fn maybe_add_container_type(&mut self, spelling: &str) -> bool {
        if self.registry.find(spelling).is_some() {
            return true;
        }
        let container = match parse_container_spelling(spelling) {
            Some(c) => c,
            None => return false,
        };
        let (template, own_header) = match (container.base, container.args.len()) {
            ("List", 1) => ("::std::vector", "vector"),
            ("Map", 2) => ("::std::map", "map"),
            _ => return false,
        };
        let mut qualified_args = Vec::new();
        let mut cpp_args = Vec::new();
        let mut headers: BTreeSet<String> = BTreeSet::new();
        headers.insert(own_header.to_string());
        for arg in &container.args {
            match self.registry.find(arg) {
                Some(element) => {
                    qualified_args.push(element.qualified_name().to_string());
                    cpp_args.push(element.cpp_name().to_string());
                    headers.extend(element.headers().iter().cloned());
                }
                None => return false,
            }
        }
        let canonical = format!("{}<{}>", container.base, qualified_args.join(","));
        let cpp_name = format!("{}<{}>", template, cpp_args.join(","));
        let desc = CppType::new(&canonical, &cpp_name, TypeKind::Container, headers);
        let mut spellings = vec![spelling.to_string()];
        if !spellings.contains(&canonical) {
            spellings.push(canonical);
        }
        self.registry.register(desc, spellings, Provenance::File)
    }

    fn requires_package_on_interface(&self) -> bool {
        true
    }
}
