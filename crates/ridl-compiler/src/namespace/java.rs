//! Java-flavor type namespace
//!
//! The Java backend accepts packageless declarations and ignores native
//! header metadata. Container types map onto `java.util` generics.

use super::{
    file_spellings, nominal_spellings, parse_container_spelling, Provenance, Registry,
    TypeDescriptor, TypeKind, TypeNamespace,
};
use ridl_core::ast::{Interface, NativeParcelable, Parcelable, QualifiedName};

/// A type as the Java backend sees it
#[derive(Debug, Clone, PartialEq)]
pub struct JavaType {
    qualified: String,
    instantiable: String,
    kind: TypeKind,
}

impl JavaType {
    fn new(qualified: impl Into<String>, instantiable: impl Into<String>, kind: TypeKind) -> Self {
        JavaType {
            qualified: qualified.into(),
            instantiable: instantiable.into(),
            kind,
        }
    }
}

impl TypeDescriptor for JavaType {
    fn qualified_name(&self) -> &str {
        &self.qualified
    }

    fn kind(&self) -> TypeKind {
        self.kind
    }

    fn instantiable_name(&self) -> &str {
        &self.instantiable
    }
}

/// Type namespace for the Java binding flavor
pub struct JavaTypeNamespace {
    registry: Registry<JavaType>,
    initialized: bool,
}

impl JavaTypeNamespace {
    /// Create an empty namespace; call `init()` before lookups
    pub fn new() -> Self {
        JavaTypeNamespace {
            registry: Registry::new(),
            initialized: false,
        }
    }

    /// Concrete-descriptor lookup for backend code generators
    pub fn lookup(&self, name: &str) -> Option<&JavaType> {
        self.registry.find(name).map(|rc| rc.as_ref())
    }

    fn seed(&mut self, name: &str, instantiable: &str) {
        let desc = JavaType::new(name, instantiable, TypeKind::BuiltIn);
        self.registry
            .register(desc, vec![name.to_string()], Provenance::BuiltIn);
    }
}

impl Default for JavaTypeNamespace {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeNamespace for JavaTypeNamespace {
    fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        for primitive in ["void", "boolean", "byte", "char", "int", "long", "float", "double"] {
            self.seed(primitive, primitive);
        }
        self.seed("String", "java.lang.String");
        self.seed("CharSequence", "java.lang.CharSequence");
    }

    fn find(&self, name: &str) -> Option<&dyn TypeDescriptor> {
        self.registry.find(name).map(|rc| rc.as_ref() as &dyn TypeDescriptor)
    }

    fn add_parcelable_type(&mut self, parcelable: &Parcelable, origin: &str) -> bool {
        log::debug!("java: registering parcelable {} from {}", parcelable.name, origin);
        let qualified = parcelable.name.qualified();
        let desc = JavaType::new(&qualified, &qualified, TypeKind::Parcelable);
        self.registry
            .register(desc, file_spellings(&parcelable.name), Provenance::File)
    }

    fn add_interface_type(&mut self, interface: &Interface, origin: &str) -> bool {
        log::debug!("java: registering interface {} from {}", interface.name, origin);
        let qualified = interface.name.qualified();
        let desc = JavaType::new(&qualified, &qualified, TypeKind::Interface);
        self.registry
            .register(desc, file_spellings(&interface.name), Provenance::File)
    }

    fn add_native_parcelable_type(&mut self, parcelable: &NativeParcelable, origin: &str) -> bool {
        // The header path is native-backend metadata; Java sees a plain
        // parcelable with an instantiable dotted name.
        log::debug!(
            "java: registering native parcelable {} from {} (header ignored)",
            parcelable.name,
            origin
        );
        let qualified = parcelable.name.qualified();
        let desc = JavaType::new(&qualified, &qualified, TypeKind::Parcelable);
        self.registry
            .register(desc, file_spellings(&parcelable.name), Provenance::File)
    }

    fn add_nominal_type(&mut self, kind: TypeKind, name: &QualifiedName) -> bool {
        if !matches!(kind, TypeKind::Parcelable | TypeKind::Interface) {
            return false;
        }
        let qualified = name.qualified();
        let desc = JavaType::new(&qualified, &qualified, kind);
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
        let package = match (container.base, container.args.len()) {
            ("List", 1) => "java.util.List",
            ("Map", 2) => "java.util.Map",
            _ => return false,
        };
        let mut qualified_args = Vec::new();
        let mut instantiable_args = Vec::new();
        for arg in &container.args {
            match self.registry.find(arg) {
                Some(element) => {
                    qualified_args.push(element.qualified_name().to_string());
                    instantiable_args.push(element.instantiable_name().to_string());
                }
                None => return false,
            }
        }
        let canonical = format!("{}<{}>", container.base, qualified_args.join(","));
        let instantiable = format!("{}<{}>", package, instantiable_args.join(","));
        let desc = JavaType::new(&canonical, &instantiable, TypeKind::Container);
        let mut spellings = vec![spelling.to_string()];
        if !spellings.contains(&canonical) {
            spellings.push(canonical);
        }
        self.registry.register(desc, spellings, Provenance::File)
    }

    fn requires_package_on_interface(&self) -> bool {
        false
    }
}
