//! Per-backend type namespaces
//!
//! A type namespace is the single source of truth, per backend, for "is
//! this name a known type, and what does it look like in this backend's
//! emitted code". Namespaces are created once per compilation backend,
//! seeded with built-ins by `init()`, then grown monotonically as imports
//! and preprocessed entries are discovered. Nothing is ever removed;
//! descriptors keep their identity once a real declaration backs them.

pub mod cpp;
pub mod java;

pub use cpp::{CppType, CppTypeNamespace};
pub use java::{JavaType, JavaTypeNamespace};

use ridl_core::ast::{Declaration, Interface, NativeParcelable, Parcelable, QualifiedName};
use std::collections::HashMap;
use std::rc::Rc;

/// What kind of entity a type name denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Seeded primitive or pseudo type (`int`, `void`, `String`, ...)
    BuiltIn,
    /// A parcelable, declared or known nominally
    Parcelable,
    /// An interface, declared or known nominally
    Interface,
    /// A synthesized generic container (`List<Foo>`)
    Container,
}

/// Backend-specific type descriptor, seen through its common surface
pub trait TypeDescriptor {
    /// Canonical fully-qualified dotted name
    fn qualified_name(&self) -> &str;

    /// Entity kind
    fn kind(&self) -> TypeKind;

    /// The spelling the backend instantiates this type with
    fn instantiable_name(&self) -> &str;
}

/// Where a registration came from, used only for short-name precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Provenance {
    /// Nominal entry from a preprocessed-declarations file
    Preprocessed,
    /// A declaration parsed from a real file
    File,
    /// Seeded by `init()`
    BuiltIn,
}

/// Per-backend type registry
pub trait TypeNamespace {
    /// Seed built-in types. Idempotent; must be called before any lookup.
    fn init(&mut self);

    /// Exact-match lookup over every registered spelling
    fn has_type(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Look up a descriptor; short spellings shadowed by an ambiguity
    /// resolve to nothing while the fully-qualified spellings keep working
    fn find(&self, name: &str) -> Option<&dyn TypeDescriptor>;

    /// Register a parcelable parsed from a file
    fn add_parcelable_type(&mut self, parcelable: &Parcelable, origin: &str) -> bool;

    /// Register an interface parsed from a file
    fn add_interface_type(&mut self, interface: &Interface, origin: &str) -> bool;

    /// Register a native-backed parcelable parsed from a file; backends
    /// without native metadata treat this as a plain parcelable
    fn add_native_parcelable_type(&mut self, parcelable: &NativeParcelable, origin: &str) -> bool;

    /// Register a nominal-only entry from a preprocessed-declarations file
    fn add_nominal_type(&mut self, kind: TypeKind, name: &QualifiedName) -> bool;

    /// Synthesize a generic container descriptor (`List<Foo>`) if its
    /// element types are already known
    fn maybe_add_container_type(&mut self, spelling: &str) -> bool;

    /// Backend quirk: whether interfaces must declare a package
    fn requires_package_on_interface(&self) -> bool;

    /// Register whichever declaration variant this is
    fn add_declaration(&mut self, decl: &Declaration, origin: &str) -> bool {
        match decl {
            Declaration::Interface(i) => self.add_interface_type(i, origin),
            Declaration::Parcelable(p) => self.add_parcelable_type(p, origin),
            Declaration::NativeParcelable(p) => self.add_native_parcelable_type(p, origin),
        }
    }
}

/// A name binding inside a registry
enum Binding<T> {
    /// The spelling denotes exactly one entity
    Unique { desc: Rc<T>, provenance: Provenance },
    /// Two file-backed entities share this spelling; lookups through it
    /// fail while their qualified spellings keep working
    Ambiguous,
}

/// Spelling-to-descriptor map shared by the backend namespaces
///
/// All mutation is additive. Bindings are only re-pointed by the
/// import-over-preprocessed precedence rule, which also lets a file-backed
/// definition refine the descriptor behind an earlier nominal entry.
pub(crate) struct Registry<T> {
    entries: HashMap<String, Binding<T>>,
}

impl<T: TypeDescriptor + PartialEq> Registry<T> {
    pub fn new() -> Self {
        Registry {
            entries: HashMap::new(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Rc<T>> {
        match self.entries.get(name) {
            Some(Binding::Unique { desc, .. }) => Some(desc),
            _ => None,
        }
    }

    /// Register a descriptor under each of its spellings.
    ///
    /// Returns false on a conflicting re-registration: the same qualified
    /// name with a different kind or, at the same provenance level, a
    /// different definition. A spelling that would shadow a built-in is
    /// refused too. Identical re-registration succeeds and changes
    /// nothing; a file-backed definition refines an earlier nominal one.
    pub fn register(&mut self, desc: T, spellings: Vec<String>, provenance: Provenance) -> bool {
        let canonical = desc.qualified_name().to_string();
        if let Some(Binding::Unique {
            desc: existing,
            provenance: existing_prov,
        }) = self.entries.get(&canonical)
        {
            if existing.kind() != desc.kind() {
                log::warn!(
                    "conflicting registration of {}: {:?} vs {:?}",
                    canonical,
                    existing.kind(),
                    desc.kind()
                );
                return false;
            }
            if *existing_prov == provenance && existing.as_ref() != &desc {
                log::warn!("conflicting definitions of {}", canonical);
                return false;
            }
        }

        // Refuse to shadow built-ins under any spelling.
        for spelling in &spellings {
            if let Some(Binding::Unique {
                desc: existing,
                provenance: Provenance::BuiltIn,
            }) = self.entries.get(spelling)
            {
                if existing.qualified_name() != canonical {
                    log::warn!("{} would shadow built-in type {}", canonical, spelling);
                    return false;
                }
            }
        }

        let desc = Rc::new(desc);
        for spelling in spellings {
            self.bind(spelling, desc.clone(), provenance);
        }
        true
    }

    /// Bind one spelling, honoring short-name precedence:
    /// file-backed beats preprocessed, two file-backed entities are
    /// ambiguous, a later preprocessed entry displaces an earlier one.
    fn bind(&mut self, spelling: String, desc: Rc<T>, provenance: Provenance) {
        let replacement = match self.entries.get(&spelling) {
            None => Some(Binding::Unique { desc, provenance }),
            Some(Binding::Ambiguous) => None,
            Some(Binding::Unique {
                desc: existing,
                provenance: existing_prov,
            }) => {
                if existing.qualified_name() == desc.qualified_name() {
                    // Same entity; a stronger registration may carry a
                    // richer definition (a native header behind a nominal
                    // entry), so it takes over the descriptor too.
                    let chosen = if provenance > *existing_prov {
                        desc
                    } else {
                        existing.clone()
                    };
                    Some(Binding::Unique {
                        desc: chosen,
                        provenance: (*existing_prov).max(provenance),
                    })
                } else {
                    match (*existing_prov, provenance) {
                        (Provenance::BuiltIn, _) => None,
                        (Provenance::File, Provenance::File) => {
                            log::warn!(
                                "short name {} is ambiguous between {} and {}",
                                spelling,
                                existing.qualified_name(),
                                desc.qualified_name()
                            );
                            Some(Binding::Ambiguous)
                        }
                        (Provenance::File, _) => None,
                        (_, _) => {
                            log::debug!(
                                "short name {} now refers to {}",
                                spelling,
                                desc.qualified_name()
                            );
                            Some(Binding::Unique { desc, provenance })
                        }
                    }
                }
            }
        };
        if let Some(binding) = replacement {
            self.entries.insert(spelling, binding);
        }
    }
}

/// The spellings a file-backed declaration answers to.
///
/// A nested parcelable must be referenced through its outer class, so the
/// bare inner name is deliberately not registered here.
pub(crate) fn file_spellings(name: &QualifiedName) -> Vec<String> {
    let mut spellings = vec![name.qualified()];
    let local = name.local_name();
    if !spellings.contains(&local) {
        spellings.push(local);
    }
    spellings
}

/// The spellings a preprocessed nominal entry answers to.
///
/// Preprocessed entries carry no compound-name information, so the last
/// segment is registered as a short name even for nested parcelables.
/// Referencing a nested type by its bare inner name through this path is
/// a long-standing compatibility carve-out; keep it.
pub(crate) fn nominal_spellings(name: &QualifiedName) -> Vec<String> {
    let mut spellings = vec![name.qualified()];
    let simple = name.simple_name().to_string();
    if !spellings.contains(&simple) {
        spellings.push(simple);
    }
    spellings
}

/// A parsed generic container spelling (`List<Foo>`, `Map<String,Foo>`)
pub(crate) struct ContainerSpelling<'a> {
    pub base: &'a str,
    pub args: Vec<&'a str>,
}

/// Split a container spelling into base and argument names.
///
/// Only one level of generics is understood; nested arguments or
/// malformed spellings return `None`.
pub(crate) fn parse_container_spelling(spelling: &str) -> Option<ContainerSpelling<'_>> {
    let open = spelling.find('<')?;
    if !spelling.ends_with('>') || open == 0 {
        return None;
    }
    let base = &spelling[..open];
    let inner = &spelling[open + 1..spelling.len() - 1];
    if inner.is_empty() || inner.contains('<') || inner.contains('>') {
        return None;
    }
    let args: Vec<&str> = inner.split(',').map(|a| a.trim()).collect();
    if args.iter().any(|a| a.is_empty()) {
        return None;
    }
    Some(ContainerSpelling { base, args })
}
