//! Import resolver
//!
//! Resolves one document's imports against the caller's import search
//! paths, parsing and registering each file-backed declaration it finds.
//! Imports with no backing file still resolve when a preprocessed cache
//! already made the name known; a real file always beats a cache entry
//! for short-name lookups (the namespace enforces that precedence).

use crate::error::{CompileError, Result};
use crate::namespace::TypeNamespace;
use ridl_core::ast::{Document, QualifiedName};
use ridl_core::io::{FileIo, IoError};
use ridl_parser::parse_document;

/// An import that resolved, and what backed it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImport {
    /// The imported qualified name
    pub name: QualifiedName,

    /// Path of the file the declaration was parsed from, or `None` when
    /// only a preprocessed entry backed it
    pub path: Option<String>,
}

/// Resolves imports for one compilation unit
pub struct ImportResolver<'a> {
    io: &'a dyn FileIo,
    import_paths: &'a [String],
}

impl<'a> ImportResolver<'a> {
    /// Create a resolver over the caller-supplied import search paths
    pub fn new(io: &'a dyn FileIo, import_paths: &'a [String]) -> Self {
        ImportResolver { io, import_paths }
    }

    /// Resolve every import of `document`, registering each file-backed
    /// declaration into `types`.
    ///
    /// All-or-nothing: the first import that cannot be resolved, parsed,
    /// or registered aborts the whole document.
    pub fn resolve_imports(
        &self,
        document: &Document,
        types: &mut dyn TypeNamespace,
    ) -> Result<Vec<ResolvedImport>> {
        let mut resolved = Vec::new();
        for import in &document.imports {
            resolved.push(self.resolve_one(&import.name, types)?);
        }
        Ok(resolved)
    }

    fn resolve_one(
        &self,
        name: &QualifiedName,
        types: &mut dyn TypeNamespace,
    ) -> Result<ResolvedImport> {
        // Search real files first, in caller-supplied order.
        for base in self.import_paths {
            let candidate = candidate_path(base, name);
            let text = match self.io.read_file(&candidate) {
                Ok(text) => text,
                Err(IoError::NotFound(_)) => continue,
                Err(e) => return Err(e.into()),
            };
            let imported = parse_document(&candidate, &text)?;
            if imported.decl.name().simple_name() != name.simple_name() {
                log::warn!(
                    "{} declares {} but was imported as {}",
                    candidate,
                    imported.decl.name(),
                    name
                );
            }
            if !types.add_declaration(&imported.decl, &candidate) {
                return Err(CompileError::Conflict(format!(
                    "{} (imported from {})",
                    imported.decl.name(),
                    candidate
                )));
            }
            log::debug!("resolved import {} from {}", name, candidate);
            return Ok(ResolvedImport {
                name: name.clone(),
                path: Some(candidate),
            });
        }

        // No file anywhere; a preloaded preprocessed entry still counts.
        if types.has_type(&name.qualified()) {
            log::debug!("resolved import {} from preprocessed declarations", name);
            return Ok(ResolvedImport {
                name: name.clone(),
                path: None,
            });
        }

        Err(CompileError::Resolution(format!(
            "couldn't find import for {}",
            name
        )))
    }
}

/// Conventional on-disk location of an imported declaration:
/// `<base>/<package dirs>/<SimpleName>.ridl`
fn candidate_path(base: &str, name: &QualifiedName) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if !base.is_empty() {
        parts.push(base);
    }
    for segment in name.package_segments() {
        parts.push(segment);
    }
    let mut path = parts.join("/");
    if !path.is_empty() {
        path.push('/');
    }
    path.push_str(name.simple_name());
    path.push_str(".ridl");
    path
}
