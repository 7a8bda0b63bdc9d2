//! Compilation pipeline
//!
//! The front end is a strict sequence per file:
//! parse -> register own declaration -> preload preprocessed caches ->
//! resolve imports -> validate. Any failure short-circuits the rest;
//! callers get a validated document or an error, never a partial AST.

use crate::error::{CompileError, Result};
use crate::import_resolver::{ImportResolver, ResolvedImport};
use crate::namespace::{CppTypeNamespace, JavaTypeNamespace, TypeNamespace};
use crate::preprocessed::{parse_preprocessed_file, write_preprocessed};
use crate::semantic::Validator;
use ridl_core::ast::Document;
use ridl_core::io::FileIo;
use ridl_parser::parse_document;

/// Driver options
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// The file to compile
    pub input: String,

    /// Output path, used by the preprocess driver
    pub output: Option<String>,

    /// Import search roots, consulted in order
    pub import_paths: Vec<String>,

    /// Preprocessed-declaration caches, loaded in order before imports
    pub preprocessed_files: Vec<String>,

    /// Fail on files that declare only a parcelable and no interface
    pub fail_on_parcelable: bool,

    /// Inputs for the preprocess driver
    pub files_to_preprocess: Vec<String>,
}

/// A document that made it through the whole pipeline
#[derive(Debug, Clone)]
pub struct ValidatedDocument {
    /// The parsed, fully resolved and validated document
    pub document: Document,

    /// Every import that actually resolved, in declaration order
    pub imports: Vec<ResolvedImport>,
}

/// Run the full front-end pipeline for one file.
///
/// On success the returned declaration is fully type-resolved against
/// `types` and every semantic rule holds. On failure nothing is returned;
/// the namespace may already contain types registered by earlier phases.
pub fn load_and_validate(
    io: &dyn FileIo,
    preprocessed_files: &[String],
    import_paths: &[String],
    input_path: &str,
    types: &mut dyn TypeNamespace,
) -> Result<ValidatedDocument> {
    types.init();

    let text = io.read_file(input_path)?;
    let document = parse_document(input_path, &text)?;

    // The file's own type participates in resolving its method signatures.
    if !types.add_declaration(&document.decl, input_path) {
        return Err(CompileError::Conflict(format!(
            "{} (declared in {})",
            document.decl.name(),
            input_path
        )));
    }

    for path in preprocessed_files {
        parse_preprocessed_file(io, path, types)?;
    }

    let resolver = ImportResolver::new(io, import_paths);
    let imports = resolver.resolve_imports(&document, types)?;

    Validator::new(types).validate_document(&document)?;

    log::debug!(
        "validated {} ({} imports)",
        document.decl.name(),
        imports.len()
    );
    Ok(ValidatedDocument { document, imports })
}

/// Compile one file for the Java binding flavor.
///
/// Code generation is the backend's job; this driver stops once the
/// document is validated. Parcelable-only files succeed silently unless
/// `fail_on_parcelable` is set.
pub fn compile_to_java(options: &Options, io: &dyn FileIo) -> Result<()> {
    let mut types = JavaTypeNamespace::new();
    compile(options, io, &mut types)
}

/// Compile one file for the native C++ binding flavor
pub fn compile_to_cpp(options: &Options, io: &dyn FileIo) -> Result<()> {
    let mut types = CppTypeNamespace::new();
    compile(options, io, &mut types)
}

fn compile(options: &Options, io: &dyn FileIo, types: &mut dyn TypeNamespace) -> Result<()> {
    let validated = load_and_validate(
        io,
        &options.preprocessed_files,
        &options.import_paths,
        &options.input,
        types,
    )?;
    if !validated.document.decl.is_interface() {
        if options.fail_on_parcelable {
            return Err(CompileError::Validation(format!(
                "{} declares only a parcelable and fail-on-parcelable is set",
                options.input
            )));
        }
        log::warn!("{} declares no interface; nothing to generate", options.input);
    }
    Ok(())
}

/// Write the preprocessed-declarations cache for a set of input files
pub fn preprocess(options: &Options, io: &dyn FileIo) -> Result<()> {
    let output = options.output.as_deref().ok_or_else(|| {
        CompileError::Validation("preprocess requires an output path".to_string())
    })?;
    write_preprocessed(io, &options.files_to_preprocess, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridl_core::io::MemoryIo;

    #[test]
    fn test_fail_on_parcelable_flag() {
        let io = MemoryIo::new();
        io.set_file_contents("p/IFoo.ridl", "package p; parcelable IFoo;");
        let mut options = Options {
            input: "p/IFoo.ridl".to_string(),
            ..Options::default()
        };
        // By default, we shouldn't fail on parcelable.
        assert!(compile_to_java(&options, &io).is_ok());
        options.fail_on_parcelable = true;
        assert!(compile_to_java(&options, &io).is_err());
    }

    #[test]
    fn test_compile_simple_interface_both_backends() {
        let io = MemoryIo::new();
        io.set_file_contents("a/IFoo.ridl", "package a; interface IFoo { void f(int x); }");
        let options = Options {
            input: "a/IFoo.ridl".to_string(),
            ..Options::default()
        };
        assert!(compile_to_java(&options, &io).is_ok());
        assert!(compile_to_cpp(&options, &io).is_ok());
    }

    #[test]
    fn test_preprocess_driver_requires_output() {
        let io = MemoryIo::new();
        let options = Options::default();
        assert!(preprocess(&options, &io).is_err());
    }

    #[test]
    fn test_preprocess_driver_writes_cache() {
        let io = MemoryIo::new();
        io.set_file_contents("p/Foo.ridl", "package p; parcelable Foo;");
        let options = Options {
            output: Some("out".to_string()),
            files_to_preprocess: vec!["p/Foo.ridl".to_string()],
            ..Options::default()
        };
        preprocess(&options, &io).unwrap();
        assert_eq!(io.written_contents("out").unwrap(), "parcelable p.Foo;\n");
    }
}
