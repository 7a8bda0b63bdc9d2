//! End-to-end tests for the load-and-validate pipeline
//!
//! Each test drives the full front end over an in-memory file system:
//! parse, preprocessed preload, import resolution, validation, and the
//! backend-specific namespaces.

use ridl_compiler::{
    load_and_validate, CompileError, CppTypeNamespace, JavaTypeNamespace, TypeDescriptor,
    TypeNamespace, ValidatedDocument,
};
use ridl_core::io::MemoryIo;

/// Test fixture mirroring a build invocation: seeded files, import search
/// paths and preprocessed caches.
#[derive(Default)]
struct Harness {
    io: MemoryIo,
    preprocessed_files: Vec<String>,
    import_paths: Vec<String>,
}

impl Harness {
    fn new() -> Self {
        Harness::default()
    }

    fn parse(
        &self,
        path: &str,
        contents: &str,
        types: &mut dyn TypeNamespace,
    ) -> Result<ValidatedDocument, CompileError> {
        self.io.set_file_contents(path, contents);
        load_and_validate(
            &self.io,
            &self.preprocessed_files,
            &self.import_paths,
            path,
            types,
        )
    }
}

// =============================================================================
// Package Rules
// =============================================================================

#[test]
fn test_java_accepts_missing_package() {
    let harness = Harness::new();
    let mut java_types = JavaTypeNamespace::new();
    assert!(harness
        .parse("IFoo.ridl", "interface IFoo { }", &mut java_types)
        .is_ok());
}

#[test]
fn test_cpp_rejects_missing_package() {
    let harness = Harness::new();
    let mut cpp_types = CppTypeNamespace::new();
    assert!(harness
        .parse("IFoo.ridl", "interface IFoo { }", &mut cpp_types)
        .is_err());

    let mut cpp_types = CppTypeNamespace::new();
    assert!(harness
        .parse("a/IFoo.ridl", "package a; interface IFoo { }", &mut cpp_types)
        .is_ok());
}

// =============================================================================
// Oneway Rules
// =============================================================================

#[test]
fn test_rejects_oneway_out_parameters() {
    let oneway_interface = "package a; oneway interface IFoo { void f(out int bar); }";
    let oneway_method = "package a; interface IBar { oneway void f(out int bar); }";

    let harness = Harness::new();
    for contents in [oneway_interface, oneway_method] {
        let mut java_types = JavaTypeNamespace::new();
        assert!(harness.parse("a/IFoo.ridl", contents, &mut java_types).is_err());
        let mut cpp_types = CppTypeNamespace::new();
        assert!(harness.parse("a/IFoo.ridl", contents, &mut cpp_types).is_err());
    }
}

#[test]
fn test_rejects_oneway_non_void_return() {
    let oneway_method = "package a; interface IFoo { oneway int f(); }";
    let harness = Harness::new();
    let mut java_types = JavaTypeNamespace::new();
    assert!(harness.parse("a/IFoo.ridl", oneway_method, &mut java_types).is_err());
    let mut cpp_types = CppTypeNamespace::new();
    assert!(harness.parse("a/IFoo.ridl", oneway_method, &mut cpp_types).is_err());
}

#[test]
fn test_accepts_oneway() {
    let oneway_method = "package a; interface IFoo { oneway void f(int a); }";
    let oneway_interface = "package a; oneway interface IBar { void f(int a); }";
    let harness = Harness::new();
    for contents in [oneway_method, oneway_interface] {
        let mut java_types = JavaTypeNamespace::new();
        assert!(harness.parse("a/IFoo.ridl", contents, &mut java_types).is_ok());
        let mut cpp_types = CppTypeNamespace::new();
        assert!(harness.parse("a/IFoo.ridl", contents, &mut cpp_types).is_ok());
    }
}

// =============================================================================
// Arrays of Interface References
// =============================================================================

#[test]
fn test_rejects_arrays_of_interfaces() {
    let mut harness = Harness::new();
    harness.import_paths.push("".to_string());
    harness
        .io
        .set_file_contents("bar/IBar.ridl", "package bar; interface IBar {}");
    let contents = "package foo;\nimport bar.IBar;\ninterface IFoo { void f(in IBar[] input); }";

    let mut java_types = JavaTypeNamespace::new();
    let err = harness
        .parse("foo/IFoo.ridl", contents, &mut java_types)
        .unwrap_err();
    assert!(matches!(err, CompileError::Validation(_)));

    let mut cpp_types = CppTypeNamespace::new();
    assert!(harness.parse("foo/IFoo.ridl", contents, &mut cpp_types).is_err());
}

#[test]
fn test_accepts_arrays_of_parcelables() {
    let mut harness = Harness::new();
    harness.import_paths.push("".to_string());
    harness
        .io
        .set_file_contents("bar/Pair.ridl", "package bar; parcelable Pair;");
    let contents = "package foo;\nimport bar.Pair;\ninterface IFoo { void f(in Pair[] input, in int[] ns); }";

    let mut java_types = JavaTypeNamespace::new();
    assert!(harness.parse("foo/IFoo.ridl", contents, &mut java_types).is_ok());
}

// =============================================================================
// Import Precedence
// =============================================================================

#[test]
fn test_prefer_import_to_preprocessed() {
    let mut harness = Harness::new();
    harness
        .io
        .set_file_contents("preprocessed", "interface another.IBar;");
    harness
        .io
        .set_file_contents("one/IBar.ridl", "package one; interface IBar {}");
    harness.preprocessed_files.push("preprocessed".to_string());
    harness.import_paths.push("".to_string());

    let mut java_types = JavaTypeNamespace::new();
    let result = harness
        .parse(
            "p/IFoo.ridl",
            "package p; import one.IBar; interface IFoo {}",
            &mut java_types,
        )
        .unwrap();
    assert_eq!(result.imports.len(), 1);
    assert_eq!(result.imports[0].path.as_deref(), Some("one/IBar.ridl"));

    // We expect to know about both kinds of IBar.
    assert!(java_types.has_type("one.IBar"));
    assert!(java_types.has_type("another.IBar"));
    // But if we request just "IBar" we should get our imported one.
    let descriptor = java_types.find("IBar").unwrap();
    assert_eq!(descriptor.qualified_name(), "one.IBar");
}

#[test]
fn test_ambiguous_file_backed_short_name_fails() {
    let mut harness = Harness::new();
    harness.import_paths.push("".to_string());
    harness
        .io
        .set_file_contents("one/IBar.ridl", "package one; interface IBar {}");
    harness
        .io
        .set_file_contents("two/IBar.ridl", "package two; interface IBar {}");
    let contents = "package p;\nimport one.IBar;\nimport two.IBar;\n\
                    interface IFoo { void f(in IBar b); }";

    let mut java_types = JavaTypeNamespace::new();
    let err = harness
        .parse("p/IFoo.ridl", contents, &mut java_types)
        .unwrap_err();
    assert!(matches!(err, CompileError::Resolution(_)));
    // Both remain reachable by their qualified names.
    assert!(java_types.has_type("one.IBar"));
    assert!(java_types.has_type("two.IBar"));
    assert!(!java_types.has_type("IBar"));
}

#[test]
fn test_qualified_reference_survives_ambiguity() {
    let mut harness = Harness::new();
    harness.import_paths.push("".to_string());
    harness
        .io
        .set_file_contents("one/IBar.ridl", "package one; interface IBar {}");
    harness
        .io
        .set_file_contents("two/IBar.ridl", "package two; interface IBar {}");
    let contents = "package p;\nimport one.IBar;\nimport two.IBar;\n\
                    interface IFoo { void f(in one.IBar b); }";

    let mut java_types = JavaTypeNamespace::new();
    assert!(harness.parse("p/IFoo.ridl", contents, &mut java_types).is_ok());
}

// =============================================================================
// Nested Parcelables
// =============================================================================

#[test]
fn test_require_outer_class() {
    let mut harness = Harness::new();
    harness
        .io
        .set_file_contents("p/Outer.ridl", "package p; parcelable Outer.Inner;");
    harness.import_paths.push("".to_string());

    let mut java_types = JavaTypeNamespace::new();
    let err = harness
        .parse(
            "p/IFoo.ridl",
            "package p; import p.Outer; interface IFoo { void f(in Inner c); }",
            &mut java_types,
        )
        .unwrap_err();
    assert!(matches!(err, CompileError::Resolution(_)));
}

#[test]
fn test_outer_qualified_reference_succeeds() {
    let mut harness = Harness::new();
    harness
        .io
        .set_file_contents("p/Outer.ridl", "package p; parcelable Outer.Inner;");
    harness.import_paths.push("".to_string());

    let mut java_types = JavaTypeNamespace::new();
    assert!(harness
        .parse(
            "p/IFoo.ridl",
            "package p; import p.Outer; interface IFoo { void f(in Outer.Inner c); }",
            &mut java_types,
        )
        .is_ok());
}

#[test]
fn test_parse_compound_parcelable_from_preprocess() {
    let mut harness = Harness::new();
    harness
        .io
        .set_file_contents("preprocessed", "parcelable p.Outer.Inner;");
    harness.preprocessed_files.push("preprocessed".to_string());

    // A preprocessed-only entry lacks compound-name information, so the
    // bare inner name resolves. Long-standing compatibility behavior.
    let mut java_types = JavaTypeNamespace::new();
    assert!(harness
        .parse(
            "p/IFoo.ridl",
            "package p; interface IFoo { void f(in Inner c); }",
            &mut java_types,
        )
        .is_ok());
}

// =============================================================================
// Native Parcelables
// =============================================================================

#[test]
fn test_understands_native_parcelables() {
    let mut harness = Harness::new();
    harness.io.set_file_contents(
        "p/Bar.ridl",
        "package p; parcelable Bar from \"baz/header\";",
    );
    harness.import_paths.push("".to_string());
    let contents = "package p; import p.Bar; interface IFoo { }";

    // C++ understands native metadata.
    let mut cpp_types = CppTypeNamespace::new();
    assert!(harness.parse("p/IFoo.ridl", contents, &mut cpp_types).is_ok());
    let bar = cpp_types.lookup("Bar").unwrap();
    assert_eq!(bar.cpp_name(), "::p::Bar");
    assert_eq!(bar.headers().len(), 1);
    assert!(bar.headers().contains("baz/header"));

    // Java ignores it and sees a plain parcelable.
    let mut java_types = JavaTypeNamespace::new();
    assert!(harness.parse("p/IFoo.ridl", contents, &mut java_types).is_ok());
    let bar = java_types.lookup("Bar").unwrap();
    assert_eq!(bar.instantiable_name(), "p.Bar");
}

// =============================================================================
// Pipeline Failure Modes
// =============================================================================

#[test]
fn test_missing_input_file() {
    let harness = Harness::new();
    let mut java_types = JavaTypeNamespace::new();
    let err = load_and_validate(
        &harness.io,
        &harness.preprocessed_files,
        &harness.import_paths,
        "missing/IFoo.ridl",
        &mut java_types,
    )
    .unwrap_err();
    assert!(matches!(err, CompileError::Io(_)));
}

#[test]
fn test_malformed_preprocessed_file_aborts_compilation() {
    let mut harness = Harness::new();
    harness
        .io
        .set_file_contents("preprocessed", "garbage entry here");
    harness.preprocessed_files.push("preprocessed".to_string());

    let mut java_types = JavaTypeNamespace::new();
    let err = harness
        .parse("a/IFoo.ridl", "package a; interface IFoo {}", &mut java_types)
        .unwrap_err();
    assert!(matches!(err, CompileError::Syntax(_)));
}

#[test]
fn test_own_declaration_resolves_in_signatures() {
    // An interface may mention its own type in a method signature.
    let harness = Harness::new();
    let mut java_types = JavaTypeNamespace::new();
    assert!(harness
        .parse(
            "a/IFoo.ridl",
            "package a; interface IFoo { void register(in IFoo listener); }",
            &mut java_types,
        )
        .is_ok());
}
