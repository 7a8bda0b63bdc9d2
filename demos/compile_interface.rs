//! Compile a small interface against both backends.
//!
//! Run with: cargo run --example compile_interface

use ridl_compiler::{load_and_validate, CppTypeNamespace, JavaTypeNamespace};
use ridl_core::io::MemoryIo;

fn main() -> anyhow::Result<()> {
    let io = MemoryIo::new();
    io.set_file_contents("bar/Pair.ridl", "package bar; parcelable Pair;");
    io.set_file_contents(
        "p/IFoo.ridl",
        r#"package p;
import bar.Pair;

interface IFoo {
    int add(in int a, in int b);
    oneway void notify(in Pair change);
    void fill(out Pair result);
}
"#,
    );

    let import_paths = vec!["".to_string()];

    let mut java_types = JavaTypeNamespace::new();
    let validated = load_and_validate(&io, &[], &import_paths, "p/IFoo.ridl", &mut java_types)?;
    println!(
        "java: validated {} with {} imports",
        validated.document.decl.name(),
        validated.imports.len()
    );

    let mut cpp_types = CppTypeNamespace::new();
    let validated = load_and_validate(&io, &[], &import_paths, "p/IFoo.ridl", &mut cpp_types)?;
    println!("cpp: validated {}", validated.document.decl.name());
    if let Some(pair) = cpp_types.lookup("Pair") {
        println!("cpp spelling for Pair: {}", pair.cpp_name());
    }

    Ok(())
}
