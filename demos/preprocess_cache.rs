//! Write a preprocessed-declarations cache and compile against it.
//!
//! Run with: cargo run --example preprocess_cache

use anyhow::Context;
use ridl_compiler::{compile_to_java, preprocess, Options};
use ridl_core::io::MemoryIo;

fn main() -> anyhow::Result<()> {
    let io = MemoryIo::new();
    io.set_file_contents("p/Outer.ridl", "package p; parcelable Outer.Inner;");
    io.set_file_contents("one/IBar.ridl", "package one; interface IBar {}");

    // First pass: record every declaration nominally.
    let options = Options {
        output: Some("preprocessed".to_string()),
        files_to_preprocess: vec!["p/Outer.ridl".to_string(), "one/IBar.ridl".to_string()],
        ..Options::default()
    };
    preprocess(&options, &io)?;
    let cache = io
        .written_contents("preprocessed")
        .context("cache was not written")?;
    println!("cache contents:\n{cache}");

    // Second pass: compile a file that leans on the cache instead of
    // re-parsing the declarations behind it.
    let io2 = MemoryIo::new();
    io2.set_file_contents("preprocessed", cache);
    io2.set_file_contents(
        "q/IUser.ridl",
        "package q; import one.IBar; interface IUser { void take(in IBar callback); }",
    );
    let options = Options {
        input: "q/IUser.ridl".to_string(),
        preprocessed_files: vec!["preprocessed".to_string()],
        ..Options::default()
    };
    compile_to_java(&options, &io2)?;
    println!("compiled q.IUser against the cache");

    Ok(())
}
