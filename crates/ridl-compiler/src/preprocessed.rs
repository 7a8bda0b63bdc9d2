//! Preprocessed-declarations cache
//!
//! Large builds avoid re-parsing every imported file by recording known
//! declarations in a flat cache, one per line:
//!
//! ```text
//! parcelable p.Outer.Inner;
//! interface one.IBar;
//! ```
//!
//! Entries are nominal only (kind plus qualified name, no bodies). The
//! reader tolerates extra whitespace around tokens and the terminator;
//! the writer always emits the canonical single-space form.

use crate::error::{CompileError, Result};
use crate::namespace::{TypeKind, TypeNamespace};
use ridl_core::ast::QualifiedName;
use ridl_core::io::FileIo;
use ridl_parser::{parse_document, ParseError};

/// Load one preprocessed file's entries into a namespace.
///
/// Fails on the first malformed line; entries registered before that line
/// stay registered.
pub fn parse_preprocessed_file(
    io: &dyn FileIo,
    path: &str,
    types: &mut dyn TypeNamespace,
) -> Result<()> {
    let contents = io.read_file(path)?;
    for (index, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let entry = parse_entry(line).ok_or_else(|| {
            CompileError::Syntax(ParseError::UnexpectedToken {
                line: index + 1,
                found: line.to_string(),
                expected: "'parcelable <name>;' or 'interface <name>;'".to_string(),
            })
        })?;
        let (kind, name) = entry;
        if !types.add_nominal_type(kind, &name) {
            return Err(CompileError::Conflict(format!(
                "{} (from {})",
                name.qualified(),
                path
            )));
        }
        log::debug!("preprocessed: {} {:?} from {}", name, kind, path);
    }
    Ok(())
}

/// Parse one `<kind> <qualified.name> ;` line, whitespace-tolerant
fn parse_entry(line: &str) -> Option<(TypeKind, QualifiedName)> {
    let body = line.strip_suffix(';')?.trim_end();
    let mut fields = body.split_whitespace();
    let kind = match fields.next()? {
        "parcelable" => TypeKind::Parcelable,
        "interface" => TypeKind::Interface,
        _ => return None,
    };
    let dotted = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    let name = QualifiedName::parse(dotted).ok()?;
    Some((kind, name))
}

/// Parse each input file and write the nominal-entry cache.
///
/// Atomic in effect: either every input parses and the full cache is
/// written in input order, or nothing is written at all.
pub fn write_preprocessed(io: &dyn FileIo, inputs: &[String], output: &str) -> Result<()> {
    let mut cache = String::new();
    for input in inputs {
        let text = io.read_file(input)?;
        let document = parse_document(input, &text)?;
        let decl = &document.decl;
        cache.push_str(decl.kind_keyword());
        cache.push(' ');
        cache.push_str(&decl.name().qualified());
        cache.push_str(";\n");
    }
    io.write_file(output, &cache)?;
    log::debug!("wrote {} preprocessed entries to {}", inputs.len(), output);
    Ok(())
}
