//! Qualified name handling
//!
//! A qualified name is a dotted name such as `one.IBar` or `p.Outer.Inner`.
//! It always decomposes into a (possibly empty) package and a local name.
//! The local name may itself be compound (`Outer.Inner`) for parcelables
//! declared nested in an outer class.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dotted, package-qualified type name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Package segments, may be empty for packageless declarations
    package: Vec<String>,

    /// Local name segments, never empty; more than one segment means a
    /// nested (outer-qualified) name such as `Outer.Inner`
    name: Vec<String>,
}

impl QualifiedName {
    /// Create a qualified name from a dotted package and a dotted local name.
    ///
    /// The package may be empty; the local name must have at least one
    /// segment and every segment must be a valid identifier.
    pub fn new(package: &str, local_name: &str) -> Result<Self> {
        let package = split_segments(package)?;
        let name = split_segments(local_name)?;
        if name.is_empty() {
            return Err(CoreError::InvalidName(local_name.to_string()));
        }
        Ok(QualifiedName { package, name })
    }

    /// Parse a fully-dotted name such as `one.IBar` or `p.Outer.Inner`.
    ///
    /// Everything up to the last segment is treated as the package. Nested
    /// names cannot be distinguished from packages in this form, so the
    /// local name is always the single last segment.
    pub fn parse(dotted: &str) -> Result<Self> {
        let mut segments = split_segments(dotted)?;
        match segments.pop() {
            Some(last) => Ok(QualifiedName {
                package: segments,
                name: vec![last],
            }),
            None => Err(CoreError::InvalidName(dotted.to_string())),
        }
    }

    /// The dotted package, empty string for packageless names
    pub fn package(&self) -> String {
        self.package.join(".")
    }

    /// Package segments in order
    pub fn package_segments(&self) -> &[String] {
        &self.package
    }

    /// Whether this name carries no package
    pub fn has_package(&self) -> bool {
        !self.package.is_empty()
    }

    /// The local name, including any outer-class qualifier (`Outer.Inner`)
    pub fn local_name(&self) -> String {
        self.name.join(".")
    }

    /// The last segment of the name (`Inner` for `p.Outer.Inner`)
    pub fn simple_name(&self) -> &str {
        // Constructors guarantee at least one local segment.
        self.name.last().map(String::as_str).unwrap_or_default()
    }

    /// Whether the local name is outer-qualified (`Outer.Inner`)
    pub fn is_compound(&self) -> bool {
        self.name.len() > 1
    }

    /// The full dotted spelling, package included
    pub fn qualified(&self) -> String {
        self.package
            .iter()
            .chain(self.name.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

fn split_segments(dotted: &str) -> Result<Vec<String>> {
    if dotted.is_empty() {
        return Ok(Vec::new());
    }
    let mut segments = Vec::new();
    for segment in dotted.split('.') {
        if !is_identifier(segment) {
            return Err(CoreError::InvalidName(dotted.to_string()));
        }
        segments.push(segment.to_string());
    }
    Ok(segments)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
