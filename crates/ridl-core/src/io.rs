//! File-system collaborator
//!
//! The compiler never touches storage directly; every read and write goes
//! through the [`FileIo`] trait so tests and tools can substitute an
//! in-memory implementation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// I/O error reported by a [`FileIo`] implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IoError {
    /// The requested file does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// Read or write failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, IoError>;

/// Synchronous file access seam
pub trait FileIo {
    /// Read a whole file as UTF-8 text
    fn read_file(&self, path: &str) -> Result<String>;

    /// Write a whole file, replacing any previous contents
    fn write_file(&self, path: &str, contents: &str) -> Result<()>;
}

/// [`FileIo`] backed by the real file system
#[derive(Debug, Default)]
pub struct DiskIo;

impl DiskIo {
    /// Create a disk-backed file accessor
    pub fn new() -> Self {
        DiskIo
    }
}

impl FileIo for DiskIo {
    fn read_file(&self, path: &str) -> Result<String> {
        if !Path::new(path).exists() {
            return Err(IoError::NotFound(path.to_string()));
        }
        fs::read_to_string(path).map_err(|e| IoError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn write_file(&self, path: &str, contents: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| IoError::Io {
                    path: path.to_string(),
                    message: e.to_string(),
                })?;
            }
        }
        fs::write(path, contents).map_err(|e| IoError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// In-memory [`FileIo`] used by tests and demos
///
/// Reads come from contents seeded with [`MemoryIo::set_file_contents`];
/// writes are captured separately and can be inspected with
/// [`MemoryIo::written_contents`].
#[derive(Debug, Default)]
pub struct MemoryIo {
    files: RefCell<HashMap<String, String>>,
    written: RefCell<HashMap<String, String>>,
}

impl MemoryIo {
    /// Create an empty in-memory file system
    pub fn new() -> Self {
        MemoryIo::default()
    }

    /// Seed a file's contents
    pub fn set_file_contents(&self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    /// Contents written through [`FileIo::write_file`], if any
    pub fn written_contents(&self, path: &str) -> Option<String> {
        self.written.borrow().get(path).cloned()
    }

    /// Paths written so far, in no particular order
    pub fn written_paths(&self) -> Vec<String> {
        self.written.borrow().keys().cloned().collect()
    }
}

impl FileIo for MemoryIo {
    fn read_file(&self, path: &str) -> Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| IoError::NotFound(path.to_string()))
    }

    fn write_file(&self, path: &str, contents: &str) -> Result<()> {
        self.written
            .borrow_mut()
            .insert(path.to_string(), contents.to_string());
        Ok(())
    }
}
