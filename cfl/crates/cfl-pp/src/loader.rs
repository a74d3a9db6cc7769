//! File access for `#include`.
//!
//! The preprocessor never touches the filesystem directly; it goes through
//! a [`FileLoader`]. [`FsLoader`] reads from disk, [`MemoryLoader`] serves
//! sources held in memory (embedded effect files, tests).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Reads a whole file as text.
pub trait FileLoader {
    /// Returns the full contents of `path`. An error means the file could
    /// not be read at all, never that its contents were unexpected.
    fn read_file(&self, path: &Path) -> io::Result<String>;
}

/// Loads files from the local filesystem.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so any
/// readable file can be lexed.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl FileLoader for FsLoader {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }
}

/// Loads files from an in-memory path table.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use cfl_pp::{FileLoader, MemoryLoader};
///
/// let loader = MemoryLoader::new().with_file("inc/a.h", "#define A 1\n");
/// assert!(loader.read_file(Path::new("inc/a.h")).is_ok());
/// assert!(loader.read_file(Path::new("inc/b.h")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Number of files held.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no files are held.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileLoader for MemoryLoader {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

impl<L: FileLoader + ?Sized> FileLoader for &L {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        (**self).read_file(path)
    }
}
