//! # Storage Layer
//!
//! The store is one flat directory. Each entry is one file whose name carries
//! its id and tags (see [`crate::model`]); the file holds the raw body and
//! nothing else. There is no index file, no lock and no cache: every command
//! lists the directory again.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage on disk, atomic writes via a
//!   hidden temp file renamed into place.
//! - [`memory::InMemoryStore`]: a map of names to bodies, for command tests.
//!
//! Stores deal in file names only. Deciding which names are entries, and in
//! which order they are presented, is the job of `commands::select`.

use crate::error::Result;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract interface over the store directory.
pub trait DataStore {
    /// Make sure the store can be written to (creates the directory on disk)
    fn ensure_ready(&self) -> Result<()>;

    /// Names of all regular files in the store, in enumeration order
    fn list_names(&self) -> Result<Vec<String>>;

    /// Whether a file with this name exists
    fn exists(&self, name: &str) -> bool;

    /// Read a file's raw content
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Write a file's content, replacing any existing file atomically
    fn write(&mut self, name: &str, content: &[u8]) -> Result<()>;

    /// Remove a file
    fn remove(&mut self, name: &str) -> Result<()>;

    /// Path reported to the user for a file
    fn path(&self, name: &str) -> PathBuf;
}
