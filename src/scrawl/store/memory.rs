use super::DataStore;
use crate::error::{Result, ScrawlError};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(name: &str) -> ScrawlError {
        ScrawlError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found", name),
        ))
    }
}

impl DataStore for InMemoryStore {
    fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| Self::not_found(name))
    }

    fn write(&mut self, name: &str, content: &[u8]) -> Result<()> {
        self.files.insert(name.to_string(), content.to_vec());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        self.files
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(name))
    }

    fn path(&self, name: &str) -> PathBuf {
        PathBuf::from("memory").join(name)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds a file under its literal name, entry or not.
        pub fn with_file(mut self, name: &str, body: &str) -> Self {
            self.store
                .write(name, body.as_bytes())
                .expect("in-memory write cannot fail");
            self
        }

        /// Adds one entry per id, tagged with `tags`.
        pub fn with_entries(mut self, ids: &[u64], tags: &[&str]) -> Self {
            for id in ids {
                let mut name = id.to_string();
                for tag in tags {
                    name.push('_');
                    name.push_str(tag);
                }
                let body = format!("body of {}", name);
                self = self.with_file(&name, &body);
            }
            self
        }
    }
}
