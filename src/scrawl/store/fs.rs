use super::DataStore;
use crate::error::{Result, ScrawlError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const TMP_PREFIX: &str = ".scrawl-";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataStore for FileStore {
    fn ensure_ready(&self) -> Result<()> {
        if !self.root.is_dir() {
            fs::create_dir_all(&self.root).map_err(|e| {
                ScrawlError::Setup(format!(
                    "Cannot create store directory {}: {}",
                    self.root.display(),
                    e
                ))
            })?;
            info!(dir = %self.root.display(), "created store directory");
        }
        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            // Non UTF-8 names can never be entries
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        debug!(dir = %self.root.display(), files = names.len(), "listed store");
        Ok(names)
    }

    fn exists(&self, name: &str) -> bool {
        self.root.join(name).exists()
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.root.join(name))?)
    }

    fn write(&mut self, name: &str, content: &[u8]) -> Result<()> {
        self.ensure_ready()?;
        let target = self.root.join(name);

        // Atomic write: temp file in the same directory, then rename
        let mut tmp = tempfile::Builder::new()
            .prefix(TMP_PREFIX)
            .tempfile_in(&self.root)
            .map_err(|e| {
                ScrawlError::Setup(format!(
                    "Cannot write to store directory {}: {}",
                    self.root.display(),
                    e
                ))
            })?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| ScrawlError::Io(e.error))?;

        debug!(path = %target.display(), bytes = content.len(), "wrote entry");
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        let path = self.root.join(name);
        fs::remove_file(&path)?;
        debug!(path = %path.display(), "removed entry");
        Ok(())
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.write("1_a", b"hello").unwrap();
        assert_eq!(store.read("1_a").unwrap(), b"hello");
        assert!(store.exists("1_a"));
    }

    #[test]
    fn write_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("store");
        let mut store = FileStore::new(root.clone());
        store.write("1", b"x").unwrap();
        assert!(root.join("1").is_file());
    }

    #[test]
    fn list_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("123")).unwrap();
        fs::write(dir.path().join("456"), "x").unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert_eq!(store.list_names().unwrap(), vec!["456".to_string()]);
    }

    #[test]
    fn list_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("absent"));
        assert!(store.list_names().unwrap().is_empty());
    }

    #[test]
    fn remove_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        assert!(matches!(store.remove("1"), Err(ScrawlError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn ensure_ready_fails_under_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let store = FileStore::new(blocker.join("store"));
        let err = store.ensure_ready().unwrap_err();
        assert!(matches!(err, ScrawlError::Setup(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_into_read_only_directory_is_setup_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path().join("store");
        fs::create_dir(&root).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits do not bind root
        let writable = fs::write(root.join("check"), "x").is_ok();
        if !writable {
            let mut store = FileStore::new(root.clone());
            let err = store.write("1", b"x").unwrap_err();
            assert!(matches!(err, ScrawlError::Setup(_)));
            assert_eq!(err.exit_code(), 1);
            assert!(!root.join("1").exists());
        }

        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
