//! Test doubles for the editor and cipher capabilities, plus a temp-dir store.

use crate::cipher::Cipher;
use crate::editor::Editor;
use crate::error::{Result, ScrawlError};
use crate::store::fs::FileStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    // Keep the temp dir alive for the duration of the test
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }
}

/// Editor that replaces the buffer with fixed text.
pub struct WritingEditor(pub &'static str);

impl Editor for WritingEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        fs::write(path, self.0)?;
        Ok(())
    }
}

/// Editor that appends fixed text to the buffer.
pub struct AppendingEditor(pub &'static str);

impl Editor for AppendingEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        let mut body = fs::read(path)?;
        body.extend_from_slice(self.0.as_bytes());
        fs::write(path, body)?;
        Ok(())
    }
}

/// Editor that leaves the buffer alone.
pub struct IdleEditor;

impl Editor for IdleEditor {
    fn edit(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Editor that must not be invoked.
pub struct NoEditor;

impl Editor for NoEditor {
    fn edit(&self, _path: &Path) -> Result<()> {
        panic!("editor should not be opened");
    }
}

/// Editor that always fails, like an aborted session.
pub struct AbortingEditor;

impl Editor for AbortingEditor {
    fn edit(&self, _path: &Path) -> Result<()> {
        Err(ScrawlError::Editor("exited with non-zero status".into()))
    }
}

const ARMOR_HEAD: &[u8] = b"-----BEGIN TEST MESSAGE-----\n";
const ARMOR_TAIL: &[u8] = b"\n-----END TEST MESSAGE-----\n";

/// Reversible stand-in for gpg: reverses the bytes inside armor markers.
pub struct ArmorCipher;

impl Cipher for ArmorCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut out = ARMOR_HEAD.to_vec();
        out.extend(plaintext.iter().rev());
        out.extend_from_slice(ARMOR_TAIL);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let inner = ciphertext
            .strip_prefix(ARMOR_HEAD)
            .and_then(|rest| rest.strip_suffix(ARMOR_TAIL))
            .ok_or_else(|| ScrawlError::Cipher("input is not armored".into()))?;
        Ok(inner.iter().rev().copied().collect())
    }
}

/// Cipher that always fails.
pub struct BrokenCipher;

impl Cipher for BrokenCipher {
    fn encrypt(&self, _plaintext: &[u8]) -> Result<Vec<u8>> {
        Err(ScrawlError::Cipher("no usable key".into()))
    }

    fn decrypt(&self, _ciphertext: &[u8]) -> Result<Vec<u8>> {
        Err(ScrawlError::Cipher("no usable key".into()))
    }
}
