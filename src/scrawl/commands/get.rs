use crate::cipher::Cipher;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;
use tracing::debug;

use super::select::{select, EntryFilter};

/// Resolves `index` and returns its path and, when `read_body` is set, its
/// decoded body. Encrypted bodies are decrypted.
pub fn run<S: DataStore>(
    store: &S,
    cipher: &dyn Cipher,
    filter: &EntryFilter,
    index: i64,
    read_body: bool,
) -> Result<CmdResult> {
    let selected = select(store, filter, index)?;
    let mut result = CmdResult::default().with_entry_paths(vec![selected.path.clone()]);

    if read_body {
        let raw = store.read(&selected.entry.file_name)?;
        let body = if selected.entry.meta.encrypted {
            debug!(entry = %selected.entry.file_name, "decrypting entry");
            cipher.decrypt(&raw)?
        } else {
            raw
        };
        result = result.with_body(body);
    }

    Ok(result.with_listed_entries(vec![selected]))
}
