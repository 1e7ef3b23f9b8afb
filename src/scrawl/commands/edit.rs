use crate::cipher::Cipher;
use crate::commands::{CmdMessage, CmdResult};
use crate::editor::{edit_bytes, Editor};
use crate::error::Result;
use crate::store::DataStore;
use tracing::info;

use super::select::{select, EntryFilter};

/// Opens the entry at `index` in the editor and writes the result back under
/// the same name.
///
/// Editing goes through a scratch file. Encrypted entries are decrypted into
/// it and re-encrypted afterwards. If the editor fails, the entry is untouched.
pub fn run<S: DataStore>(
    store: &mut S,
    editor: &dyn Editor,
    cipher: &dyn Cipher,
    filter: &EntryFilter,
    index: i64,
) -> Result<CmdResult> {
    let selected = select(store, filter, index)?;
    let name = selected.entry.file_name.clone();
    let encrypted = selected.entry.meta.encrypted;

    let raw = store.read(&name)?;
    let plain = if encrypted { cipher.decrypt(&raw)? } else { raw };

    let edited = edit_bytes(editor, &plain)?;

    let mut result = CmdResult::default().with_entry_paths(vec![selected.path.clone()]);
    if edited == plain {
        result.add_message(CmdMessage::info("No changes."));
        return Ok(result.with_listed_entries(vec![selected]));
    }

    let stored = if encrypted {
        cipher.encrypt(&edited)?
    } else {
        edited
    };
    store.write(&name, &stored)?;
    info!(path = %selected.path.display(), encrypted, "edited entry");

    result.add_message(CmdMessage::success(format!(
        "Saved {}",
        selected.path.display()
    )));
    Ok(result.with_listed_entries(vec![selected]))
}
