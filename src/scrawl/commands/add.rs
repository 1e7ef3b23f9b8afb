use crate::cipher::Cipher;
use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult, ListedEntry};
use crate::editor::{edit_bytes, Editor};
use crate::error::{Result, ScrawlError};
use crate::model::{encode_filename, Entry, EntryMeta};
use crate::store::DataStore;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRequest {
    /// Explicit id; the current time when `None`
    pub id: Option<u64>,
    pub tags: Vec<String>,
    pub encrypt: bool,
}

/// Where the body of a new entry comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    /// Already read, e.g. from a pipe
    Piped(Vec<u8>),
    /// Ask the user through the editor, starting from an empty buffer
    Editor,
}

/// Writes a new entry. A file already carrying the same name is replaced.
pub fn run<S: DataStore>(
    store: &mut S,
    clock: &dyn Clock,
    editor: &dyn Editor,
    cipher: &dyn Cipher,
    request: AddRequest,
    source: BodySource,
) -> Result<CmdResult> {
    let id = request.id.unwrap_or_else(|| clock.now());
    let meta = EntryMeta::new(id, &request.tags)?.with_encrypted(request.encrypt);
    let file_name = encode_filename(&meta);
    let path = store.path(&file_name);

    store.ensure_ready()?;

    let body = match source {
        BodySource::Piped(body) => body,
        BodySource::Editor => edit_bytes(editor, b"")?,
    };
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ScrawlError::EmptyContent);
    }

    let stored = if meta.encrypted {
        cipher.encrypt(&body)?
    } else {
        body
    };
    store.write(&file_name, &stored)?;
    info!(path = %path.display(), encrypted = meta.encrypted, "added entry");

    let mut result = CmdResult::default()
        .with_entry_paths(vec![path.clone()])
        .with_listed_entries(vec![ListedEntry {
            index: 0,
            entry: Entry { file_name, meta },
            path: path.clone(),
        }]);
    result.add_message(CmdMessage::success(format!("Added {}", path.display())));
    Ok(result)
}
