use crate::commands::{CmdMessage, CmdResult, ListedEntry};
use crate::error::Result;
use crate::store::DataStore;
use tracing::info;

use super::select::{select, EntryFilter};

/// Removes the entry at `index` once `confirm` agrees.
///
/// `confirm` sees the resolved entry; returning `false` cancels with no effect.
pub fn run<S, F>(
    store: &mut S,
    filter: &EntryFilter,
    index: i64,
    confirm: F,
) -> Result<CmdResult>
where
    S: DataStore,
    F: FnOnce(&ListedEntry) -> Result<bool>,
{
    let selected = select(store, filter, index)?;

    if !confirm(&selected)? {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(result);
    }

    store.remove(&selected.entry.file_name)?;
    info!(path = %selected.path.display(), "deleted entry");

    let mut result = CmdResult::default().with_entry_paths(vec![selected.path.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Deleted {}",
        selected.path.display()
    )));
    Ok(result.with_listed_entries(vec![selected]))
}
