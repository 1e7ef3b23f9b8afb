use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;
use std::collections::BTreeSet;

use super::select::{scan_non_empty, EntryFilter};

/// Distinct tags over the filtered set, sorted.
pub fn run<S: DataStore>(store: &S, filter: &EntryFilter) -> Result<CmdResult> {
    let entries = scan_non_empty(store, filter)?;
    let tags: BTreeSet<String> = entries
        .into_iter()
        .flat_map(|entry| entry.meta.tags)
        .collect();

    Ok(CmdResult::default().with_tags(tags.into_iter().collect()))
}
