use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

use super::select::{listed, scan_non_empty, EntryFilter};

pub fn run<S: DataStore>(store: &S, filter: &EntryFilter) -> Result<CmdResult> {
    let entries = scan_non_empty(store, filter)?;
    let listed = listed(store, entries);
    let paths = listed.iter().map(|le| le.path.clone()).collect();

    Ok(CmdResult::default()
        .with_listed_entries(listed)
        .with_entry_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrawlError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_with_positions_and_paths() {
        let fixture = StoreFixture::new().with_entries(&[10, 20], &["a"]);
        let result = run(&fixture.store, &EntryFilter::new()).unwrap();

        assert_eq!(result.listed_entries.len(), 2);
        assert_eq!(result.listed_entries[0].index, 0);
        assert_eq!(result.listed_entries[0].entry.meta.id, 20);
        assert_eq!(result.listed_entries[1].index, 1);
        assert_eq!(result.entry_paths[1], fixture.store.path("10_a"));
    }

    #[test]
    fn reverse_flips_the_listing() {
        let fixture = StoreFixture::new().with_entries(&[10, 20, 30], &[]);
        let forward = run(&fixture.store, &EntryFilter::new()).unwrap();
        let backward = run(&fixture.store, &EntryFilter::new().with_reverse(true)).unwrap();

        let ids = |r: &CmdResult| -> Vec<u64> {
            r.listed_entries.iter().map(|le| le.entry.meta.id).collect()
        };
        let mut flipped = ids(&backward);
        flipped.reverse();
        assert_eq!(ids(&forward), flipped);
    }

    #[test]
    fn stray_files_never_listed() {
        let fixture = StoreFixture::new()
            .with_file(".DS_Store", "")
            .with_entries(&[1], &[]);
        let result = run(&fixture.store, &EntryFilter::new()).unwrap();
        assert_eq!(result.listed_entries.len(), 1);
    }

    #[test]
    fn empty_listing_is_an_error() {
        let fixture = StoreFixture::new().with_file("README", "");
        assert!(matches!(
            run(&fixture.store, &EntryFilter::new()),
            Err(ScrawlError::EmptySelection)
        ));
    }
}
