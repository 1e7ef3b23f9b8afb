//! Filtering, ordering and index resolution.
//!
//! ## Ordering
//!
//! Directory enumeration order is up to the filesystem, so the scan sorts the
//! conforming names lexically (what `ls` shows) before filtering. Ids are not
//! compared numerically. The default presentation is that order reversed, so
//! the newest timestamped entry comes first; `reverse` presents the lexical
//! order as is.
//!
//! ## Indexes
//!
//! Indexes into the filtered set are signed: `0` is the first entry, `-1` the
//! last. Any other index must satisfy `|index| <= len - 1`, so `-len` is out of
//! range. An empty set and an out-of-range index are different errors.

use crate::error::{Result, ScrawlError};
use crate::model::{normalize_tag, Entry, EntryMeta};
use crate::store::DataStore;
use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use tracing::debug;

use super::ListedEntry;

/// Criteria applied to every conforming entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub id: Option<u64>,
    /// Inclusive lower id bound
    pub after: Option<u64>,
    /// Inclusive upper id bound
    pub before: Option<u64>,
    /// Lowercase tags; an entry matches if it has any of them
    pub tags: Vec<String>,
    pub reverse: bool,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the requested tags, validating and lowercasing them.
    pub fn with_tags<I, T>(mut self, tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.tags = tags
            .into_iter()
            .map(|t| normalize_tag(t.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(self)
    }

    pub fn with_id(mut self, id: Option<u64>) -> Self {
        self.id = id;
        self
    }

    pub fn with_after(mut self, after: Option<u64>) -> Self {
        self.after = after;
        self
    }

    pub fn with_before(mut self, before: Option<u64>) -> Self {
        self.before = before;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn matches(&self, meta: &EntryMeta) -> bool {
        if self.id.is_some_and(|id| id != meta.id) {
            return false;
        }
        if self.after.is_some_and(|min| meta.id < min) {
            return false;
        }
        if self.before.is_some_and(|max| meta.id > max) {
            return false;
        }
        meta.has_any_tag(&self.tags)
    }
}

/// Lists the store once and returns matching entries in presentation order.
pub fn scan<S: DataStore>(store: &S, filter: &EntryFilter) -> Result<Vec<Entry>> {
    let names = store.list_names()?;
    let total = names.len();

    let mut entries: Vec<Entry> = names
        .iter()
        .filter_map(|name| Entry::from_file_name(name))
        .filter(|entry| filter.matches(&entry.meta))
        .collect();

    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    if !filter.reverse {
        entries.reverse();
    }

    debug!(files = total, matched = entries.len(), ?filter, "scanned store");
    Ok(entries)
}

/// Like [`scan`], but an empty result is an error.
pub fn scan_non_empty<S: DataStore>(store: &S, filter: &EntryFilter) -> Result<Vec<Entry>> {
    let entries = scan(store, filter)?;
    if entries.is_empty() {
        return Err(ScrawlError::EmptySelection);
    }
    Ok(entries)
}

/// Attaches positions and paths to scanned entries.
pub fn listed<S: DataStore>(store: &S, entries: Vec<Entry>) -> Vec<ListedEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| ListedEntry {
            index,
            path: store.path(&entry.file_name),
            entry,
        })
        .collect()
}

/// Maps a signed index onto a set of `len` entries.
pub fn resolve_index(len: usize, index: i64) -> Result<usize> {
    if len == 0 {
        return Err(ScrawlError::EmptySelection);
    }

    let max = len - 1;
    let out_of_range = || ScrawlError::IndexOutOfRange { index, max };

    let magnitude = usize::try_from(index.unsigned_abs()).map_err(|_| out_of_range())?;
    if index >= 0 && magnitude <= max {
        Ok(magnitude)
    } else if index < 0 && (magnitude <= max || index == -1) {
        Ok(len - magnitude)
    } else {
        Err(out_of_range())
    }
}

/// Scans, filters and picks the entry at `index`.
pub fn select<S: DataStore>(store: &S, filter: &EntryFilter, index: i64) -> Result<ListedEntry> {
    let entries = scan(store, filter)?;
    let position = resolve_index(entries.len(), index)?;
    let entry = entries
        .into_iter()
        .nth(position)
        .ok_or(ScrawlError::EmptySelection)?;

    Ok(ListedEntry {
        index: position,
        path: store.path(&entry.file_name),
        entry,
    })
}

/// Parses an `after`/`before` bound given on the command line.
///
/// Accepts a bare integer id, a local date (`YYYY-MM-DD`, optionally with
/// `HH:MM` or `HH:MM:SS`), or a shorthand duration counted back from `now`.
pub fn parse_bound(input: &str, now: u64) -> Result<u64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScrawlError::InvalidArgument(
            "Time bound must not be empty".to_string(),
        ));
    }

    if input.bytes().all(|b| b.is_ascii_digit()) {
        return input
            .parse::<u64>()
            .map_err(|_| ScrawlError::InvalidArgument(format!("'{}' is too large", input)));
    }

    if let Some(ts) = parse_local_date(input) {
        return u64::try_from(ts).map_err(|_| {
            ScrawlError::InvalidArgument(format!("'{}' is before the Unix epoch", input))
        });
    }

    let secs = crate::duration::parse(input)?;
    Ok(now.saturating_sub(secs))
}

fn parse_local_date(input: &str) -> Option<i64> {
    let naive = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
}
