//! # Entries and File Names
//!
//! An entry is one file in the store directory. All of its metadata lives in
//! the file name:
//!
//! ```text
//! 1718040000_work_todo.asc
//! └───┬────┘ └──┬────┘ └┬┘
//!     id      tags    encrypted marker (optional)
//! ```
//!
//! The grammar is `digits ( "_" alnum+ )* [".asc"]`. Tags are restricted to
//! ASCII letters and digits so the `_` separator can never appear inside one.
//! Any other file in the directory is not an entry and is ignored.
//!
//! Tags are case-insensitive: they are lowercased when decoded and when a new
//! entry is named. Order is preserved and duplicates are kept.

use std::fmt;

/// Suffix marking an entry whose body is an ASCII-armored encrypted container.
pub const ENCRYPTED_SUFFIX: &str = ".asc";

/// Separator between the id and each tag.
pub const TAG_SEPARATOR: char = '_';

/// Metadata decoded from (or encoded into) an entry file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryMeta {
    pub id: u64,
    pub tags: Vec<String>,
    pub encrypted: bool,
}

impl EntryMeta {
    /// Builds metadata for a new entry, validating and lowercasing the tags.
    pub fn new<I, T>(id: u64, tags: I) -> Result<Self, TagValidationError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let tags = tags
            .into_iter()
            .map(|t| normalize_tag(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id,
            tags,
            encrypted: false,
        })
    }

    pub fn with_encrypted(mut self, encrypted: bool) -> Self {
        self.encrypted = encrypted;
        self
    }

    /// True when no tags are wanted, or when any wanted tag is present.
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        wanted.is_empty()
            || wanted
                .iter()
                .any(|w| self.tags.iter().any(|t| t.eq_ignore_ascii_case(w)))
    }
}

impl fmt::Display for EntryMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_filename(self))
    }
}

/// A store member: its on-disk file name plus the decoded metadata.
///
/// The file name is kept verbatim because decoding lowercases tags, so the
/// name cannot always be rebuilt from the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub file_name: String,
    pub meta: EntryMeta,
}

impl Entry {
    /// Decodes a directory listing name, returning `None` for non-entries.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        decode_filename(file_name).map(|meta| Self {
            file_name: file_name.to_string(),
            meta,
        })
    }
}

/// Encodes metadata as a file name.
///
/// # Examples
/// ```
/// use scrawl::model::{encode_filename, EntryMeta};
///
/// let meta = EntryMeta::new(1700000000, ["Foo", "bar"]).unwrap();
/// assert_eq!(encode_filename(&meta), "1700000000_foo_bar");
/// assert_eq!(encode_filename(&meta.with_encrypted(true)), "1700000000_foo_bar.asc");
/// ```
pub fn encode_filename(meta: &EntryMeta) -> String {
    let mut name = meta.id.to_string();
    for tag in &meta.tags {
        name.push(TAG_SEPARATOR);
        name.push_str(tag);
    }
    if meta.encrypted {
        name.push_str(ENCRYPTED_SUFFIX);
    }
    name
}

/// Decodes a file name, or `None` if it is not an entry name.
///
/// # Examples
/// ```
/// use scrawl::model::decode_filename;
///
/// let meta = decode_filename("42_Work_todo").unwrap();
/// assert_eq!(meta.id, 42);
/// assert_eq!(meta.tags, vec!["work", "todo"]);
/// assert!(decode_filename(".hidden").is_none());
/// assert!(decode_filename("42_to-do").is_none());
/// ```
pub fn decode_filename(name: &str) -> Option<EntryMeta> {
    let (stem, encrypted) = match name.strip_suffix(ENCRYPTED_SUFFIX) {
        Some(stem) => (stem, true),
        None => (name, false),
    };

    let mut parts = stem.split(TAG_SEPARATOR);
    let id_part = parts.next()?;
    if id_part.is_empty() || !id_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = id_part.parse::<u64>().ok()?;

    let mut tags = Vec::new();
    for part in parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        tags.push(part.to_ascii_lowercase());
    }

    Some(EntryMeta {
        id,
        tags,
        encrypted,
    })
}

/// Validates a tag and returns its lowercase form.
pub fn normalize_tag(tag: &str) -> Result<String, TagValidationError> {
    if tag.is_empty() {
        return Err(TagValidationError::Empty);
    }
    if let Some(ch) = tag.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(TagValidationError::InvalidCharacter {
            tag: tag.to_string(),
            ch,
        });
    }
    Ok(tag.to_ascii_lowercase())
}

/// Error type for tag validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    /// Tag is empty
    Empty,
    /// Tag contains something other than ASCII letters and digits
    InvalidCharacter { tag: String, ch: char },
}

impl fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValidationError::Empty => write!(f, "tag cannot be empty"),
            TagValidationError::InvalidCharacter { tag, ch } => write!(
                f,
                "'{}' contains invalid character '{}' (only letters and digits allowed)",
                tag, ch
            ),
        }
    }
}

impl std::error::Error for TagValidationError {}
