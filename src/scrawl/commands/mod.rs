//! # Command Layer
//!
//! One module per operation. Commands take a [`DataStore`](crate::store::DataStore)
//! plus whatever capabilities they need (clock, editor, cipher) and return a
//! [`CmdResult`]. They never print and never exit.
//!
//! Every command except `add` starts from the same pipeline in [`select`]:
//! list the directory once, keep names that decode as entries, apply the
//! [`EntryFilter`](select::EntryFilter), then order the survivors.

use crate::model::Entry;
use std::path::PathBuf;

pub mod add;
pub mod delete;
pub mod edit;
pub mod get;
pub mod list;
pub mod select;
pub mod tags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

/// An entry at its position in the filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub index: usize,
    pub entry: Entry,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_entries: Vec<ListedEntry>,
    pub entry_paths: Vec<PathBuf>,
    pub body: Option<Vec<u8>>,
    pub tags: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_entries(mut self, entries: Vec<ListedEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_entry_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.entry_paths = paths;
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}
