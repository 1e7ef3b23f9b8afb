//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for store operations, whatever the UI.
//!
//! It owns the store and the injected capabilities (clock, editor, cipher)
//! and hands the right ones to each command. It does no printing and holds no
//! business logic.
//!
//! ## Generic Over DataStore
//!
//! `ScrawlApi<S: DataStore>` is generic over the storage backend:
//! - Production: `ScrawlApi<FileStore>`
//! - Testing: `ScrawlApi<InMemoryStore>`
//!
//! Capabilities default to the real ones built from [`ScrawlConfig`] and can be
//! swapped with the `with_*` builders.

use crate::cipher::{Cipher, GpgCipher};
use crate::clock::{Clock, SystemClock};
use crate::commands;
use crate::config::ScrawlConfig;
use crate::editor::{Editor, ExternalEditor};
use crate::error::Result;
use crate::store::DataStore;

/// The main API facade for scrawl operations.
pub struct ScrawlApi<S: DataStore> {
    store: S,
    config: ScrawlConfig,
    clock: Box<dyn Clock>,
    editor: Box<dyn Editor>,
    cipher: Box<dyn Cipher>,
}

impl<S: DataStore> ScrawlApi<S> {
    pub fn new(store: S, config: ScrawlConfig) -> Self {
        let editor = ExternalEditor::new(config.editor.clone());
        let cipher = GpgCipher::new(config.gpg_key.clone());
        Self {
            store,
            config,
            clock: Box::new(SystemClock),
            editor: Box::new(editor),
            cipher: Box::new(cipher),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_editor(mut self, editor: impl Editor + 'static) -> Self {
        self.editor = Box::new(editor);
        self
    }

    pub fn with_cipher(mut self, cipher: impl Cipher + 'static) -> Self {
        self.cipher = Box::new(cipher);
        self
    }

    pub fn config(&self) -> &ScrawlConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Creates the store directory if needed.
    pub fn ensure_store(&self) -> Result<()> {
        self.store.ensure_ready()
    }

    /// Builds a filter, resolving `after`/`before` bounds against the clock.
    pub fn filter<T: AsRef<str>>(
        &self,
        tags: &[T],
        id: Option<u64>,
        after: Option<&str>,
        before: Option<&str>,
        reverse: bool,
    ) -> Result<EntryFilter> {
        let now = self.now();
        let after = after.map(|b| parse_bound(b, now)).transpose()?;
        let before = before.map(|b| parse_bound(b, now)).transpose()?;

        Ok(EntryFilter::new()
            .with_tags(tags)?
            .with_id(id)
            .with_after(after)
            .with_before(before)
            .with_reverse(reverse))
    }

    pub fn add(&mut self, request: AddRequest, source: BodySource) -> Result<CmdResult> {
        commands::add::run(
            &mut self.store,
            self.clock.as_ref(),
            self.editor.as_ref(),
            self.cipher.as_ref(),
            request,
            source,
        )
    }

    pub fn list(&self, filter: &EntryFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn get(&self, filter: &EntryFilter, index: i64, read_body: bool) -> Result<CmdResult> {
        commands::get::run(&self.store, self.cipher.as_ref(), filter, index, read_body)
    }

    pub fn edit(&mut self, filter: &EntryFilter, index: i64) -> Result<CmdResult> {
        commands::edit::run(
            &mut self.store,
            self.editor.as_ref(),
            self.cipher.as_ref(),
            filter,
            index,
        )
    }

    pub fn delete<F>(&mut self, filter: &EntryFilter, index: i64, confirm: F) -> Result<CmdResult>
    where
        F: FnOnce(&ListedEntry) -> Result<bool>,
    {
        commands::delete::run(&mut self.store, filter, index, confirm)
    }

    pub fn tags(&self, filter: &EntryFilter) -> Result<CmdResult> {
        commands::tags::run(&self.store, filter)
    }
}

pub use crate::commands::add::{AddRequest, BodySource};
pub use crate::commands::select::{parse_bound, EntryFilter};
pub use crate::commands::{CmdMessage, CmdResult, ListedEntry, MessageLevel};
