//! # Scrawl Architecture
//!
//! Scrawl keeps text snippets as plain files in one directory. A file's name is
//! its whole index: a numeric id (normally the Unix time it was created)
//! followed by `_tag` suffixes, plus `.asc` when the body is encrypted.
//!
//! ```text
//! ~/.scrawl/
//! ├── 1718040000_work_todo      # plain body
//! ├── 1718043600_ideas          # plain body
//! ├── 1718050000_keys.asc       # ASCII-armored encrypted body
//! └── config.json               # optional settings, not an entry
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, prompts, exit codes    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store and the clock/editor/cipher capabilities  │
//! │  - Builds filters, dispatches to commands                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - scan → filter → order → resolve index → act              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait: FileStore, InMemoryStore                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//! External programs (the editor, gpg) sit behind the [`editor::Editor`] and
//! [`cipher::Cipher`] traits, and the current time behind [`clock::Clock`], so
//! command tests run without spawning anything.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: add, list, get, edit, delete, tags and the selection pipeline
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: File name grammar (`encode_filename` / `decode_filename`)
//! - [`duration`]: Shorthand durations (`1d2h`) to and from seconds
//! - [`config`]: Store directory and settings resolution
//! - [`clock`], [`editor`], [`cipher`]: Injected capabilities
//! - [`error`]: Error types and exit codes

pub mod api;
pub mod cipher;
pub mod clock;
pub mod commands;
pub mod config;
pub mod duration;
pub mod editor;
pub mod error;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
