//! # CLI Layer
//!
//! The only place that knows about the terminal: argument parsing, stdin,
//! stdout/stderr, prompts and the process exit code.
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` plus one handler per subcommand
//! - `render`: `CmdResult` pieces to text
//!
//! Output convention: stdout carries data (paths, bodies, tags, listings) so
//! it can be piped; messages, prompts and errors go to stderr.

mod commands;
mod render;
pub mod setup;

pub use commands::run;
