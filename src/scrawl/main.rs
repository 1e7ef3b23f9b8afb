//! # Scrawl CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and turns its outcome into a process exit code.

mod cli;

fn main() {
    std::process::exit(cli::run());
}
