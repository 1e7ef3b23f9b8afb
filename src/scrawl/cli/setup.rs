use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrawl", bin_name = "scrawl", version)]
#[command(about = "Tagged, timestamped text snippets kept as plain files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Store directory (overrides SCRAWL_DIR)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Criteria shared by every command that reads the store.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Only the entry with this id
    #[arg(short, long, value_name = "ID")]
    pub id: Option<String>,

    /// Only entries at or after WHEN (id, YYYY-MM-DD[ HH:MM[:SS]], or a duration ago like 1d)
    #[arg(short, long, value_name = "WHEN")]
    pub after: Option<String>,

    /// Only entries at or before WHEN (id, YYYY-MM-DD[ HH:MM[:SS]], or a duration ago like 1w)
    #[arg(short, long, value_name = "WHEN")]
    pub before: Option<String>,

    /// Oldest first
    #[arg(short, long)]
    pub reverse: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an entry, reading the body from stdin or the editor
    #[command(alias = "a")]
    Add {
        /// Tags for the new entry (letters and digits)
        tags: Vec<String>,

        /// Use this id instead of the current time
        #[arg(short, long, value_name = "ID")]
        id: Option<String>,

        /// Encrypt the body with gpg
        #[arg(short, long)]
        encrypt: bool,
    },

    /// List entries
    #[command(alias = "ls")]
    List {
        /// Only entries with any of these tags
        tags: Vec<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Print bare paths
        #[arg(short, long)]
        simple: bool,
    },

    /// Print an entry's body
    #[command(alias = "g")]
    Get {
        /// Tags, then an optional index (negative counts from the end)
        #[arg(allow_negative_numbers = true, value_name = "TAGS... INDEX")]
        args: Vec<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Print the path instead of the body
        #[arg(short, long)]
        simple: bool,
    },

    /// Open an entry in the editor
    #[command(alias = "e")]
    Edit {
        /// Tags, then an optional index (negative counts from the end)
        #[arg(allow_negative_numbers = true, value_name = "TAGS... INDEX")]
        args: Vec<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Tags, then an optional index (negative counts from the end)
        #[arg(allow_negative_numbers = true, value_name = "TAGS... INDEX")]
        args: Vec<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the distinct tags of matching entries
    Tags {
        /// Only entries with any of these tags
        tags: Vec<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Convert shorthand durations (e.g. 1d2h30m)
    Interval {
        #[command(subcommand)]
        action: IntervalCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum IntervalCommands {
    /// Shorthand to seconds
    Parse { shorthand: String },

    /// Seconds to shorthand
    Format { seconds: String },

    /// Date a duration after BASE (default: now)
    After {
        shorthand: String,

        #[command(flatten)]
        when: WhenArgs,
    },

    /// Date a duration before BASE (default: now)
    Before {
        shorthand: String,

        #[command(flatten)]
        when: WhenArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct WhenArgs {
    /// Unix timestamp to start from
    #[arg(long, value_name = "TS")]
    pub base: Option<String>,

    /// strftime-style output format
    #[arg(short, long, value_name = "FMT")]
    pub format: Option<String>,
}
