//! # Dispatch
//!
//! `run()` parses arguments, sets up logging, builds the API over a
//! [`FileStore`] and hands each subcommand to its `handle_*` function.
//! Handlers call the API, then print. Any error ends up here and becomes a
//! message on stderr plus [`ScrawlError::exit_code`].

use super::render::{print_messages, render_entry_list, render_paths, render_tags};
use super::setup::{Cli, Commands, FilterArgs, IntervalCommands, WhenArgs};
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use scrawl::api::{AddRequest, BodySource, EntryFilter, ListedEntry, ScrawlApi};
use scrawl::clock::{Clock, SystemClock};
use scrawl::config::{ScrawlConfig, DEFAULT_DATE_FORMAT};
use scrawl::duration;
use scrawl::error::{Result, ScrawlError};
use scrawl::store::fs::FileStore;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SCRAWL_LOG";

struct AppContext {
    api: ScrawlApi<FileStore>,
}

/// Runs the CLI and returns the process exit code.
pub fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            return code;
        }
    };

    init_logging(cli.verbose);

    match dispatch(cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if e.is_usage_error() {
                eprintln!("{}", "Run 'scrawl --help' for usage.".dimmed());
            }
            e.exit_code()
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, dir, .. } = cli;

    // Interval conversions never touch the store
    let command = match command {
        Some(Commands::Interval { action }) => return handle_interval(action),
        other => other,
    };

    let mut ctx = init_context(dir)?;

    match command {
        Some(Commands::Add { tags, id, encrypt }) => handle_add(&mut ctx, tags, id, encrypt),
        Some(Commands::List {
            tags,
            filter,
            simple,
        }) => handle_list(&ctx, &tags, &filter, simple),
        Some(Commands::Get {
            args,
            filter,
            simple,
        }) => handle_get(&ctx, &args, &filter, simple),
        Some(Commands::Edit { args, filter }) => handle_edit(&mut ctx, &args, &filter),
        Some(Commands::Delete { args, filter, yes }) => {
            handle_delete(&mut ctx, &args, &filter, yes)
        }
        Some(Commands::Tags { tags, filter }) => handle_tags(&ctx, &tags, &filter),
        Some(Commands::Interval { action }) => handle_interval(action),
        None => handle_list(&ctx, &[], &FilterArgs::default(), false),
    }
}

fn init_context(dir: Option<PathBuf>) -> Result<AppContext> {
    let config = ScrawlConfig::resolve(dir)?;
    debug!(dir = %config.dir.display(), "resolved config");

    let store = FileStore::new(config.dir.clone());
    let api = ScrawlApi::new(store, config);
    api.ensure_store()?;

    Ok(AppContext { api })
}

fn parse_id(raw: Option<&str>) -> Result<Option<u64>> {
    raw.map(|s| {
        s.parse::<u64>()
            .map_err(|_| ScrawlError::InvalidArgument(format!("Invalid id: {}", s)))
    })
    .transpose()
}

/// Splits `TAGS... INDEX`: a trailing signed integer is the index, anything
/// else leaves every argument as a tag and selects index 0.
fn split_index(args: &[String]) -> (&[String], i64) {
    match args.split_last() {
        Some((last, tags)) => match last.parse::<i64>() {
            Ok(index) => (tags, index),
            Err(_) => (args, 0),
        },
        None => (args, 0),
    }
}

fn build_filter(ctx: &AppContext, tags: &[String], args: &FilterArgs) -> Result<EntryFilter> {
    let id = parse_id(args.id.as_deref())?;
    ctx.api.filter(
        tags,
        id,
        args.after.as_deref(),
        args.before.as_deref(),
        args.reverse,
    )
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(bytes)?;
    out.flush()?;
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    tags: Vec<String>,
    id: Option<String>,
    encrypt: bool,
) -> Result<()> {
    let id = parse_id(id.as_deref())?;

    let source = if io::stdin().is_terminal() {
        BodySource::Editor
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        BodySource::Piped(buffer)
    };

    let result = ctx.api.add(AddRequest { id, tags, encrypt }, source)?;
    write_stdout(render_paths(&result.entry_paths).as_bytes())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, tags: &[String], args: &FilterArgs, simple: bool) -> Result<()> {
    let filter = build_filter(ctx, tags, args)?;
    let result = ctx.api.list(&filter)?;

    let output = if simple {
        render_paths(&result.entry_paths)
    } else {
        render_entry_list(
            &result.listed_entries,
            ctx.api.now(),
            &ctx.api.config().date_format,
        )?
    };
    write_stdout(output.as_bytes())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(ctx: &AppContext, args: &[String], filter: &FilterArgs, simple: bool) -> Result<()> {
    let (tags, index) = split_index(args);
    let filter = build_filter(ctx, tags, filter)?;
    let result = ctx.api.get(&filter, index, !simple)?;

    match &result.body {
        Some(body) if !simple => write_stdout(body)?,
        _ => write_stdout(render_paths(&result.entry_paths).as_bytes())?,
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, args: &[String], filter: &FilterArgs) -> Result<()> {
    let (tags, index) = split_index(args);
    let filter = build_filter(ctx, tags, filter)?;
    let result = ctx.api.edit(&filter, index)?;

    write_stdout(render_paths(&result.entry_paths).as_bytes())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(
    ctx: &mut AppContext,
    args: &[String],
    filter: &FilterArgs,
    yes: bool,
) -> Result<()> {
    let (tags, index) = split_index(args);
    let filter = build_filter(ctx, tags, filter)?;
    let result = ctx
        .api
        .delete(&filter, index, |entry| yes_or_prompt(yes, entry))?;

    write_stdout(render_paths(&result.entry_paths).as_bytes())?;
    print_messages(&result.messages);
    Ok(())
}

fn yes_or_prompt(yes: bool, entry: &ListedEntry) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    eprint!("Delete {}? [y/N] ", entry.path.display());
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(is_affirmative(&input))
}

fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

fn handle_tags(ctx: &AppContext, tags: &[String], filter: &FilterArgs) -> Result<()> {
    let filter = build_filter(ctx, tags, filter)?;
    let result = ctx.api.tags(&filter)?;

    write_stdout(render_tags(&result.tags).as_bytes())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_interval(action: IntervalCommands) -> Result<()> {
    let line = match action {
        IntervalCommands::Parse { shorthand } => duration::parse(&shorthand)?.to_string(),
        IntervalCommands::Format { seconds } => {
            let seconds = seconds.parse::<u64>().map_err(|_| {
                ScrawlError::InvalidArgument(format!("Invalid seconds: {}", seconds))
            })?;
            duration::format(seconds)
        }
        IntervalCommands::After { shorthand, when } => {
            let (base, fmt) = resolve_when(&when)?;
            duration::after(base, duration::parse(&shorthand)?, &fmt)?
        }
        IntervalCommands::Before { shorthand, when } => {
            let (base, fmt) = resolve_when(&when)?;
            duration::before(base, duration::parse(&shorthand)?, &fmt)?
        }
    };

    write_stdout(format!("{}\n", line).as_bytes())
}

fn resolve_when(when: &WhenArgs) -> Result<(u64, String)> {
    let base = match when.base.as_deref() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| ScrawlError::InvalidArgument(format!("Invalid base: {}", raw)))?,
        None => SystemClock.now(),
    };
    let fmt = when
        .format
        .clone()
        .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
    Ok((base, fmt))
}
