//! # Rendering
//!
//! Turns `CmdResult` pieces into terminal text. Functions return strings and
//! leave printing to the handlers, so output can be tested without a terminal.
//!
//! Layout math (column widths) is done on display width, since the date
//! format is user-configurable and may produce non-ASCII text.

use colored::Colorize;
use scrawl::api::{CmdMessage, ListedEntry, MessageLevel};
use scrawl::duration::{self, DurationError};
use scrawl::error::Result;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

const LOCK_MARKER: &str = "⚿";
const NO_DATE: &str = "-";

struct Row {
    index: String,
    id: String,
    date: String,
    age: String,
    tags: String,
    encrypted: bool,
}

fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(fill), s)
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|c| c.width()).max().unwrap_or(0)
}

/// Age of an entry as shorthand; `0s` for now or the future.
pub fn format_age(id: u64, now: u64) -> String {
    let age = duration::format(now.saturating_sub(id));
    if age.is_empty() {
        "0s".to_string()
    } else {
        age
    }
}

/// Date column for an id; ids beyond the calendar get a placeholder.
fn render_date(id: u64, date_format: &str) -> Result<String> {
    match duration::render_timestamp(id, date_format) {
        Ok(date) => Ok(date),
        Err(DurationError::TimestampOutOfRange(_)) => Ok(NO_DATE.to_string()),
        Err(e) => Err(e.into()),
    }
}

/// Rich listing: `INDEX  ID  DATE  AGE  tags`.
pub fn render_entry_list(entries: &[ListedEntry], now: u64, date_format: &str) -> Result<String> {
    let rows = entries
        .iter()
        .map(|le| {
            let meta = &le.entry.meta;
            Ok(Row {
                index: le.index.to_string(),
                id: meta.id.to_string(),
                date: render_date(meta.id, date_format)?,
                age: format_age(meta.id, now),
                tags: meta.tags.join(","),
                encrypted: meta.encrypted,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let index_w = column_width(rows.iter().map(|r| r.index.as_str()));
    let id_w = column_width(rows.iter().map(|r| r.id.as_str()));
    let date_w = column_width(rows.iter().map(|r| r.date.as_str()));
    let age_w = column_width(rows.iter().map(|r| r.age.as_str()));

    let mut output = String::new();
    for row in &rows {
        let marker = if row.encrypted { LOCK_MARKER } else { " " };
        output.push_str(&format!(
            "{}  {}  {}  {}  {} {}\n",
            pad_left(&row.index, index_w).yellow(),
            pad_right(&row.id, id_w),
            pad_right(&row.date, date_w).dimmed(),
            pad_left(&row.age, age_w).cyan(),
            marker,
            row.tags.green()
        ));
    }
    Ok(output)
}

/// One path per line.
pub fn render_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect()
}

/// One tag per line.
pub fn render_tags(tags: &[String]) -> String {
    tags.iter().map(|t| format!("{}\n", t)).collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => eprintln!("{}", message.content.green()),
        }
    }
}
