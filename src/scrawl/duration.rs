//! # Shorthand Durations
//!
//! Compact duration strings such as `1d2h30m` or `2Gy`, converted to and from a
//! plain count of seconds.
//!
//! ## Grammar
//!
//! ```text
//! duration := token* digits?
//! token    := digits? scale? unit
//! scale    := D | H | K | M | G | T      (10, 10², 10³, 10⁶, 10⁹, 10¹²)
//! unit     := s | m | h | d | w | y      (1, 60, 3600, 86400, 604800, 31557600)
//! ```
//!
//! Omitted digits count as `1` (`h` is one hour). A trailing run of digits with
//! no unit is taken as plain seconds (`1m30` is 90). Tokens add up. Parsing is a
//! single left-to-right pass.
//!
//! Letters are case sensitive: `M` is the mega scale, `m` is minutes.
//!
//! ## Canonical form
//!
//! [`format`] writes units from largest to smallest and skips zero counts, so
//! `format(90)` is `1m30s` and `format(0)` is the empty string. Scale letters
//! are accepted by [`parse`] only and never produced by [`format`].

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, TimeZone};
use thiserror::Error;

/// Units from largest to smallest, with their length in seconds.
pub const UNITS: [(char, u64); 6] = [
    ('y', 31_557_600),
    ('w', 604_800),
    ('d', 86_400),
    ('h', 3_600),
    ('m', 60),
    ('s', 1),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("expected a unit after the scale letter at end of input (position {pos})")]
    UnexpectedEnd { pos: usize },

    #[error("duration is too large")]
    Overflow,

    #[error("timestamp {0} cannot be represented as a date")]
    TimestampOutOfRange(u64),

    #[error("invalid date format '{0}'")]
    InvalidFormat(String),
}

fn unit_seconds(unit: char) -> Option<u64> {
    UNITS
        .iter()
        .find(|(letter, _)| *letter == unit)
        .map(|(_, secs)| *secs)
}

fn scale_factor(scale: char) -> Option<u64> {
    match scale {
        'D' => Some(10),
        'H' => Some(100),
        'K' => Some(1_000),
        'M' => Some(1_000_000),
        'G' => Some(1_000_000_000),
        'T' => Some(1_000_000_000_000),
        _ => None,
    }
}

/// Parses a shorthand duration into seconds.
///
/// # Examples
/// ```
/// use scrawl::duration::parse;
///
/// assert_eq!(parse("1d").unwrap(), 86_400);
/// assert_eq!(parse("43m20s").unwrap(), 2_600);
/// assert_eq!(parse("1Ms").unwrap(), 1_000_000);
/// assert!(parse("3x").is_err());
/// ```
pub fn parse(input: &str) -> Result<u64, DurationError> {
    let mut total: u64 = 0;
    let mut digits: Option<u64> = None;
    let mut chars = input.chars().enumerate();

    while let Some((pos, ch)) = chars.next() {
        if let Some(d) = ch.to_digit(10) {
            let value = digits
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(d)))
                .ok_or(DurationError::Overflow)?;
            digits = Some(value);
            continue;
        }

        let count = digits.take().unwrap_or(1);

        let (count, unit, unit_pos) = match scale_factor(ch) {
            Some(factor) => {
                let scaled = count.checked_mul(factor).ok_or(DurationError::Overflow)?;
                match chars.next() {
                    Some((next_pos, next)) => (scaled, next, next_pos),
                    None => return Err(DurationError::UnexpectedEnd { pos: pos + 1 }),
                }
            }
            None => (count, ch, pos),
        };

        let secs = unit_seconds(unit).ok_or(DurationError::UnexpectedChar {
            ch: unit,
            pos: unit_pos,
        })?;

        total = count
            .checked_mul(secs)
            .and_then(|v| total.checked_add(v))
            .ok_or(DurationError::Overflow)?;
    }

    // Bare trailing digits are plain seconds
    if let Some(rest) = digits {
        total = total.checked_add(rest).ok_or(DurationError::Overflow)?;
    }

    Ok(total)
}

/// Renders seconds in canonical shorthand.
///
/// # Examples
/// ```
/// use scrawl::duration::format;
///
/// assert_eq!(format(0), "");
/// assert_eq!(format(90), "1m30s");
/// assert_eq!(format(86_400), "1d");
/// ```
pub fn format(seconds: u64) -> String {
    let mut remaining = seconds;
    let mut out = String::new();

    for (unit, secs) in UNITS {
        let count = remaining / secs;
        if count > 0 {
            out.push_str(&format!("{}{}", count, unit));
            remaining %= secs;
        }
    }

    out
}

/// Renders `base + seconds` with a strftime-style format, in local time.
pub fn after(base: u64, seconds: u64, date_format: &str) -> Result<String, DurationError> {
    let target = base.checked_add(seconds).ok_or(DurationError::Overflow)?;
    render_timestamp(target, date_format)
}

/// Renders `base - seconds` with a strftime-style format, in local time.
///
/// Saturates at the Unix epoch.
pub fn before(base: u64, seconds: u64, date_format: &str) -> Result<String, DurationError> {
    render_timestamp(base.saturating_sub(seconds), date_format)
}

/// Renders a Unix timestamp with a strftime-style format, in local time.
pub fn render_timestamp(timestamp: u64, date_format: &str) -> Result<String, DurationError> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(DurationError::InvalidFormat(date_format.to_string()));
    }

    let secs =
        i64::try_from(timestamp).map_err(|_| DurationError::TimestampOutOfRange(timestamp))?;
    let datetime = Local
        .timestamp_opt(secs, 0)
        .single()
        .ok_or(DurationError::TimestampOutOfRange(timestamp))?;

    Ok(datetime.format(date_format).to_string())
}
