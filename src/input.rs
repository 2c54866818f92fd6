//! Reading interval streams from text.
//!
//! One interval per line, `start, end` optionally followed by `, reference`.
//! Instants are either signed integers or RFC 3339 timestamps, the latter
//! turned into Unix milliseconds. Blank lines and lines starting with `#`
//! are skipped.
//!
//! ```text
//! # start, end, reference
//! 0, 10, first
//! 2024-01-01T10:00:00Z, 2024-01-01T11:00:00Z, meeting
//! ```

use std::io::BufRead;

use chrono::DateTime;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{CoexistError, Result};
use crate::interval::{Instant, ReferencedInterval};

lazy_static! {
    static ref RE_LINE: Regex =
        Regex::new(r"^\s*(?P<start>[^,\s][^,]*?)\s*,\s*(?P<end>[^,\s][^,]*?)\s*(?:,\s*(?P<reference>.*?)\s*)?$").unwrap();
    static ref RE_INTEGER: Regex = Regex::new(r"^[+-]?\d+$").unwrap();
}

pub fn parse_instant(text: &str) -> Option<Instant> {
    if RE_INTEGER.is_match(text) {
        return text.parse::<Instant>().ok();
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.timestamp_millis())
}

/// Parses one line. `Ok(None)` is returned for blank and comment lines.
/// A missing reference becomes the empty string.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<ReferencedInterval<String>>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let parse_error = |message: String| CoexistError::Parse {
        line: line_number,
        message,
    };
    let captures = RE_LINE
        .captures(trimmed)
        .ok_or_else(|| parse_error(format!("expected 'start, end[, reference]' but found '{trimmed}'")))?;
    let instant = |name: &str| {
        let text = &captures[name];
        parse_instant(text).ok_or_else(|| parse_error(format!("'{text}' is not an instant")))
    };
    let start = instant("start")?;
    let end = instant("end")?;
    let reference = captures
        .name("reference")
        .map(|m| m.as_str().to_owned())
        .unwrap_or_default();
    let interval = ReferencedInterval::new(start, end, reference).map_err(|e| parse_error(e.to_string()))?;
    Ok(Some(interval))
}

/// Yields intervals from `reader` as their lines are read. Blank and comment
/// lines produce nothing, malformed lines produce an error.
pub fn intervals<B: BufRead>(reader: B) -> impl Iterator<Item = Result<ReferencedInterval<String>>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line {
            Ok(line) => parse_line(index + 1, &line).transpose(),
            Err(e) => Some(Err(e.into())),
        })
}

/// Reads every interval from `reader`, stopping at the first malformed line.
pub fn read_intervals<B: BufRead>(reader: B) -> Result<Vec<ReferencedInterval<String>>> {
    intervals(reader).collect()
}
