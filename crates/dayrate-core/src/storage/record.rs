//! Record text format
//!
//! One line per entry, `<RFC 3339 timestamp>\t<integer>`, lines joined with
//! `\n`. Parsing is lenient: lines that do not match are skipped.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::RatingEntry;

const FIELD_SEPARATOR: char = '\t';

/// Parse record text into entries, in file order
pub fn parse_record(text: &str) -> Vec<RatingEntry> {
    text.lines().filter_map(parse_line).collect()
}

/// Parse a single record line
///
/// Returns `None` for lines without a tab, with an unparseable timestamp,
/// or with a non-integer value. The date and time must be joined by `T`.
pub fn parse_line(line: &str) -> Option<RatingEntry> {
    let (date, value) = line.split_once(FIELD_SEPARATOR)?;
    // RFC 3339 parsing alone also accepts a space here
    if !matches!(date.as_bytes().get(10), Some(b'T' | b't')) {
        return None;
    }
    let date = DateTime::parse_from_rfc3339(date).ok()?.with_timezone(&Utc);
    let value = value.parse::<i64>().ok()?;
    Some(RatingEntry::new(date, value))
}

/// Serialize entries, ascending by date, one per line
pub fn format_record(entries: &[RatingEntry]) -> String {
    let mut sorted: Vec<&RatingEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.date);
    sorted
        .iter()
        .map(|entry| format_line(entry))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_line(entry: &RatingEntry) -> String {
    format!(
        "{}{}{}",
        entry.date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        FIELD_SEPARATOR,
        entry.value
    )
}
