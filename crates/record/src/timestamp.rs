use chrono::NaiveDateTime;
use std::fmt;

use crate::RecordError;

/// Layout of the timestamp text stored in the record (two-digit year).
/// Used for display only; parsing goes through [`SessionTimestamp::parse`].
pub const RECORD_FORMAT: &str = "%y-%m-%d %H:%M:%S";

/// Sortable layout used in file names.
pub const COMPACT_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Full-year layout the record text is expanded to before parsing.
const EXPANDED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Two-digit years at or above this belong to the 1900s.
const CENTURY_PIVOT: u32 = 69;

/// Session start time as recorded by the logger (no time zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionTimestamp(NaiveDateTime);

impl SessionTimestamp {
    /// Parses `YY-MM-DD HH:MM:SS`. Years `00..=68` map to 20xx and
    /// `69..=99` to 19xx.
    ///
    /// Year, month, day, minute and second must be exactly two digits; the
    /// hour may be one or two.
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        let expanded = expand(text).ok_or_else(|| RecordError::TimestampLayout {
            text: text.to_string(),
        })?;
        NaiveDateTime::parse_from_str(&expanded, EXPANDED_FORMAT)
            .map(SessionTimestamp)
            .map_err(|source| RecordError::Timestamp {
                text: text.to_string(),
                source,
            })
    }

    /// `YYYYMMDD_HHMMSS`.
    #[must_use]
    pub fn compact(&self) -> String {
        self.0.format(COMPACT_FORMAT).to_string()
    }
}

impl fmt::Display for SessionTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RECORD_FORMAT))
    }
}

/// Checks the fixed layout and rewrites the text with a four-digit year.
/// Range checks (month 13, Feb 30, hour 25) are left to chrono.
fn expand(text: &str) -> Option<String> {
    let year = digits(text, 0, 2)?;
    let month = digits(text, 3, 5)?;
    let day = digits(text, 6, 8)?;
    if !(byte_at(text, 2, b'-') && byte_at(text, 5, b'-') && byte_at(text, 8, b' ')) {
        return None;
    }

    let hour_len = if digits(text, 10, 11).is_some() { 2 } else { 1 };
    let hour = digits(text, 9, 9 + hour_len)?;
    let m = 9 + hour_len;
    let minute = digits(text, m + 1, m + 3)?;
    let second = digits(text, m + 4, m + 6)?;
    if !(byte_at(text, m, b':') && byte_at(text, m + 3, b':')) || text.len() != m + 6 {
        return None;
    }

    let yy: u32 = year.parse().ok()?;
    let year = if yy >= CENTURY_PIVOT { 1900 + yy } else { 2000 + yy };
    Some(format!("{year}-{month}-{day} {hour}:{minute}:{second}"))
}

fn digits(text: &str, start: usize, end: usize) -> Option<&str> {
    text.get(start..end)
        .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
}

fn byte_at(text: &str, i: usize, want: u8) -> bool {
    text.as_bytes().get(i) == Some(&want)
}
