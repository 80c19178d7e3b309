//! # Record - DRK session record metadata
//!
//! Reads the handful of text fields a DRK session recording carries at
//! fixed byte offsets, and derives the standardized file name for it.
//!
//! ## Field layout
//!
//! ```text
//! ┌──────────────┬─────────────────┬───────────────────────────┐
//! │ Field        │ Byte range      │ Encoding                  │
//! ├──────────────┼─────────────────┼───────────────────────────┤
//! │ timestamp    │ [76, 94)        │ "YY-MM-DD HH:MM:SS" + NUL │
//! │ motorcycle   │ [1088, 1127)    │ text + NUL                │
//! │ track        │ [1128, 1167)    │ text + NUL                │
//! │ rider        │ [1168, 1207)    │ text + NUL                │
//! └──────────────┴─────────────────┴───────────────────────────┘
//! ```
//!
//! Everything else in the file is opaque and is never modified. The record
//! also embeds a checksum of unknown algorithm, which is why the
//! [`TRACK_NAME_MAPPING`] is exposed but never written back.
//!
//! ## Example
//!
//! ```rust,no_run
//! use record::RecordHeader;
//!
//! let data = std::fs::read("old/Chayka/J Smith/session.drk").unwrap();
//! let header = RecordHeader::parse(&data).unwrap();
//! println!("{}", header.file_name("drk"));
//! ```

mod format;
mod header;
mod timestamp;
mod tracks;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use format::{
    ValueOffset, MOTORCYCLE_NAME_OFFSET, MIN_RECORD_LEN, RIDER_NAME_OFFSET, TIMESTAMP_OFFSET,
    TRACK_NAME_OFFSET,
};
pub use header::RecordHeader;
pub use timestamp::{SessionTimestamp, COMPACT_FORMAT, RECORD_FORMAT};
pub use tracks::{canonical_track_name, TRACK_NAME_MAPPING};

use thiserror::Error;

/// Errors raised while reading metadata out of a record buffer.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The buffer ends before the field's byte range does.
    #[error("{field}: range {start}..{end} exceeds record length {len}")]
    Truncated {
        field: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },

    /// No NUL terminator inside the field's byte range.
    #[error("{field}: no NUL terminator in range {start}..{end}")]
    Unterminated {
        field: &'static str,
        start: usize,
        end: usize,
    },

    /// The timestamp field does not follow `YY-MM-DD HH:MM:SS`.
    #[error("session timestamp {text:?} does not match YY-MM-DD HH:MM:SS")]
    TimestampLayout { text: String },

    /// The timestamp is laid out correctly but names no real date or time.
    #[error("invalid session timestamp {text:?}: {source}")]
    Timestamp {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[cfg(test)]
mod tests;
