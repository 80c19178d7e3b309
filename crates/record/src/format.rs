//! Fixed byte offsets of the metadata fields and the NUL-terminated field
//! extractor.

use crate::RecordError;

/// A `[start, end)` byte range holding one NUL-terminated text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueOffset {
    /// Field name, used in error messages.
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Session start, `YY-MM-DD HH:MM:SS`.
pub const TIMESTAMP_OFFSET: ValueOffset = ValueOffset::new("timestamp", 76, 94);
pub const MOTORCYCLE_NAME_OFFSET: ValueOffset = ValueOffset::new("motorcycle", 1088, 1127);
pub const TRACK_NAME_OFFSET: ValueOffset = ValueOffset::new("track", 1128, 1167);
pub const RIDER_NAME_OFFSET: ValueOffset = ValueOffset::new("rider", 1168, 1207);

/// Smallest buffer that covers every field.
pub const MIN_RECORD_LEN: usize = RIDER_NAME_OFFSET.end;

impl ValueOffset {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, start, end }
    }

    /// Width of the range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the raw, untruncated slice of `data` covered by this range.
    pub fn raw<'a>(&self, data: &'a [u8]) -> Result<&'a [u8], RecordError> {
        if self.start > self.end || self.end > data.len() {
            return Err(RecordError::Truncated {
                field: self.name,
                start: self.start,
                end: self.end,
                len: data.len(),
            });
        }
        Ok(&data[self.start..self.end])
    }

    /// Extracts the field from `data`.
    ///
    /// Returns the raw slice together with the text that precedes the first
    /// NUL byte inside it. Invalid UTF-8 is replaced rather than rejected, so
    /// a field always decodes once it is terminated.
    ///
    /// # Errors
    ///
    /// [`RecordError::Truncated`] when `data` is shorter than the range,
    /// [`RecordError::Unterminated`] when the range holds no NUL byte.
    pub fn scan<'a>(&self, data: &'a [u8]) -> Result<(&'a [u8], String), RecordError> {
        let raw = self.raw(data)?;
        let nul = raw
            .iter()
            .position(|&b| b == 0)
            .ok_or(RecordError::Unterminated {
                field: self.name,
                start: self.start,
                end: self.end,
            })?;
        Ok((raw, String::from_utf8_lossy(&raw[..nul]).into_owned()))
    }
}
