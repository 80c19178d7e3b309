use crate::format::{
    MOTORCYCLE_NAME_OFFSET, RIDER_NAME_OFFSET, TIMESTAMP_OFFSET, TRACK_NAME_OFFSET,
};
use crate::{RecordError, SessionTimestamp};

/// The metadata fields of one session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub track: String,
    pub rider: String,
    pub motorcycle: String,
    pub timestamp: SessionTimestamp,
}

impl RecordHeader {
    /// Reads all four fields from a full record buffer.
    ///
    /// Fields are extracted in a fixed order (track, rider, motorcycle,
    /// timestamp); the first failure is returned.
    pub fn parse(data: &[u8]) -> Result<Self, RecordError> {
        let (_, track) = TRACK_NAME_OFFSET.scan(data)?;
        let (_, rider) = RIDER_NAME_OFFSET.scan(data)?;
        let (_, motorcycle) = MOTORCYCLE_NAME_OFFSET.scan(data)?;
        let (_, timestamp) = TIMESTAMP_OFFSET.scan(data)?;
        let timestamp = SessionTimestamp::parse(&timestamp)?;

        Ok(Self {
            track,
            rider,
            motorcycle,
            timestamp,
        })
    }

    /// File stem without extension:
    /// `<rider>_<motorcycle>_<track>_<YYYYMMDD_HHMMSS>`.
    ///
    /// `+` is dropped from the motorcycle name and spaces in the track name
    /// become `-`. Path separators in any field become `-` as well.
    #[must_use]
    pub fn file_stem(&self) -> String {
        [
            strip_separators(&self.rider),
            strip_separators(&self.motorcycle.replace('+', "")),
            strip_separators(&self.track.replace(' ', "-")),
            self.timestamp.compact(),
        ]
        .join("_")
    }

    /// New file name for the record, `ext` given without the leading dot.
    #[must_use]
    pub fn file_name(&self, ext: &str) -> String {
        format!("{}.{}", self.file_stem(), ext)
    }
}

fn strip_separators(s: &str) -> String {
    s.replace(['/', '\\'], "-")
}
