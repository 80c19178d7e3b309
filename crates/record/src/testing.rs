//! Synthetic record buffers for tests and benches.
//!
//! Available under `cfg(test)` and the `test-util` feature.

use crate::{
    ValueOffset, MIN_RECORD_LEN, MOTORCYCLE_NAME_OFFSET, RIDER_NAME_OFFSET, TIMESTAMP_OFFSET,
    TRACK_NAME_OFFSET,
};

/// Bytes of sample payload after the header fields.
pub const PAYLOAD_LEN: usize = 512;

/// Puts `text` followed by a NUL at the start of `offset` inside `buf`.
///
/// # Panics
///
/// When `text` plus its terminator does not fit the range.
pub fn put_field(buf: &mut [u8], offset: ValueOffset, text: &str) {
    assert!(text.len() < offset.len(), "field too long for its range");
    buf[offset.start..offset.start + text.len()].copy_from_slice(text.as_bytes());
    buf[offset.start + text.len()] = 0;
}

/// Builds a record with every header field filled in. Bytes outside the
/// fields are a non-zero pattern, so a missing terminator is noticed and
/// copies can be compared byte for byte.
pub fn make_record(track: &str, rider: &str, motorcycle: &str, timestamp: &str) -> Vec<u8> {
    let mut buf: Vec<u8> = (0..MIN_RECORD_LEN + PAYLOAD_LEN)
        .map(|i| (i % 199) as u8 | 1)
        .collect();
    put_field(&mut buf, TRACK_NAME_OFFSET, track);
    put_field(&mut buf, RIDER_NAME_OFFSET, rider);
    put_field(&mut buf, MOTORCYCLE_NAME_OFFSET, motorcycle);
    put_field(&mut buf, TIMESTAMP_OFFSET, timestamp);
    buf
}
