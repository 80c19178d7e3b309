use super::*;
use crate::*;

// -------------------- Field extraction --------------------

#[test]
fn scan_returns_text_before_first_nul() {
    let off = ValueOffset::new("t", 4, 12);
    let mut data = vec![0xFFu8; 16];
    data[4..12].copy_from_slice(b"abc\0def\0");

    let (raw, text) = off.scan(&data).unwrap();
    assert_eq!(text, "abc");
    assert_eq!(raw, b"abc\0def\0");
}

#[test]
fn scan_keeps_raw_slice_untruncated() {
    let buf = make_record("Chayka", "J Smith", "Honda", "23-05-10 14:30:00");
    let (raw, text) = TRACK_NAME_OFFSET.scan(&buf).unwrap();
    assert_eq!(text, "Chayka");
    assert_eq!(raw.len(), TRACK_NAME_OFFSET.len());
    assert_eq!(&raw[..6], b"Chayka");
}

#[test]
fn scan_empty_field() {
    let off = ValueOffset::new("t", 0, 4);
    let (_, text) = off.scan(&[0, b'x', b'y', b'z']).unwrap();
    assert_eq!(text, "");
}

#[test]
fn nul_in_last_byte_of_range() {
    let off = ValueOffset::new("t", 0, 4);
    let (_, text) = off.scan(b"abc\0rest").unwrap();
    assert_eq!(text, "abc");
}

#[test]
fn nul_after_range_is_not_seen() {
    let off = ValueOffset::new("t", 0, 3);
    let err = off.scan(b"abc\0").unwrap_err();
    assert!(matches!(
        err,
        RecordError::Unterminated { field: "t", start: 0, end: 3 }
    ));
}

#[test]
fn short_buffer_is_truncated_error() {
    let err = RIDER_NAME_OFFSET.scan(&[0u8; 100]).unwrap_err();
    match err {
        RecordError::Truncated { field, len, .. } => {
            assert_eq!(field, "rider");
            assert_eq!(len, 100);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_utf8_is_replaced() {
    let off = ValueOffset::new("t", 0, 4);
    let (_, text) = off.scan(&[b'a', 0xFF, b'b', 0]).unwrap();
    assert_eq!(text, "a\u{FFFD}b");
}

#[test]
fn offsets_match_record_layout() {
    assert_eq!((TIMESTAMP_OFFSET.start, TIMESTAMP_OFFSET.end), (76, 94));
    assert_eq!((MOTORCYCLE_NAME_OFFSET.start, MOTORCYCLE_NAME_OFFSET.end), (1088, 1127));
    assert_eq!((TRACK_NAME_OFFSET.start, TRACK_NAME_OFFSET.end), (1128, 1167));
    assert_eq!((RIDER_NAME_OFFSET.start, RIDER_NAME_OFFSET.end), (1168, 1207));
    assert_eq!(MIN_RECORD_LEN, 1207);
}
