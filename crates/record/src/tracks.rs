//! Canonical spellings for track names typed inconsistently on the logger.
//!
//! The migration does not rewrite the track field: the record carries a
//! checksum we cannot yet reproduce, so a changed byte would invalidate the
//! file. The table is kept so the names can be reported and, once the
//! checksum is understood, written back.

/// `(as found in records, canonical name)`.
pub const TRACK_NAME_MAPPING: &[(&str, &str)] = &[
    ("Chaika", "Chayka"),
    ("ChikaAuto", "Chayka"),
    ("Ltava Moto", "Ltava"),
    ("Chaikato", "Chayka"),
    ("Chaykato", "Chayka"),
    ("LtavaBaby", "Ltava"),
    ("DniproKart-R", "DniproKart R"),
    ("Chaikakarting", "KartTochka"),
    ("Chaykakarting", "KartTochka"),
    ("KartTochka RReverse)", "KartTochka R"),
    ("MotoParkro", "MotorparkRomania"),
];

/// Returns the canonical form of `track`, or `None` if it needs no change.
///
/// An exact match wins. Otherwise the longest known misspelling contained in
/// `track` is replaced in place, so `"Chaikakarting 2"` becomes
/// `"KartTochka 2"` rather than being caught by the shorter `"Chaika"`.
#[must_use]
pub fn canonical_track_name(track: &str) -> Option<String> {
    if let Some((_, canonical)) = TRACK_NAME_MAPPING.iter().find(|(k, _)| *k == track) {
        return Some((*canonical).to_string());
    }

    TRACK_NAME_MAPPING
        .iter()
        .filter(|(k, _)| track.contains(k))
        .max_by_key(|(k, _)| k.len())
        .map(|(k, v)| track.replace(k, v))
}
