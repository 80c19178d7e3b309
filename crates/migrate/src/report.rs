use std::path::PathBuf;

use crate::MigrateError;

/// A migrated record: where it came from and where it went, both relative
/// to their roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePair {
    pub original: PathBuf,
    pub new: PathBuf,
}

/// Outcome of a migration run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// One entry per record written, in traversal order.
    pub pairs: Vec<FilenamePair>,
    pub sidecars_copied: usize,
    /// Sidecars with no matching record. These are not copied.
    pub sidecars_skipped: usize,
    /// Bytes written for records and sidecars together.
    pub bytes_copied: u64,
    /// Files that failed under [`crate::FailurePolicy::Continue`].
    pub failures: Vec<MigrateError>,
}

impl MigrationReport {
    /// `true` when no file failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One line for the log / console.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} records, {} sidecars copied, {} sidecars skipped, {} bytes, {} failures",
            self.pairs.len(),
            self.sidecars_copied,
            self.sidecars_skipped,
            self.bytes_copied,
            self.failures.len()
        )
    }
}
