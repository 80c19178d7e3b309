//! Sidecar pass.
//!
//! A sidecar belongs to a record when both live in the same `<track>/<rider>`
//! directory and the sidecar's name is the record's base name followed by an
//! extension starting at a `.`. Matching is on the whole base name, so a
//! sidecar of `s1` never attaches to `s10`.

use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::scan::record_base;
use crate::{copy_file, FilenamePair, MigrationReport, Migrator, SourceEntry};

/// Lookup from `(directory, original base name)` to the new base name.
#[derive(Debug, Clone)]
pub struct SidecarIndex {
    record_ext: String,
    bases: HashMap<(PathBuf, String), String>,
}

impl SidecarIndex {
    pub fn new(record_ext: &str) -> Self {
        Self {
            record_ext: record_ext.to_string(),
            bases: HashMap::new(),
        }
    }

    /// Registers a migrated record. Pairs whose names do not carry the
    /// record extension are ignored.
    pub fn insert(&mut self, pair: &FilenamePair) {
        let (Some(dir), Some(old), Some(new)) = (
            pair.original.parent(),
            file_name_str(&pair.original),
            file_name_str(&pair.new),
        ) else {
            return;
        };
        let (Some(old_base), Some(new_base)) = (
            record_base(old, &self.record_ext),
            record_base(new, &self.record_ext),
        ) else {
            return;
        };
        self.bases
            .insert((dir.to_path_buf(), old_base.to_string()), new_base.to_string());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Finds the record `entry` belongs to. Returns the record's new base
    /// name and the sidecar's own extension (with its leading `.`).
    ///
    /// Every `.` in the name is a candidate split point; the longest base
    /// that names a known record wins, so `a.b.csv` prefers record `a.b`
    /// over record `a`.
    #[must_use]
    pub fn lookup<'a>(&'a self, entry: &'a SourceEntry) -> Option<(&'a str, &'a str)> {
        let name = entry.file_name.as_str();
        name.rmatch_indices('.')
            .map(|(i, _)| i)
            .filter(|&i| i > 0)
            .find_map(|i| {
                let key = (entry.dir.clone(), name[..i].to_string());
                self.bases
                    .get(&key)
                    .map(|new_base| (new_base.as_str(), &name[i..]))
            })
    }
}

fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

impl Migrator {
    /// Copies every sidecar with a matching record next to the renamed
    /// record. Unmatched sidecars are counted and left behind.
    pub(crate) fn migrate_sidecars(
        &self,
        sidecars: &[SourceEntry],
        index: &SidecarIndex,
        report: &mut MigrationReport,
    ) -> anyhow::Result<()> {
        use anyhow::Context;

        for entry in sidecars {
            let Some((new_base, ext)) = index.lookup(entry) else {
                debug!("skipping {}: no matching record", entry.rel_path().display());
                report.sidecars_skipped += 1;
                continue;
            };

            let from = self.config.source_dir.join(entry.rel_path());
            let to = self
                .config
                .dest_dir
                .join(&entry.dir)
                .join(format!("{}{}", new_base, ext));

            if self.config.dry_run {
                info!("would copy {} -> {}", from.display(), to.display());
                report.sidecars_copied += 1;
                continue;
            }

            info!("{} -> {}", from.display(), to.display());
            match copy_file(&from, &to) {
                Ok(n) => {
                    report.sidecars_copied += 1;
                    report.bytes_copied += n;
                }
                Err(e) => self
                    .handle_failure(report, e)
                    .context("migration aborted")?,
            }
        }
        Ok(())
    }
}

