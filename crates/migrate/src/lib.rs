//! # Migrate - DRK session file migration
//!
//! Walks a `source/<track>/<rider>/<file>` tree, renames every record file
//! after the metadata it carries, and mirrors sidecar files (same base name,
//! other extension) under the new name into `dest/<track>/<rider>/`.
//!
//! ## Passes
//!
//! ```text
//! scan       source/<track>/<rider>/*  ──►  records[], sidecars[]  (sorted)
//!              |
//!              v
//! records    read → RecordHeader::parse → new name → write dest (atomic)
//!              |                                  └─► FilenamePair
//!              v
//! sidecars   (dir, base, ext) ──► SidecarIndex ──► copy_file(dest/<new base><ext>)
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module       | Purpose                                                |
//! |--------------|--------------------------------------------------------|
//! | [`scan`]     | Two-level directory walk, record/sidecar classification |
//! | [`records`]  | Record pass: header parse, naming, atomic write         |
//! | [`sidecar`]  | Base-name index and the sidecar pass                    |
//! | [`copy`]     | Verified atomic file copy and write primitives          |
//! | [`report`]   | `FilenamePair`, `MigrationReport`                       |
//!
//! ## Failures
//!
//! With [`FailurePolicy::Continue`] a failing file is logged, kept in
//! [`MigrationReport::failures`] and the run goes on. With
//! [`FailurePolicy::Abort`] the first failure ends the run and nothing after
//! it (in traversal order) is written. An unreadable source root always ends
//! the run.

mod copy;
mod records;
mod report;
mod scan;
mod sidecar;

pub use config::{FailurePolicy, MigrateConfig};
pub use copy::{copy_file, write_file};
pub use report::{FilenamePair, MigrationReport};
pub use scan::{scan_source, SourceEntry, SourceTree};
pub use sidecar::SidecarIndex;

use anyhow::{Context, Result};
use log::{error, info, warn};
use record::RecordError;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors tied to one file of the migration.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Reading, writing or creating `path` failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record at `path` has unreadable metadata.
    #[error("{}: {source}", .path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    /// Copy source is a directory, socket or similar.
    #[error("{} is not a regular file", .path.display())]
    NotRegularFile { path: PathBuf },

    /// The bytes that landed on disk differ from the source.
    #[error("{}: written data does not match source (crc {expected:#010x} != {actual:#010x})", .path.display())]
    Corrupted {
        path: PathBuf,
        expected: u32,
        actual: u32,
    },

    /// Two records in the same directory map to the same new name.
    #[error("{}: new name {} already taken by {}", .path.display(), .target.display(), .first.display())]
    Collision {
        path: PathBuf,
        target: PathBuf,
        first: PathBuf,
    },
}

impl MigrateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MigrateError::Io {
            path: path.into(),
            source,
        }
    }

    /// The file the error is about.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            MigrateError::Io { path, .. }
            | MigrateError::Record { path, .. }
            | MigrateError::NotRegularFile { path }
            | MigrateError::Corrupted { path, .. }
            | MigrateError::Collision { path, .. } => path,
        }
    }
}

/// Runs one migration from `config.source_dir` into `config.dest_dir`.
#[derive(Debug, Clone)]
pub struct Migrator {
    pub(crate) config: MigrateConfig,
}

impl Migrator {
    pub fn new(config: MigrateConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MigrateConfig {
        &self.config
    }

    /// Scans the source tree, then runs the record pass and the sidecar pass.
    ///
    /// # Errors
    ///
    /// Fails when the source root cannot be read, or on the first failing
    /// file under [`FailurePolicy::Abort`]. Under
    /// [`FailurePolicy::Continue`] per-file failures are returned inside the
    /// report instead.
    pub fn run(&self) -> Result<MigrationReport> {
        let cfg = &self.config;
        info!(
            "migrating {} -> {} (ext={}, on_error={}, dry_run={})",
            cfg.source_dir.display(),
            cfg.dest_dir.display(),
            cfg.record_ext,
            cfg.on_error,
            cfg.dry_run
        );

        let tree = scan_source(&cfg.source_dir, &cfg.record_ext)
            .with_context(|| format!("failed to read source root {}", cfg.source_dir.display()))?;

        let mut report = MigrationReport::default();
        for err in tree.errors {
            self.handle_failure(&mut report, err)
                .context("migration aborted while scanning")?;
        }

        // new relative path -> original relative path, for collision checks
        let mut produced: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut index = SidecarIndex::new(&cfg.record_ext);

        for entry in &tree.records {
            match self.migrate_record(entry, &mut produced) {
                Ok((pair, bytes)) => {
                    report.bytes_copied += bytes;
                    index.insert(&pair);
                    report.pairs.push(pair);
                }
                Err(e) => self
                    .handle_failure(&mut report, e)
                    .context("migration aborted")?,
            }
        }

        self.migrate_sidecars(&tree.sidecars, &index, &mut report)?;

        info!("{}", report.summary());
        Ok(report)
    }

    /// Applies the failure policy: remember and continue, or abort.
    pub(crate) fn handle_failure(
        &self,
        report: &mut MigrationReport,
        err: MigrateError,
    ) -> std::result::Result<(), MigrateError> {
        match self.config.on_error {
            FailurePolicy::Abort => {
                error!("aborting: {}", err);
                Err(err)
            }
            FailurePolicy::Continue => {
                warn!("{}", err);
                report.failures.push(err);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests;
