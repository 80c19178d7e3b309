//! Source tree walk.
//!
//! Only `root/<track>/<rider>/<file>` is looked at: files directly under the
//! root or a track directory, and directories below a rider directory, are
//! skipped. Entries are sorted by name at every level so a run always visits
//! files in the same order.

use log::{debug, warn};
use std::fs::{self, FileType};
use std::path::{Path, PathBuf};

use crate::MigrateError;

/// A file found at `root/<track>/<rider>/<file_name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// `<track>/<rider>`, relative to the source root.
    pub dir: PathBuf,
    pub file_name: String,
}

impl SourceEntry {
    pub fn new(track: &str, rider: &str, file_name: &str) -> Self {
        Self {
            dir: Path::new(track).join(rider),
            file_name: file_name.to_string(),
        }
    }

    /// `<track>/<rider>/<file_name>`, relative to the source root.
    #[must_use]
    pub fn rel_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Result of walking the source root.
#[derive(Debug, Default)]
pub struct SourceTree {
    /// Files carrying the record extension, in traversal order.
    pub records: Vec<SourceEntry>,
    /// Every other file at record depth, in traversal order.
    pub sidecars: Vec<SourceEntry>,
    /// Track or rider directories that could not be listed.
    pub errors: Vec<MigrateError>,
}

/// Returns the part of `file_name` before `.<ext>`, or `None` when the name
/// does not carry the record extension (or is nothing but the extension).
pub(crate) fn record_base<'a>(file_name: &'a str, ext: &str) -> Option<&'a str> {
    let base = file_name.strip_suffix(ext)?.strip_suffix('.')?;
    if base.is_empty() {
        None
    } else {
        Some(base)
    }
}

/// Walks `root` and sorts every file at `<track>/<rider>/` depth into
/// records (extension `record_ext`) and sidecars.
///
/// # Errors
///
/// Only a failure to list `root` itself is returned; failures below it are
/// collected in [`SourceTree::errors`].
pub fn scan_source(root: &Path, record_ext: &str) -> Result<SourceTree, MigrateError> {
    let mut tree = SourceTree::default();

    for (track, track_path, track_type) in sorted_entries(root)? {
        if !track_type.is_dir() {
            debug!("skipping {}: not a track directory", track_path.display());
            continue;
        }

        let riders = match sorted_entries(&track_path) {
            Ok(riders) => riders,
            Err(e) => {
                tree.errors.push(e);
                continue;
            }
        };

        for (rider, rider_path, rider_type) in riders {
            if !rider_type.is_dir() {
                debug!("skipping {}: not a rider directory", rider_path.display());
                continue;
            }

            let files = match sorted_entries(&rider_path) {
                Ok(files) => files,
                Err(e) => {
                    tree.errors.push(e);
                    continue;
                }
            };

            for (file_name, file_path, file_type) in files {
                if file_type.is_dir() {
                    debug!("skipping {}: nested too deep", file_path.display());
                    continue;
                }
                let entry = SourceEntry::new(&track, &rider, &file_name);
                if record_base(&file_name, record_ext).is_some() {
                    tree.records.push(entry);
                } else {
                    tree.sidecars.push(entry);
                }
            }
        }
    }

    debug!(
        "scanned {}: {} records, {} other files",
        root.display(),
        tree.records.len(),
        tree.sidecars.len()
    );
    Ok(tree)
}

/// Lists `dir` as `(name, path, type)` sorted by name. Names that are not
/// valid UTF-8 are skipped with a warning since new names are built from text.
fn sorted_entries(dir: &Path) -> Result<Vec<(String, PathBuf, FileType)>, MigrateError> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| MigrateError::io(dir, e))? {
        let entry = entry.map_err(|e| MigrateError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| MigrateError::io(&path, e))?;
        match entry.file_name().into_string() {
            Ok(name) => out.push((name, path, file_type)),
            Err(raw) => warn!("skipping non UTF-8 name {:?} in {}", raw, dir.display()),
        }
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}
