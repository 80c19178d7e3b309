//! Record pass: read each record, derive its new name from the header and
//! write the unmodified bytes under that name.

use log::info;
use record::RecordHeader;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::{write_file, FilenamePair, MigrateError, Migrator, SourceEntry};

impl Migrator {
    /// Migrates one record, returning its pair and the number of bytes
    /// written (0 on a dry run).
    ///
    /// `produced` maps every new relative path written so far to the record
    /// it came from; a second record resolving to the same name is a
    /// [`MigrateError::Collision`] instead of a silent overwrite.
    pub(crate) fn migrate_record(
        &self,
        entry: &SourceEntry,
        produced: &mut HashMap<PathBuf, PathBuf>,
    ) -> Result<(FilenamePair, u64), MigrateError> {
        let original = entry.rel_path();
        let src = self.config.source_dir.join(&original);

        let data = fs::read(&src).map_err(|e| MigrateError::io(&src, e))?;
        let header = RecordHeader::parse(&data).map_err(|source| MigrateError::Record {
            path: src.clone(),
            source,
        })?;

        let new = entry.dir.join(header.file_name(&self.config.record_ext));
        if let Some(first) = produced.get(&new) {
            return Err(MigrateError::Collision {
                path: src,
                target: new,
                first: first.clone(),
            });
        }

        let dst_dir = self.config.dest_dir.join(&entry.dir);
        let dst = self.config.dest_dir.join(&new);

        let written = if self.config.dry_run {
            info!("would write {} -> {}", src.display(), dst.display());
            0
        } else {
            fs::create_dir_all(&dst_dir).map_err(|e| MigrateError::io(&dst_dir, e))?;
            write_file(&dst, &data)?;
            info!("{} -> {}", src.display(), dst.display());
            data.len() as u64
        };

        produced.insert(new.clone(), original.clone());
        Ok((FilenamePair { original, new }, written))
    }
}
