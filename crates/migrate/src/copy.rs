//! File copy and write primitives.
//!
//! Both go through a temporary file next to the target: data is written,
//! checked against the CRC32 of the source bytes, fsynced, and only then
//! renamed into place. A crash or a failed check never leaves a partial file
//! under the final name.

use crc32fast::Hasher as Crc32;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::MigrateError;

/// Copies the regular file `src` to `dst`, returning the number of bytes
/// copied.
///
/// # Errors
///
/// [`MigrateError::NotRegularFile`] when `src` is not a regular file,
/// [`MigrateError::Corrupted`] when the written bytes fail verification,
/// [`MigrateError::Io`] for everything else.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, MigrateError> {
    let meta = fs::metadata(src).map_err(|e| MigrateError::io(src, e))?;
    if !meta.is_file() {
        return Err(MigrateError::NotRegularFile {
            path: src.to_path_buf(),
        });
    }

    let source = File::open(src).map_err(|e| MigrateError::io(src, e))?;
    let mut reader = CrcReader::new(BufReader::new(source));

    let (copied, tmp) = write_via_tmp(dst, |w| io::copy(&mut reader, w))?;
    finish(&tmp, dst, reader.crc())?;
    Ok(copied)
}

/// Writes `data` to `path`, replacing any existing file.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), MigrateError> {
    let mut hasher = Crc32::new();
    hasher.update(data);
    let (_, tmp) = write_via_tmp(path, |w| w.write_all(data))?;
    finish(&tmp, path, hasher.finalize())
}

/// Sibling temp path: `dir/.<name>.tmp`.
fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Creates the temp file for `dst`, hands a buffered writer to `fill`, then
/// flushes and fsyncs it. Returns what `fill` returned and the temp path.
fn write_via_tmp<T, F>(dst: &Path, fill: F) -> Result<(T, PathBuf), MigrateError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<T>,
{
    let tmp = tmp_path(dst);
    let raw = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)
        .map_err(|e| MigrateError::io(&tmp, e))?;
    let mut file = BufWriter::new(raw);

    let result = fill(&mut file).and_then(|value| {
        file.flush()?;
        file.get_ref().sync_all()?;
        Ok(value)
    });

    match result {
        Ok(value) => Ok((value, tmp)),
        Err(e) => {
            drop(file);
            let _ = fs::remove_file(&tmp);
            Err(MigrateError::io(dst, e))
        }
    }
}

/// Verifies the temp file against `expected` and renames it to `dst`.
fn finish(tmp: &Path, dst: &Path, expected: u32) -> Result<(), MigrateError> {
    let actual = match file_crc(tmp) {
        Ok(crc) => crc,
        Err(e) => {
            let _ = fs::remove_file(tmp);
            return Err(MigrateError::io(tmp, e));
        }
    };
    if actual != expected {
        let _ = fs::remove_file(tmp);
        return Err(MigrateError::Corrupted {
            path: dst.to_path_buf(),
            expected,
            actual,
        });
    }

    fs::rename(tmp, dst).map_err(|e| MigrateError::io(dst, e))?;

    // Make the rename itself durable. Not every platform can open a
    // directory for syncing, so this is best effort.
    if let Some(parent) = dst.parent() {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
    Ok(())
}

fn file_crc(path: &Path) -> io::Result<u32> {
    let mut reader = CrcReader::new(BufReader::new(File::open(path)?));
    io::copy(&mut reader, &mut io::sink())?;
    Ok(reader.crc())
}

/// Pass-through reader that hashes everything read through it.
struct CrcReader<R> {
    inner: R,
    hasher: Crc32,
}

impl<R: Read> CrcReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Crc32::new(),
        }
    }

    fn crc(&self) -> u32 {
        self.hasher.clone().finalize()
    }
}

impl<R: Read> Read for CrcReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_preserves_bytes_and_reports_length() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.rrk");
        let dst = dir.path().join("b.rrk");
        let data: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let n = copy_file(&src, &dst).unwrap();
        assert_eq!(n, data.len() as u64);
        assert_eq!(fs::read(&dst).unwrap(), data);
        assert!(!tmp_path(&dst).exists());
    }

    #[test]
    fn copy_overwrites_existing_target() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a");
        let dst = dir.path().join("b");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old contents").unwrap();

        copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn copy_empty_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("empty");
        let dst = dir.path().join("copy");
        fs::write(&src, b"").unwrap();

        assert_eq!(copy_file(&src, &dst).unwrap(), 0);
        assert!(dst.exists());
    }

    #[test]
    fn copy_rejects_directory() {
        let dir = tempdir().unwrap();
        let err = copy_file(dir.path(), &dir.path().join("x")).unwrap_err();
        assert!(matches!(err, MigrateError::NotRegularFile { .. }));
    }

    #[test]
    fn copy_missing_source_is_io_error() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("missing");
        let err = copy_file(&src, &dir.path().join("x")).unwrap_err();
        assert!(matches!(err, MigrateError::Io { .. }));
        assert_eq!(err.path(), src.as_path());
    }

    #[test]
    fn copy_into_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a");
        fs::write(&src, b"x").unwrap();
        let dst = dir.path().join("nope").join("b");

        assert!(copy_file(&src, &dst).is_err());
        assert!(!dst.exists());
    }

    #[test]
    fn write_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.drk");
        write_file(&path, b"\x00\x01record\xff").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"\x00\x01record\xff");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn tmp_path_is_hidden_sibling() {
        let p = Path::new("new/Track/Rider/x.drk");
        assert_eq!(tmp_path(p), Path::new("new/Track/Rider/.x.drk.tmp"));
    }
}
