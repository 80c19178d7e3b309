use super::helpers::put_file;
use crate::scan::record_base;
use crate::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn record_base_requires_dot_extension() {
    assert_eq!(record_base("session.drk", "drk"), Some("session"));
    assert_eq!(record_base("a.b.drk", "drk"), Some("a.b"));
    assert_eq!(record_base("sessiondrk", "drk"), None);
    assert_eq!(record_base(".drk", "drk"), None);
    assert_eq!(record_base("session.DRK", "drk"), None);
    assert_eq!(record_base("session.drk.bak", "drk"), None);
}

#[test]
fn only_two_levels_deep_are_collected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    put_file(root, "top.drk", b"x");
    put_file(root, "Track/mid.drk", b"x");
    put_file(root, "Track/Rider/ok.drk", b"x");
    put_file(root, "Track/Rider/ok.rrk", b"x");
    put_file(root, "Track/Rider/Deeper/deep.drk", b"x");

    let tree = scan_source(root, "drk")?;
    assert_eq!(tree.records, vec![SourceEntry::new("Track", "Rider", "ok.drk")]);
    assert_eq!(tree.sidecars, vec![SourceEntry::new("Track", "Rider", "ok.rrk")]);
    assert!(tree.errors.is_empty());
    Ok(())
}

#[test]
fn traversal_is_sorted() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    for rel in ["B/r/2.drk", "A/z/1.drk", "A/a/3.drk", "A/a/1.drk"] {
        put_file(root, rel, b"x");
    }

    let tree = scan_source(root, "drk")?;
    let got: Vec<_> = tree.records.iter().map(|e| e.rel_path()).collect();
    let want: Vec<std::path::PathBuf> = ["A/a/1.drk", "A/a/3.drk", "A/z/1.drk", "B/r/2.drk"]
        .iter()
        .map(Into::into)
        .collect();
    assert_eq!(got, want);
    Ok(())
}

#[test]
fn custom_record_extension() -> anyhow::Result<()> {
    let dir = tempdir()?;
    put_file(dir.path(), "T/R/a.xrk", b"x");
    put_file(dir.path(), "T/R/b.drk", b"x");

    let tree = scan_source(dir.path(), "xrk")?;
    assert_eq!(tree.records.len(), 1);
    assert_eq!(tree.records[0].file_name, "a.xrk");
    assert_eq!(tree.sidecars[0].file_name, "b.drk");
    Ok(())
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let err = scan_source(&dir.path().join("nope"), "drk").unwrap_err();
    assert!(matches!(err, MigrateError::Io { .. }));
}

#[test]
fn empty_root_scans_clean() -> anyhow::Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("Track/Rider"))?;
    let tree = scan_source(dir.path(), "drk")?;
    assert!(tree.records.is_empty());
    assert!(tree.sidecars.is_empty());
    Ok(())
}
