//! # drk-rename - DRK session file migration
//!
//! Copies every session record under `old/<track>/<rider>/` to
//! `new/<track>/<rider>/`, renamed after the rider, motorcycle, track and
//! session start stored in the record, and brings matching sidecar files
//! along under the same new name.
//!
//! ## Configuration
//!
//! All settings are controlled via environment variables:
//!
//! ```text
//! DRK_SOURCE_DIR   source root              (default: "./old")
//! DRK_DEST_DIR     destination root         (default: "./new")
//! DRK_RECORD_EXT   record extension         (default: "drk")
//! DRK_ON_ERROR     "continue" or "abort"    (default: "continue")
//! DRK_DRY_RUN      plan only, write nothing (default: "false")
//! RUST_LOG         log filter               (default: info)
//! ```
//!
//! ## Example
//!
//! ```text
//! $ cargo run -p cli
//! [INFO  migrate] migrating ./old -> ./new (ext=drk, on_error=continue, dry_run=false)
//! [INFO  migrate::records] ./old/Chayka/J Smith/session1.drk -> ./new/Chayka/J Smith/J Smith_Honda250_Chayka-Test_20230510_143000.drk
//! [INFO  migrate::sidecar] ./old/Chayka/J Smith/session1.rrk -> ./new/Chayka/J Smith/J Smith_Honda250_Chayka-Test_20230510_143000.rrk
//! done: 1 records, 1 sidecars copied, 0 sidecars skipped, 1489 bytes, 0 failures
//! ```
//!
//! Exits non-zero when the run aborts or any file failed.

use anyhow::{bail, Result};
use config::MigrateConfig;
use env_logger::{Builder, Target};
use log::{error, LevelFilter};
use migrate::Migrator;

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
    } else {
        Builder::new()
            .target(Target::Stdout)
            .filter_level(LevelFilter::Info)
            .init();
    }
}

fn main() -> Result<()> {
    init_logger();

    let config = MigrateConfig::from_env();
    let report = Migrator::new(config).run()?;

    println!("done: {}", report.summary());

    if !report.is_success() {
        for failure in &report.failures {
            error!("failed: {}", failure);
        }
        bail!("{} file(s) failed to migrate", report.failures.len());
    }

    Ok(())
}
