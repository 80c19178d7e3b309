//! # Config - migration settings
//!
//! All settings are controlled via environment variables:
//!
//! ```text
//! DRK_SOURCE_DIR   source root (track/rider/file)  (default: "./old")
//! DRK_DEST_DIR     destination root                (default: "./new")
//! DRK_RECORD_EXT   record extension, no dot        (default: "drk")
//! DRK_ON_ERROR     "continue" or "abort"           (default: "continue")
//! DRK_DRY_RUN      plan only, write nothing        (default: "false")
//! ```
//!
//! Values that fail to parse fall back to their default with a warning.

use log::warn;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default source root.
pub const DEFAULT_SOURCE_DIR: &str = "./old";
/// Default destination root.
pub const DEFAULT_DEST_DIR: &str = "./new";
/// Default extension of primary record files.
pub const DEFAULT_RECORD_EXT: &str = "drk";

/// What the migration does when a single file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure, remember it in the report and move on.
    #[default]
    Continue,
    /// Stop at the first failure; nothing after it is processed.
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(format!("unknown failure policy: {}", other)),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Continue => f.write_str("continue"),
            FailurePolicy::Abort => f.write_str("abort"),
        }
    }
}

/// Settings for one migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Extension marking a primary record, without the leading dot.
    pub record_ext: String,
    pub on_error: FailurePolicy,
    /// When set, every planned write is logged but nothing touches the disk.
    pub dry_run: bool,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            record_ext: DEFAULT_RECORD_EXT.to_string(),
            on_error: FailurePolicy::default(),
            dry_run: false,
        }
    }
}

impl MigrateConfig {
    /// Builds a config for the given roots with every other setting at its default.
    pub fn new<P1: Into<PathBuf>, P2: Into<PathBuf>>(source_dir: P1, dest_dir: P2) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Self::default()
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value (if set).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let record_ext = env_or("DRK_RECORD_EXT", DEFAULT_RECORD_EXT)
            .trim_start_matches('.')
            .to_string();
        let record_ext = if record_ext.is_empty() {
            warn!("DRK_RECORD_EXT is empty, using {:?}", DEFAULT_RECORD_EXT);
            DEFAULT_RECORD_EXT.to_string()
        } else {
            record_ext
        };

        Self {
            source_dir: PathBuf::from(env_or("DRK_SOURCE_DIR", DEFAULT_SOURCE_DIR)),
            dest_dir: PathBuf::from(env_or("DRK_DEST_DIR", DEFAULT_DEST_DIR)),
            record_ext,
            on_error: parse_or("DRK_ON_ERROR", lookup("DRK_ON_ERROR"), FailurePolicy::default()),
            dry_run: parse_or("DRK_DRY_RUN", lookup("DRK_DRY_RUN"), false),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + fmt::Debug,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring unparsable {}={:?}, using {:?}", key, raw, default);
            default
        }),
    }
}
