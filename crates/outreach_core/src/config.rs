//! Runtime configuration shared by the CLI and FFI entry points.
//!
//! # Invariants
//! - `email_domain` is always a parsed, valid domain.
//! - `data_file = None` keeps the store purely in memory.

use crate::logging::default_log_level;
use crate::model::professor::EmailDomain;
use std::path::PathBuf;

/// File name used for the local list when callers pass none.
pub const DEFAULT_DATA_FILE: &str = "professors.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Local CSV mirror of the record set.
    pub data_file: Option<PathBuf>,
    pub email_domain: EmailDomain,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl TrackerConfig {
    /// Config backed by `data_file` with default domain and logging.
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: Some(data_file.into()),
            ..Self::default()
        }
    }

    /// Config with no backing file.
    pub fn in_memory() -> Self {
        Self {
            data_file: None,
            ..Self::default()
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_file: Some(PathBuf::from(DEFAULT_DATA_FILE)),
            email_domain: EmailDomain::default(),
            log_dir: None,
            log_level: default_log_level().to_string(),
        }
    }
}
