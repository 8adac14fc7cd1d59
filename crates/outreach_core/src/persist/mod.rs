//! Local CSV persistence for the record store.
//!
//! # Responsibility
//! - Load the tracked list from a flat CSV file at startup.
//! - Rewrite the file after edits without exposing partial writes.
//!
//! # Invariants
//! - A missing file is an empty store, not an error.
//! - Persisted rows that violate record invariants are rejected on load.
//! - A failed save leaves the previous file untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod csv_file;

pub use csv_file::{load_store, save_store};

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// File parsed but its contents break record invariants.
    InvalidData(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted professor data: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
