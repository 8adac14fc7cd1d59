//! In-memory record store and import merge rules.
//!
//! # Responsibility
//! - Own the professor collection keyed by normalized email.
//! - Return semantic errors (`Validation`, `Duplicate`, `NotFound`) to callers.
//! - Fold per-row import problems into a `MergeReport` instead of failing.
//!
//! # Invariants
//! - At most one record per normalized email.
//! - The store never touches the file system; persistence is explicit.

use crate::model::professor::ProfessorValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod merge;
pub mod record_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by direct store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ProfessorValidationError),
    /// Normalized email already tracked.
    Duplicate(String),
    /// No record for the given email.
    NotFound(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate(email) => write!(f, "professor already tracked: {email}"),
            Self::NotFound(email) => write!(f, "professor not found: {email}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Duplicate(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<ProfessorValidationError> for StoreError {
    fn from(value: ProfessorValidationError) -> Self {
        Self::Validation(value)
    }
}
