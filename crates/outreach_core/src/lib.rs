//! Core domain logic for the professor outreach tracker.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod sheet;
pub mod store;

pub use config::{TrackerConfig, DEFAULT_DATA_FILE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::professor::{
    EmailDomain, Opportunity, ProfessorRecord, ProfessorValidationError, RecordField, ReplyStatus,
    SortColumn, COLUMN_LABELS, DEFAULT_EMAIL_DOMAIN,
};
pub use persist::{load_store, save_store, PersistError, PersistResult};
pub use service::tracker_service::{ServiceError, ServiceResult, TrackerService};
pub use sheet::{ExportError, ImportError};
pub use store::merge::{MergeReport, RawRow};
pub use store::record_store::{MergeOutcome, RecordStore};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
