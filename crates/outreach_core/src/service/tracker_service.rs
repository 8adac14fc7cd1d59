//! Tracker use-case service.
//!
//! # Responsibility
//! - Own one `RecordStore` and its optional backing CSV file.
//! - Persist after every successful edit.
//! - Run spreadsheet import/export against the current record set.
//!
//! # Invariants
//! - Edits are staged on a copy of the store; the in-memory list changes only
//!   after the save succeeds, so memory and disk never diverge.
//! - Logged events carry counts and error codes, never record contents.

use crate::config::TrackerConfig;
use crate::model::professor::{ProfessorRecord, RecordField, SortColumn};
use crate::persist::{load_store, save_store, PersistError};
use crate::sheet::{read_rows, write_xlsx, xlsx_bytes, ExportError, ImportError};
use crate::store::merge::{MergeReport, RawRow};
use crate::store::record_store::RecordStore;
use crate::store::{StoreError, StoreResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for tracker use-cases.
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Persist(PersistError),
    Import(ImportError),
    Export(ExportError),
}

impl ServiceError {
    /// Stable machine-readable code for logs and UI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(StoreError::Validation(_)) => "validation",
            Self::Store(StoreError::Duplicate(_)) => "duplicate",
            Self::Store(StoreError::NotFound(_)) => "not_found",
            Self::Persist(_) => "persist_failed",
            Self::Import(_) => "import_failed",
            Self::Export(_) => "export_failed",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Persist(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<PersistError> for ServiceError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

impl From<ImportError> for ServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<ExportError> for ServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Use-case wrapper around the record store and its CSV mirror.
#[derive(Debug, Clone)]
pub struct TrackerService {
    store: RecordStore,
    data_file: Option<PathBuf>,
}

impl TrackerService {
    /// Loads the configured data file (if any) into a new service.
    pub fn open(config: &TrackerConfig) -> ServiceResult<Self> {
        let store = match &config.data_file {
            Some(path) => load_store(path, config.email_domain.clone())?,
            None => RecordStore::new(config.email_domain.clone()),
        };
        Ok(Self::from_store(store, config.data_file.clone()))
    }

    pub fn from_store(store: RecordStore, data_file: Option<PathBuf>) -> Self {
        Self { store, data_file }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Records in insertion order for full-table rendering.
    pub fn records(&self) -> &[ProfessorRecord] {
        self.store.records()
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    /// Adds a professor and saves; returns the stored record.
    pub fn add_professor(
        &mut self,
        name: &str,
        email: &str,
        department: &str,
    ) -> ServiceResult<ProfessorRecord> {
        let result = self.commit(|store| {
            let records = store.add(name, email, department)?;
            Ok(records[records.len() - 1].clone())
        });
        self.log_outcome("professor_add", &result);
        result
    }

    /// Updates `status` or `opportunity` from a text label and saves.
    pub fn update_field(
        &mut self,
        email: &str,
        field: RecordField,
        value: &str,
    ) -> ServiceResult<ProfessorRecord> {
        let result = self.commit(|store| store.update_field(email, field, value).cloned());
        self.log_outcome("professor_update", &result);
        result
    }

    /// Deletes a professor and saves; returns the removed record.
    pub fn delete_professor(&mut self, email: &str) -> ServiceResult<ProfessorRecord> {
        let result = self.commit(|store| store.delete(email));
        self.log_outcome("professor_delete", &result);
        result
    }

    /// Merges already-parsed rows and saves.
    pub fn merge_rows(&mut self, rows: Vec<RawRow>) -> ServiceResult<MergeReport> {
        let result = self.commit(|store| Ok(store.merge_import(rows).report));
        if let Ok(report) = &result {
            info!(
                "event=import_merge module=service status=ok accepted={} duplicate={} rejected={} coerced={}",
                report.accepted, report.duplicate, report.rejected, report.coerced
            );
        } else {
            self.log_outcome("import_merge", &result);
        }
        result
    }

    /// Reads a CSV/XLSX file and merges its rows.
    ///
    /// # Errors
    /// - `Import` when the file as a whole cannot be read; the store is
    ///   left unchanged.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> ServiceResult<MergeReport> {
        let rows = match read_rows(path) {
            Ok(rows) => rows,
            Err(err) => {
                let err = ServiceError::from(err);
                warn!(
                    "event=import_file module=service status=error error_code={}",
                    err.code()
                );
                return Err(err);
            }
        };
        self.merge_rows(rows)
    }

    /// Writes an XLSX export, optionally sorted; returns the row count.
    pub fn export_xlsx(
        &self,
        path: impl AsRef<Path>,
        order: Option<(SortColumn, bool)>,
    ) -> ServiceResult<usize> {
        let rows = self.ordered(order);
        write_xlsx(path, &rows)?;
        Ok(rows.len())
    }

    /// Renders the current list as XLSX bytes in insertion order.
    pub fn export_xlsx_bytes(&self) -> ServiceResult<Vec<u8>> {
        Ok(xlsx_bytes(self.store.records())?)
    }

    pub fn sorted_view(&self, column: SortColumn, ascending: bool) -> Vec<ProfessorRecord> {
        self.store.sorted_view(column, ascending)
    }

    /// Writes the current list to the data file; no-op without one.
    pub fn save(&self) -> ServiceResult<()> {
        if let Some(path) = &self.data_file {
            save_store(path, &self.store)?;
        }
        Ok(())
    }

    fn commit<T>(
        &mut self,
        edit: impl FnOnce(&mut RecordStore) -> StoreResult<T>,
    ) -> ServiceResult<T> {
        let mut staged = self.store.clone();
        let value = edit(&mut staged)?;
        if let Some(path) = &self.data_file {
            save_store(path, &staged)?;
        }
        self.store = staged;
        Ok(value)
    }

    fn ordered(&self, order: Option<(SortColumn, bool)>) -> Vec<ProfessorRecord> {
        match order {
            Some((column, ascending)) => self.store.sorted_view(column, ascending),
            None => self.store.records().to_vec(),
        }
    }

    fn log_outcome<T>(&self, event: &str, result: &ServiceResult<T>) {
        match result {
            Ok(_) => info!(
                "event={event} module=service status=ok total={}",
                self.store.len()
            ),
            Err(err) => warn!(
                "event={event} module=service status=error error_code={}",
                err.code()
            ),
        }
    }
}
