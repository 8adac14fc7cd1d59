//! Spreadsheet import and export.
//!
//! # Responsibility
//! - Turn CSV/XLSX uploads into header-labelled `RawRow`s for merge.
//! - Write the tracked list as an XLSX workbook.
//!
//! # Invariants
//! - Only a structurally unreadable file is an `ImportError`; row content
//!   problems are left to `RecordStore::merge_import`.
//! - Export columns are always Name, Email, Department, Status, Opportunity.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

mod export;
mod import;

pub use export::{write_xlsx, xlsx_bytes, EXPORT_SHEET_NAME};
pub use import::{read_csv_rows, read_rows, read_workbook_rows};

/// Supported import formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Workbook,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Workbook),
            _ => Err(ImportError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Fatal error for an import file as a whole.
#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    UnsupportedFormat(String),
    Csv(csv::Error),
    Workbook(calamine::Error),
    /// Workbook has no worksheet or the first sheet has no header row.
    EmptyWorkbook,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read import file: {err}"),
            Self::UnsupportedFormat(path) => {
                write!(f, "unsupported import file `{path}`; expected .csv or .xlsx")
            }
            Self::Csv(err) => write!(f, "malformed CSV import: {err}"),
            Self::Workbook(err) => write!(f, "malformed spreadsheet import: {err}"),
            Self::EmptyWorkbook => write!(f, "spreadsheet import has no worksheet or header row"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Workbook(err) => Some(err),
            Self::UnsupportedFormat(_) | Self::EmptyWorkbook => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<calamine::Error> for ImportError {
    fn from(value: calamine::Error) -> Self {
        Self::Workbook(value)
    }
}

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Xlsx(rust_xlsxwriter::XlsxError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write export file: {err}"),
            Self::Xlsx(err) => write!(f, "failed to build spreadsheet: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Xlsx(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(value)
    }
}
