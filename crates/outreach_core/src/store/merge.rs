//! Raw import rows and the defaulting step applied before merge.
//!
//! # Responsibility
//! - Hold header-labelled cell values read from an import spreadsheet.
//! - Resolve fixed column labels into one import candidate per row.
//!
//! # Invariants
//! - Missing or blank status/opportunity cells default, never reject.
//! - Unrecognized status/opportunity values are coerced to defaults and the
//!   coercion is reported.

use crate::model::professor::{Opportunity, ReplyStatus};
use serde::Serialize;

const NAME_LABELS: &[&str] = &["name", "professor name"];
const EMAIL_LABELS: &[&str] = &["email", "mail", "professor mail", "professor email"];
const DEPARTMENT_LABELS: &[&str] = &["department", "professor department"];
const STATUS_LABELS: &[&str] = &["status"];
const OPPORTUNITY_LABELS: &[&str] = &["opportunity", "chance"];

/// One spreadsheet row as `(header label, cell value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    /// Pairs headers with values; surplus cells without a header are dropped.
    pub fn from_cells<H, V>(headers: &[H], values: &[V]) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let cells = headers
            .iter()
            .zip(values.iter())
            .map(|(header, value)| (header.as_ref().to_string(), value.as_ref().to_string()))
            .collect();
        Self { cells }
    }

    /// Adds one labelled cell.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.push((label.into(), value.into()));
        self
    }

    /// Returns the first non-blank value whose header matches one of `labels`.
    ///
    /// Header matching is case-insensitive and ignores surrounding whitespace.
    pub fn value(&self, labels: &[&str]) -> Option<&str> {
        self.cells.iter().find_map(|(header, value)| {
            let header = header.trim().to_lowercase();
            let value = value.trim();
            (labels.contains(&header.as_str()) && !value.is_empty()).then_some(value)
        })
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.trim().is_empty())
    }
}

/// Row after label resolution and enum defaulting, before email checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportCandidate {
    pub name: String,
    pub raw_email: String,
    pub department: String,
    pub status: ReplyStatus,
    pub opportunity: Opportunity,
    /// Number of enum cells replaced by their default.
    pub coerced: usize,
}

impl ImportCandidate {
    pub(crate) fn from_row(row: &RawRow) -> Self {
        let mut coerced = 0;
        let status = match row.value(STATUS_LABELS) {
            Some(value) => value.parse::<ReplyStatus>().unwrap_or_else(|_| {
                coerced += 1;
                ReplyStatus::default()
            }),
            None => ReplyStatus::default(),
        };
        let opportunity = match row.value(OPPORTUNITY_LABELS) {
            Some(value) => value.parse::<Opportunity>().unwrap_or_else(|_| {
                coerced += 1;
                Opportunity::default()
            }),
            None => Opportunity::default(),
        };

        Self {
            name: row.value(NAME_LABELS).unwrap_or_default().to_string(),
            raw_email: row.value(EMAIL_LABELS).unwrap_or_default().to_string(),
            department: row.value(DEPARTMENT_LABELS).unwrap_or_default().to_string(),
            status,
            opportunity,
            coerced,
        }
    }
}

/// Aggregate outcome of one import merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Rows inserted as new records.
    pub accepted: usize,
    /// Rows whose email was already tracked or repeated earlier in the batch.
    pub duplicate: usize,
    /// Rows with an invalid email or missing name.
    pub rejected: usize,
    /// Enum cells replaced by defaults across accepted and skipped rows.
    pub coerced: usize,
}

impl MergeReport {
    pub fn total(&self) -> usize {
        self.accepted + self.duplicate + self.rejected
    }
}
