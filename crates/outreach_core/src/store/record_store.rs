//! Record store over an insertion-ordered professor list.
//!
//! # Responsibility
//! - Provide add/update/delete/merge/sort entry points for UI callers.
//! - Normalize every incoming email before lookup or insert.
//!
//! # Invariants
//! - Records keep insertion order; `sorted_view` never reorders storage.
//! - Deleting a missing email fails with `StoreError::NotFound`.
//! - `merge_import` never fails; row problems land in `MergeReport`.

use crate::model::professor::{
    EmailDomain, Opportunity, ProfessorRecord, ProfessorValidationError, RecordField, ReplyStatus,
    SortColumn,
};
use crate::store::merge::{ImportCandidate, MergeReport, RawRow};
use crate::store::{StoreError, StoreResult};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Result of a merge: counts plus the updated record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome<'a> {
    pub report: MergeReport,
    pub records: &'a [ProfessorRecord],
}

/// Owner of the tracked professor list.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    domain: EmailDomain,
    records: Vec<ProfessorRecord>,
}

impl RecordStore {
    /// Creates an empty store for the given institution domain.
    pub fn new(domain: EmailDomain) -> Self {
        Self {
            domain,
            records: Vec::new(),
        }
    }

    /// Builds a store from already-persisted records.
    ///
    /// # Errors
    /// - `Validation` when a record has a blank name or its email is not in
    ///   normalized form for `domain`.
    /// - `Duplicate` when two records share an email.
    pub fn with_records(domain: EmailDomain, records: Vec<ProfessorRecord>) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.name.trim().is_empty() {
                return Err(ProfessorValidationError::EmptyField("name").into());
            }
            let normalized = domain.normalize_email(&record.email)?;
            if normalized != record.email {
                return Err(ProfessorValidationError::InvalidEmail {
                    value: record.email.clone(),
                    domain: domain.as_str().to_string(),
                }
                .into());
            }
            if !seen.insert(record.email.as_str()) {
                return Err(StoreError::Duplicate(record.email.clone()));
            }
        }

        Ok(Self { domain, records })
    }

    pub fn domain(&self) -> &EmailDomain {
        &self.domain
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[ProfessorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by raw or normalized email.
    pub fn get(&self, email: &str) -> Option<&ProfessorRecord> {
        let normalized = self.domain.normalize_email(email).ok()?;
        self.position(&normalized).map(|index| &self.records[index])
    }

    /// Adds a professor with default status fields.
    ///
    /// # Errors
    /// - `Validation` when any field is blank or the email is invalid.
    /// - `Duplicate` when the normalized email is already tracked.
    pub fn add(
        &mut self,
        name: &str,
        raw_email: &str,
        department: &str,
    ) -> StoreResult<&[ProfessorRecord]> {
        let name = name.trim();
        let department = department.trim();
        if name.is_empty() {
            return Err(ProfessorValidationError::EmptyField("name").into());
        }
        let email = self.domain.normalize_email(raw_email)?;
        if department.is_empty() {
            return Err(ProfessorValidationError::EmptyField("department").into());
        }
        if self.position(&email).is_some() {
            return Err(StoreError::Duplicate(email));
        }

        self.records.push(ProfessorRecord::new(name, email, department));
        Ok(self.records.as_slice())
    }

    /// Sets `field` from a text label such as `"Replied"` or `"Has"`.
    ///
    /// # Errors
    /// - `NotFound` when no record matches `email`.
    /// - `Validation` when `value` is not a member of the field's enum.
    pub fn update_field(
        &mut self,
        email: &str,
        field: RecordField,
        value: &str,
    ) -> StoreResult<&ProfessorRecord> {
        let index = self.require(email)?;
        let record = &mut self.records[index];
        match field {
            RecordField::Status => record.status = value.parse::<ReplyStatus>()?,
            RecordField::Opportunity => record.opportunity = value.parse::<Opportunity>()?,
        }
        Ok(&*record)
    }

    /// Typed variant of `update_field` for the status column.
    pub fn set_status(
        &mut self,
        email: &str,
        status: ReplyStatus,
    ) -> StoreResult<&ProfessorRecord> {
        let index = self.require(email)?;
        let record = &mut self.records[index];
        record.status = status;
        Ok(&*record)
    }

    /// Typed variant of `update_field` for the opportunity column.
    pub fn set_opportunity(
        &mut self,
        email: &str,
        opportunity: Opportunity,
    ) -> StoreResult<&ProfessorRecord> {
        let index = self.require(email)?;
        let record = &mut self.records[index];
        record.opportunity = opportunity;
        Ok(&*record)
    }

    /// Removes and returns the record for `email`.
    pub fn delete(&mut self, email: &str) -> StoreResult<ProfessorRecord> {
        let index = self.require(email)?;
        Ok(self.records.remove(index))
    }

    /// Merges imported rows into the store.
    ///
    /// Rows are processed in order. A row is rejected when its email cannot
    /// be normalized or its name is blank, and counted as duplicate when its
    /// email is already tracked or appeared earlier in this batch. Fully
    /// blank rows are ignored without being counted.
    pub fn merge_import<I>(&mut self, rows: I) -> MergeOutcome<'_>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut report = MergeReport::default();

        for (row_index, row) in rows.into_iter().enumerate() {
            if row.is_blank() {
                continue;
            }

            let candidate = ImportCandidate::from_row(&row);
            if candidate.coerced > 0 {
                warn!(
                    "event=import_coerce module=store row={} coerced={}",
                    row_index, candidate.coerced
                );
            }
            report.coerced += candidate.coerced;

            if candidate.name.is_empty() {
                debug!("event=import_reject module=store row={row_index} reason=empty_name");
                report.rejected += 1;
                continue;
            }
            let email = match self.domain.normalize_email(&candidate.raw_email) {
                Ok(email) => email,
                Err(_) => {
                    debug!("event=import_reject module=store row={row_index} reason=invalid_email");
                    report.rejected += 1;
                    continue;
                }
            };
            // Earlier rows of this batch are already in `records`, so one
            // lookup covers both existing and in-batch duplicates.
            if self.position(&email).is_some() {
                report.duplicate += 1;
                continue;
            }

            self.records.push(ProfessorRecord {
                name: candidate.name,
                email,
                department: candidate.department,
                status: candidate.status,
                opportunity: candidate.opportunity,
            });
            report.accepted += 1;
        }

        MergeOutcome {
            report,
            records: &self.records,
        }
    }

    /// Returns records sorted by `column`.
    ///
    /// The sort is stable in both directions: equal keys keep insertion order.
    pub fn sorted_view(&self, column: SortColumn, ascending: bool) -> Vec<ProfessorRecord> {
        let mut view = self.records.clone();
        view.sort_by(|left, right| {
            let ordering = compare_by(column, left, right);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        view
    }

    fn position(&self, normalized_email: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.email == normalized_email)
    }

    fn require(&self, email: &str) -> StoreResult<usize> {
        self.domain
            .normalize_email(email)
            .ok()
            .and_then(|normalized| self.position(&normalized))
            .ok_or_else(|| StoreError::NotFound(email.trim().to_string()))
    }
}

fn compare_by(column: SortColumn, left: &ProfessorRecord, right: &ProfessorRecord) -> Ordering {
    match column {
        SortColumn::Name => compare_text(&left.name, &right.name),
        SortColumn::Email => left.email.cmp(&right.email),
        SortColumn::Department => compare_text(&left.department, &right.department),
        SortColumn::Status => left.status.cmp(&right.status),
        SortColumn::Opportunity => left.opportunity.cmp(&right.opportunity),
    }
}

fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::RecordStore;
    use crate::model::professor::{EmailDomain, ProfessorRecord, SortColumn};
    use crate::store::StoreError;

    #[test]
    fn with_records_rejects_unnormalized_and_duplicate_emails() {
        let domain = EmailDomain::default();
        let err = RecordStore::with_records(
            domain.clone(),
            vec![ProfessorRecord::new("Ada", "ADA@uh.edu", "CS")],
        )
        .expect_err("mixed-case email must be rejected");
        assert!(matches!(err, StoreError::Validation(_)));

        let err = RecordStore::with_records(
            domain,
            vec![
                ProfessorRecord::new("Ada", "ada@uh.edu", "CS"),
                ProfessorRecord::new("Ada L.", "ada@uh.edu", "Math"),
            ],
        )
        .expect_err("duplicate email must be rejected");
        assert_eq!(err, StoreError::Duplicate("ada@uh.edu".to_string()));
    }

    #[test]
    fn descending_sort_keeps_ties_in_insertion_order() {
        let mut store = RecordStore::default();
        store.add("Ada", "ada", "CS").expect("add ada");
        store.add("Bob", "bob", "Math").expect("add bob");
        store.add("Cy", "cy", "CS").expect("add cy");

        let view = store.sorted_view(SortColumn::Department, false);
        let emails: Vec<_> = view.iter().map(|record| record.email.as_str()).collect();
        assert_eq!(emails, ["bob@uh.edu", "ada@uh.edu", "cy@uh.edu"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut store = RecordStore::default();
        store.add("bob", "bob", "CS").expect("add bob");
        store.add("Ada", "ada", "CS").expect("add ada");

        let view = store.sorted_view(SortColumn::Name, true);
        assert_eq!(view[0].name, "Ada");
        assert_eq!(view[1].name, "bob");
    }
}
