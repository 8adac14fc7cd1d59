//! CSV file load/save for `RecordStore`.
//!
//! # Side effects
//! - Emits `store_load` / `store_save` events with duration and status.

use super::{PersistError, PersistResult};
use crate::model::professor::{
    EmailDomain, Opportunity, ProfessorRecord, ReplyStatus, COLUMN_LABELS,
};
use crate::store::record_store::RecordStore;
use log::{error, info};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

#[derive(Debug, Deserialize)]
struct PersistedRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Department", default)]
    department: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Opportunity")]
    opportunity: String,
}

/// Loads the store from `path`, or returns an empty store when the file
/// does not exist.
///
/// # Errors
/// - `Io` / `Csv` when the file cannot be read or parsed.
/// - `InvalidData` when a row has an unknown enum label, a malformed email,
///   or duplicates an earlier email.
pub fn load_store(path: impl AsRef<Path>, domain: EmailDomain) -> PersistResult<RecordStore> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=store_load module=persist status=start");

    if !path.exists() {
        info!(
            "event=store_load module=persist status=ok mode=empty duration_ms={}",
            started_at.elapsed().as_millis()
        );
        return Ok(RecordStore::new(domain));
    }

    match read_store(path, domain) {
        Ok(store) => {
            info!(
                "event=store_load module=persist status=ok mode=file records={} duration_ms={}",
                store.len(),
                started_at.elapsed().as_millis()
            );
            Ok(store)
        }
        Err(err) => {
            error!(
                "event=store_load module=persist status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Writes every record to `path`, replacing any previous file atomically.
///
/// Records are written in insertion order with a header row, even when the
/// store is empty.
pub fn save_store(path: impl AsRef<Path>, store: &RecordStore) -> PersistResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=store_save module=persist status=start");

    match write_store(path, store) {
        Ok(()) => {
            info!(
                "event=store_save module=persist status=ok records={} duration_ms={}",
                store.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=store_save module=persist status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn read_store(path: &Path, domain: EmailDomain) -> PersistResult<RecordStore> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<PersistedRow>().enumerate() {
        records.push(parse_persisted_row(index + 1, row?)?);
    }

    RecordStore::with_records(domain, records)
        .map_err(|err| PersistError::InvalidData(err.to_string()))
}

fn parse_persisted_row(line: usize, row: PersistedRow) -> PersistResult<ProfessorRecord> {
    let status = row.status.parse::<ReplyStatus>().map_err(|err| {
        PersistError::InvalidData(format!("row {line}: {err}"))
    })?;
    let opportunity = row.opportunity.parse::<Opportunity>().map_err(|err| {
        PersistError::InvalidData(format!("row {line}: {err}"))
    })?;

    Ok(ProfessorRecord {
        name: row.name,
        email: row.email,
        department: row.department,
        status,
        opportunity,
    })
}

fn write_store(path: &Path, store: &RecordStore) -> PersistResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    // Same directory as the target so the final rename stays on one filesystem.
    let mut staged = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::Writer::from_writer(staged.as_file_mut());
        writer.write_record(COLUMN_LABELS)?;
        for record in store.records() {
            writer.write_record(record.cells())?;
        }
        writer.flush()?;
    }
    staged.as_file_mut().flush()?;
    staged.as_file().sync_all()?;
    staged
        .persist(path)
        .map_err(|err| PersistError::Io(err.error))?;
    Ok(())
}
