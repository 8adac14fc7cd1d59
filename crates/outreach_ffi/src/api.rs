//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the tracker table operations to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok`, code and message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call loads the data file, applies one edit and saves it while
//!   holding a process-wide lock, so overlapping calls cannot lose edits.

use log::warn;
use outreach_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, EmailDomain,
    MergeReport, ProfessorRecord, RecordField, ServiceError, SortColumn, TrackerConfig,
    TrackerService,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const DATA_FILE_NAME: &str = "outreach_professors.csv";
static DATA_FILE: OnceLock<PathBuf> = OnceLock::new();
static SERVICE_LOCK: Mutex<()> = Mutex::new(());

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Pins the CSV file backing every later call.
///
/// # FFI contract
/// - Must run before the first data call to take effect.
/// - Repeating with the same path is a no-op; a different path is rejected.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_data_file(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "data file path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DATA_FILE.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "data file already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// One table row as display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessorItem {
    pub name: String,
    pub email: String,
    pub department: String,
    /// `Applied|Replied`.
    pub status: String,
    /// `Has|Not`.
    pub opportunity: String,
}

/// Full-table response for list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessorListResponse {
    pub ok: bool,
    pub items: Vec<ProfessorItem>,
    pub message: String,
}

/// Result envelope for single-record edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessorActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Record as stored after the edit (or as removed, for delete).
    pub item: Option<ProfessorItem>,
    /// `validation|duplicate|not_found|persist_failed|...` on failure.
    pub error_code: Option<String>,
    /// Human-readable response message for UI display.
    pub message: String,
}

impl ProfessorActionResponse {
    fn success(message: impl Into<String>, record: &ProfessorRecord) -> Self {
        Self {
            ok: true,
            item: Some(to_item(record)),
            error_code: None,
            message: message.into(),
        }
    }

    fn failure(operation: &str, err: &ServiceError) -> Self {
        Self {
            ok: false,
            item: None,
            error_code: Some(err.code().to_string()),
            message: format!("{operation} failed: {err}"),
        }
    }
}

/// Aggregate counts for an import call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResponse {
    pub ok: bool,
    pub accepted: u32,
    pub duplicate: u32,
    pub rejected: u32,
    pub coerced: u32,
    pub message: String,
}

/// Result envelope for export calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub row_count: u32,
    pub message: String,
}

/// Lists tracked professors, optionally sorted.
///
/// `sort_column` accepts `name|email|department|status|opportunity`
/// (case-insensitive); `None` keeps insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn professors_list(sort_column: Option<String>, ascending: bool) -> ProfessorListResponse {
    let column = match parse_sort_column(sort_column) {
        Ok(column) => column,
        Err(message) => {
            return ProfessorListResponse {
                ok: false,
                items: Vec::new(),
                message,
            }
        }
    };

    match with_service(|service| {
        Ok(match column {
            Some(column) => service.sorted_view(column, ascending),
            None => service.records().to_vec(),
        })
    }) {
        Ok(records) => ProfessorListResponse {
            ok: true,
            message: if records.is_empty() {
                "No professors added yet.".to_string()
            } else {
                format!("{} professor(s).", records.len())
            },
            items: records.iter().map(to_item).collect(),
        },
        Err(err) => ProfessorListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("professors_list failed: {err}"),
        },
    }
}

/// Adds a professor with status `Applied` and opportunity `Not`.
#[flutter_rust_bridge::frb(sync)]
pub fn professor_add(name: String, email: String, department: String) -> ProfessorActionResponse {
    match with_service(|service| service.add_professor(&name, &email, &department)) {
        Ok(record) => ProfessorActionResponse::success("Professor added.", &record),
        Err(err) => ProfessorActionResponse::failure("professor_add", &err),
    }
}

/// Sets `status` or `opportunity` from a dropdown label.
#[flutter_rust_bridge::frb(sync)]
pub fn professor_update_field(
    email: String,
    field: String,
    value: String,
) -> ProfessorActionResponse {
    let field = match field.parse::<RecordField>() {
        Ok(field) => field,
        Err(err) => {
            return ProfessorActionResponse {
                ok: false,
                item: None,
                error_code: Some("validation".to_string()),
                message: format!("professor_update_field failed: {err}"),
            }
        }
    };
    match with_service(|service| service.update_field(&email, field, &value)) {
        Ok(record) => ProfessorActionResponse::success("Professor updated.", &record),
        Err(err) => ProfessorActionResponse::failure("professor_update_field", &err),
    }
}

/// Deletes a professor by email; missing emails report `not_found`.
#[flutter_rust_bridge::frb(sync)]
pub fn professor_delete(email: String) -> ProfessorActionResponse {
    match with_service(|service| service.delete_professor(&email)) {
        Ok(record) => ProfessorActionResponse::success("Professor deleted.", &record),
        Err(err) => ProfessorActionResponse::failure("professor_delete", &err),
    }
}

/// Merges a CSV/XLSX file into the tracked list.
#[flutter_rust_bridge::frb(sync)]
pub fn professors_import(file_path: String) -> ImportResponse {
    match with_service(|service| service.import_file(file_path.trim())) {
        Ok(report) => ImportResponse {
            ok: true,
            accepted: count(report.accepted),
            duplicate: count(report.duplicate),
            rejected: count(report.rejected),
            coerced: count(report.coerced),
            message: import_message(&report),
        },
        Err(err) => ImportResponse {
            ok: false,
            accepted: 0,
            duplicate: 0,
            rejected: 0,
            coerced: 0,
            message: format!("professors_import failed: {err}"),
        },
    }
}

/// Writes the list to an XLSX file, optionally sorted.
#[flutter_rust_bridge::frb(sync)]
pub fn professors_export(
    file_path: String,
    sort_column: Option<String>,
    ascending: bool,
) -> ExportResponse {
    let order = match parse_sort_column(sort_column) {
        Ok(column) => column.map(|column| (column, ascending)),
        Err(message) => {
            return ExportResponse {
                ok: false,
                row_count: 0,
                message,
            }
        }
    };
    match with_service(|service| service.export_xlsx(file_path.trim(), order)) {
        Ok(rows) => ExportResponse {
            ok: true,
            row_count: count(rows),
            message: format!("Exported {rows} professor(s)."),
        },
        Err(err) => ExportResponse {
            ok: false,
            row_count: 0,
            message: format!("professors_export failed: {err}"),
        },
    }
}

fn resolve_data_file() -> PathBuf {
    DATA_FILE
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("OUTREACH_DATA_FILE") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DATA_FILE_NAME)
        })
        .clone()
}

fn resolve_domain() -> EmailDomain {
    match std::env::var("OUTREACH_EMAIL_DOMAIN") {
        Ok(raw) if !raw.trim().is_empty() => EmailDomain::parse(&raw).unwrap_or_else(|err| {
            warn!("event=ffi_config module=ffi status=error error={err}");
            EmailDomain::default()
        }),
        _ => EmailDomain::default(),
    }
}

fn with_service<T>(
    f: impl FnOnce(&mut TrackerService) -> Result<T, ServiceError>,
) -> Result<T, ServiceError> {
    let _guard = SERVICE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let config = TrackerConfig {
        email_domain: resolve_domain(),
        ..TrackerConfig::with_data_file(resolve_data_file())
    };
    let mut service = TrackerService::open(&config)?;
    f(&mut service)
}

fn parse_sort_column(sort_column: Option<String>) -> Result<Option<SortColumn>, String> {
    match sort_column {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse::<SortColumn>()
            .map(Some)
            .map_err(|err| err.to_string()),
        _ => Ok(None),
    }
}

fn import_message(report: &MergeReport) -> String {
    format!(
        "Imported {} professor(s); {} duplicate(s), {} invalid.",
        report.accepted, report.duplicate, report.rejected
    )
}

fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_item(record: &ProfessorRecord) -> ProfessorItem {
    ProfessorItem {
        name: record.name.clone(),
        email: record.email.clone(),
        department: record.department.clone(),
        status: record.status.label().to_string(),
        opportunity: record.opportunity.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_data_file, core_version, init_logging, professor_add, professor_delete,
        professor_update_field, professors_export, professors_import, professors_list,
        resolve_data_file,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_data_file_is_idempotent_for_active_path() {
        let active = resolve_data_file();
        assert!(configure_data_file(active.display().to_string()).is_empty());
        assert!(!configure_data_file("elsewhere.csv".to_string()).is_empty());
        assert!(!configure_data_file("  ".to_string()).is_empty());
    }

    #[test]
    fn add_update_delete_flow() {
        let local = unique_token("ffi-flow");
        let added = professor_add(
            "Ada Lovelace".to_string(),
            local.clone(),
            "Computer Science".to_string(),
        );
        assert!(added.ok, "{}", added.message);
        let item = added.item.expect("add should return the stored item");
        assert_eq!(item.email, format!("{local}@uh.edu"));
        assert_eq!(item.status, "Applied");
        assert_eq!(item.opportunity, "Not");

        let duplicate = professor_add(
            "Ada".to_string(),
            item.email.to_uppercase(),
            "CS".to_string(),
        );
        assert!(!duplicate.ok);
        assert_eq!(duplicate.error_code.as_deref(), Some("duplicate"));

        let updated =
            professor_update_field(item.email.clone(), "status".to_string(), "Replied".to_string());
        assert!(updated.ok, "{}", updated.message);
        assert_eq!(updated.item.expect("updated item").status, "Replied");

        let listed = professors_list(Some("email".to_string()), true);
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items.iter().any(|entry| entry.email == item.email));

        let deleted = professor_delete(item.email.clone());
        assert!(deleted.ok, "{}", deleted.message);
        let again = professor_delete(item.email);
        assert_eq!(again.error_code.as_deref(), Some("not_found"));
    }

    #[test]
    fn update_field_rejects_unknown_field() {
        let response =
            professor_update_field("x@uh.edu".to_string(), "name".to_string(), "y".to_string());
        assert!(!response.ok);
        assert_eq!(response.error_code.as_deref(), Some("validation"));
    }

    #[test]
    fn list_rejects_unknown_sort_column() {
        let response = professors_list(Some("salary".to_string()), true);
        assert!(!response.ok);
        assert!(response.message.contains("salary"));
    }

    #[test]
    fn import_reports_counts_and_export_writes_file() {
        let dir = std::env::temp_dir().join(unique_token("ffi-import"));
        std::fs::create_dir_all(&dir).expect("create fixture dir");
        let first = unique_token("ffi-import-a");
        let source = dir.join("batch.csv");
        std::fs::write(
            &source,
            format!("Name,Email,Department\nA,{first},X\nB,{first},Y\nC,c@gmail.com,Z\n"),
        )
        .expect("write import fixture");

        let response = professors_import(source.display().to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.accepted, 1);
        assert_eq!(response.duplicate, 1);
        assert_eq!(response.rejected, 1);

        let target = dir.join("export.xlsx");
        let exported = professors_export(target.display().to_string(), None, true);
        assert!(exported.ok, "{}", exported.message);
        assert!(exported.row_count >= 1);
        assert!(target.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
