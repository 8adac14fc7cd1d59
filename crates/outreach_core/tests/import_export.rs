use outreach_core::sheet::{read_rows, write_xlsx, xlsx_bytes};
use outreach_core::{
    ImportError, Opportunity, RecordStore, ReplyStatus, ServiceError, SortColumn, TrackerConfig,
    TrackerService,
};
use std::fs;

const LEGACY_EXPORT: &str = "\
Professor Name,Professor Mail,Professor Department,Status,Opportunity
Ada Lovelace,alovelace@uh.edu,Computer Science,Replied,✅ Has
Charles Babbage,cbabbage@uh.edu,Mathematics,Applied,❌ Not
Grace Hopper,ghopper@navy.mil,Computer Science,Applied,❌ Not
";

#[test]
fn csv_import_understands_legacy_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.csv");
    fs::write(&path, LEGACY_EXPORT).unwrap();

    let mut store = RecordStore::default();
    let report = store.merge_import(read_rows(&path).unwrap()).report;

    assert_eq!(report.accepted, 2);
    assert_eq!(report.rejected, 1);
    let ada = store.get("alovelace").unwrap();
    assert_eq!(ada.status, ReplyStatus::Replied);
    assert_eq!(ada.opportunity, Opportunity::Has);
    assert_eq!(
        store.get("cbabbage").unwrap().opportunity,
        Opportunity::NotHas
    );
}

#[test]
fn xlsx_export_reads_back_through_import() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("professors.xlsx");

    let mut store = RecordStore::default();
    store.add("Ada Lovelace", "alovelace", "Computer Science").unwrap();
    store.add("Charles Babbage", "cbabbage", "Mathematics").unwrap();
    store.set_opportunity("cbabbage", Opportunity::Has).unwrap();
    write_xlsx(&path, store.records()).unwrap();

    let mut reloaded = RecordStore::default();
    let report = reloaded.merge_import(read_rows(&path).unwrap()).report;
    assert_eq!(report.accepted, 2);
    assert_eq!(report.coerced, 0);
    assert_eq!(reloaded.records(), store.records());
}

#[test]
fn xlsx_bytes_is_a_zip_container() {
    let mut store = RecordStore::default();
    store.add("Ada Lovelace", "alovelace", "Computer Science").unwrap();

    let bytes = xlsx_bytes(store.records()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn unsupported_and_corrupt_files_are_import_errors() {
    let dir = tempfile::tempdir().unwrap();

    let text = dir.path().join("list.txt");
    fs::write(&text, "Name\nAda\n").unwrap();
    assert!(matches!(
        read_rows(&text).unwrap_err(),
        ImportError::UnsupportedFormat(_)
    ));

    let corrupt = dir.path().join("list.xlsx");
    fs::write(&corrupt, "definitely not a zip archive").unwrap();
    assert!(matches!(
        read_rows(&corrupt).unwrap_err(),
        ImportError::Workbook(_)
    ));
}

#[test]
fn service_import_failure_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = dir.path().join("list.xlsx");
    fs::write(&corrupt, "definitely not a zip archive").unwrap();

    let mut service = TrackerService::open(&TrackerConfig::in_memory()).unwrap();
    service.add_professor("J Doe", "jdoe", "Physics").unwrap();

    let err = service.import_file(&corrupt).unwrap_err();
    assert!(matches!(err, ServiceError::Import(_)));
    assert_eq!(service.records().len(), 1);
}

#[test]
fn service_import_then_sorted_export() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("legacy.csv");
    let target = dir.path().join("sorted.xlsx");
    fs::write(&source, LEGACY_EXPORT).unwrap();

    let data_file = dir.path().join("professors.csv");
    let mut service = TrackerService::open(&TrackerConfig::with_data_file(&data_file)).unwrap();
    let report = service.import_file(&source).unwrap();
    assert_eq!(report.accepted, 2);
    assert!(data_file.exists());

    let written = service
        .export_xlsx(&target, Some((SortColumn::Name, false)))
        .unwrap();
    assert_eq!(written, 2);

    let rows = read_rows(&target).unwrap();
    assert_eq!(rows[0].value(&["name"]), Some("Charles Babbage"));
    assert_eq!(rows[1].value(&["name"]), Some("Ada Lovelace"));
}
