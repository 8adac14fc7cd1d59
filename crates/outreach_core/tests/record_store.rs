use outreach_core::{
    EmailDomain, Opportunity, ProfessorValidationError, RawRow, RecordField, RecordStore,
    ReplyStatus, SortColumn, StoreError,
};

fn store_with(entries: &[(&str, &str, &str)]) -> RecordStore {
    let mut store = RecordStore::default();
    for (name, email, department) in entries {
        store.add(name, email, department).unwrap();
    }
    store
}

fn row(name: &str, email: &str, department: &str) -> RawRow {
    RawRow::default()
        .with("Name", name)
        .with("Email", email)
        .with("Department", department)
}

#[test]
fn add_sets_default_status_fields() {
    let mut store = RecordStore::default();
    store.add("Ada Lovelace", "alovelace", "Computer Science").unwrap();

    let record = store.get("alovelace@uh.edu").unwrap();
    assert_eq!(record.name, "Ada Lovelace");
    assert_eq!(record.department, "Computer Science");
    assert_eq!(record.status, ReplyStatus::Applied);
    assert_eq!(record.opportunity, Opportunity::NotHas);
}

#[test]
fn add_normalizes_bare_and_full_addresses_to_one_suffix() {
    let mut store = RecordStore::default();
    store.add("J Doe", "jdoe", "Physics").unwrap();
    store.add("K Roe", "kroe@uh.edu", "Physics").unwrap();

    let emails: Vec<_> = store.records().iter().map(|r| r.email.as_str()).collect();
    assert_eq!(emails, ["jdoe@uh.edu", "kroe@uh.edu"]);
}

#[test]
fn add_rejects_foreign_domain_and_blank_fields() {
    let mut store = RecordStore::default();

    let err = store.add("J Doe", "jdoe@gmail.com", "Physics").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ProfessorValidationError::InvalidEmail { .. })
    ));

    let err = store.add("  ", "jdoe", "Physics").unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(ProfessorValidationError::EmptyField("name"))
    );

    let err = store.add("J Doe", "jdoe", "").unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(ProfessorValidationError::EmptyField("department"))
    );

    let err = store.add("J Doe", "", "Physics").unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(ProfessorValidationError::EmptyField("email"))
    );
    assert!(store.is_empty());
}

#[test]
fn add_rejects_email_differing_only_by_case_and_whitespace() {
    let mut store = store_with(&[("J Doe", "jdoe", "Physics")]);

    let err = store.add("John Doe", "  JDOE@UH.EDU ", "Chemistry").unwrap_err();
    assert_eq!(err, StoreError::Duplicate("jdoe@uh.edu".to_string()));
    assert_eq!(store.len(), 1);
}

#[test]
fn custom_domain_is_applied() {
    let domain = EmailDomain::parse("cougarnet.uh.edu").unwrap();
    let mut store = RecordStore::new(domain);
    store.add("J Doe", "jdoe", "Physics").unwrap();
    assert_eq!(store.records()[0].email, "jdoe@cougarnet.uh.edu");
}

#[test]
fn update_field_changes_only_target_field_and_is_idempotent() {
    let mut store = store_with(&[("J Doe", "jdoe", "Physics"), ("K Roe", "kroe", "Math")]);
    let before = store.records().to_vec();

    store
        .update_field("jdoe", RecordField::Status, "Replied")
        .unwrap();
    let once = store.records().to_vec();
    store
        .update_field("jdoe@uh.edu", RecordField::Status, "Replied")
        .unwrap();
    assert_eq!(store.records(), once.as_slice());

    assert_eq!(once[0].status, ReplyStatus::Replied);
    assert_eq!(once[0].opportunity, before[0].opportunity);
    assert_eq!(once[0].name, before[0].name);
    assert_eq!(once[0].department, before[0].department);
    assert_eq!(once[1], before[1]);
}

#[test]
fn update_field_reports_not_found_and_invalid_values() {
    let mut store = store_with(&[("J Doe", "jdoe", "Physics")]);

    let err = store
        .update_field("nobody", RecordField::Status, "Replied")
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    let err = store
        .update_field("jdoe", RecordField::Opportunity, "perhaps")
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ProfessorValidationError::UnknownOpportunity(_))
    ));
    assert_eq!(store.records()[0].opportunity, Opportunity::NotHas);

    let updated = store
        .update_field("jdoe", RecordField::Opportunity, "Has")
        .unwrap();
    assert_eq!(updated.opportunity, Opportunity::Has);
}

#[test]
fn typed_setters_update_fields() {
    let mut store = store_with(&[("J Doe", "jdoe", "Physics")]);
    store.set_status("jdoe", ReplyStatus::Replied).unwrap();
    store.set_opportunity("jdoe", Opportunity::Has).unwrap();

    let record = store.get("jdoe").unwrap();
    assert_eq!(record.status, ReplyStatus::Replied);
    assert_eq!(record.opportunity, Opportunity::Has);
}

#[test]
fn delete_removes_exactly_one_record_then_reports_not_found() {
    let mut store = store_with(&[
        ("J Doe", "jdoe", "Physics"),
        ("K Roe", "kroe", "Math"),
        ("L Poe", "lpoe", "Art"),
    ]);

    let removed = store.delete("KROE").unwrap();
    assert_eq!(removed.email, "kroe@uh.edu");
    assert_eq!(store.len(), 2);

    let err = store.delete("kroe@uh.edu").unwrap_err();
    assert_eq!(err, StoreError::NotFound("kroe@uh.edu".to_string()));
    assert_eq!(store.len(), 2);

    let emails: Vec<_> = store.records().iter().map(|r| r.email.as_str()).collect();
    assert_eq!(emails, ["jdoe@uh.edu", "lpoe@uh.edu"]);
}

#[test]
fn merge_counts_accepted_duplicate_and_rejected_rows() {
    let mut store = store_with(&[("J Doe", "jdoe", "Physics")]);

    let outcome = store.merge_import(vec![
        row("K Roe", "kroe", "Math"),
        row("J Doe", "JDoe@uh.edu", "Physics"),
        row("M Moe", "mmoe@gmail.com", "Art"),
    ]);

    assert_eq!(outcome.report.accepted, 1);
    assert_eq!(outcome.report.duplicate, 1);
    assert_eq!(outcome.report.rejected, 1);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(store.get("kroe").unwrap().department, "Math");
}

#[test]
fn merge_keeps_first_occurrence_within_batch() {
    let mut store = RecordStore::default();

    let report = store
        .merge_import(vec![
            row("First", "dup", "Physics").with("Status", "Replied"),
            row("Second", "DUP@uh.edu", "Math"),
        ])
        .report;

    assert_eq!(report.accepted, 1);
    assert_eq!(report.duplicate, 1);
    let record = store.get("dup").unwrap();
    assert_eq!(record.name, "First");
    assert_eq!(record.status, ReplyStatus::Replied);
}

#[test]
fn merge_defaults_missing_and_coerces_invalid_enum_values() {
    let mut store = RecordStore::default();

    let report = store
        .merge_import(vec![
            row("A", "a", "X"),
            row("B", "b", "X")
                .with("Status", "ghosted")
                .with("Chance", "✅ Has"),
        ])
        .report;

    assert_eq!(report.accepted, 2);
    assert_eq!(report.coerced, 1);
    let a = store.get("a").unwrap();
    assert_eq!(a.status, ReplyStatus::Applied);
    assert_eq!(a.opportunity, Opportunity::NotHas);
    let b = store.get("b").unwrap();
    assert_eq!(b.status, ReplyStatus::Applied);
    assert_eq!(b.opportunity, Opportunity::Has);
}

#[test]
fn merge_rejects_rows_without_name_or_email_and_skips_blank_rows() {
    let mut store = RecordStore::default();

    let report = store
        .merge_import(vec![
            row("", "a", "X"),
            row("B", "", "X"),
            RawRow::from_cells(&["Name", "Email"], &["", " "]),
        ])
        .report;

    assert_eq!(report.accepted, 0);
    assert_eq!(report.rejected, 2);
    assert_eq!(report.total(), 2);
    assert!(store.is_empty());
}

#[test]
fn sorted_view_is_stable_across_repeated_calls() {
    let mut store = store_with(&[
        ("Cy", "cy", "Physics"),
        ("Ada", "ada", "Math"),
        ("Bob", "bob", "Physics"),
        ("Dee", "dee", "Math"),
    ]);
    store.set_status("bob", ReplyStatus::Replied).unwrap();

    for _ in 0..3 {
        let by_department = store.sorted_view(SortColumn::Department, true);
        let emails: Vec<_> = by_department.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(
            emails,
            ["ada@uh.edu", "dee@uh.edu", "cy@uh.edu", "bob@uh.edu"]
        );
    }

    let by_status = store.sorted_view(SortColumn::Status, false);
    let emails: Vec<_> = by_status.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(
        emails,
        ["bob@uh.edu", "cy@uh.edu", "ada@uh.edu", "dee@uh.edu"]
    );

    let insertion: Vec<_> = store.records().iter().map(|r| r.email.as_str()).collect();
    assert_eq!(
        insertion,
        ["cy@uh.edu", "ada@uh.edu", "bob@uh.edu", "dee@uh.edu"]
    );
}
