use super::*;
use shared::domain::JobId;

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("date")
}

#[test]
fn filename_carries_the_export_date() {
    assert_eq!(
        export_filename(date("2025-06-25")),
        "job-applications-2025-06-25.json"
    );
}

#[test]
fn rejects_payloads_that_are_not_arrays() {
    assert!(matches!(
        parse_snapshot("{}"),
        Err(ImportError::NotASequence)
    ));
    assert!(matches!(
        parse_snapshot("\"jobs\""),
        Err(ImportError::NotASequence)
    ));
}

#[test]
fn rejects_unparseable_text() {
    let err = parse_snapshot("not json").expect_err("should fail");
    assert!(matches!(err, ImportError::Parse(_)));
    assert_eq!(
        err.to_string(),
        "Error reading file. Please make sure it's a valid JSON file."
    );
}

#[test]
fn reports_the_index_of_a_malformed_entry() {
    let blob = r#"[
        {"id": 1, "company": "A", "position": "B", "appliedDate": "2024-01-01"},
        {"id": 2, "company": "C", "position": "D", "status": "ghosted", "appliedDate": "2024-01-02"}
    ]"#;
    match parse_snapshot(blob) {
        Err(ImportError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn rejects_duplicate_ids() {
    let blob = r#"[
        {"id": 5, "company": "A", "position": "B", "appliedDate": "2024-01-01"},
        {"id": 5, "company": "C", "position": "D", "appliedDate": "2024-01-02"}
    ]"#;
    assert!(matches!(
        parse_snapshot(blob),
        Err(ImportError::DuplicateId(5))
    ));
}

#[test]
fn accepts_records_exported_by_the_browser_version() {
    let blob = r#"[
      {
        "id": 1719000000000,
        "company": "Tech Corp",
        "position": "Frontend Developer",
        "location": "San Francisco, CA",
        "salary": "$80,000 - $100,000",
        "status": "applied",
        "appliedDate": "2024-06-15",
        "followUpDate": "",
        "notes": "",
        "contactEmail": "hr@techcorp.com",
        "jobUrl": "https://techcorp.com/careers"
      }
    ]"#;
    let records = parse_snapshot(blob).expect("parse");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, JobId(1719000000000));
    assert_eq!(records[0].follow_up_date, None);
    assert_eq!(records[0].notes, None);
}

#[test]
fn snapshot_is_pretty_printed() {
    let records = parse_snapshot(
        r#"[{"id": 1, "company": "A", "position": "B", "appliedDate": "2024-01-01"}]"#,
    )
    .expect("parse");
    let snapshot = build_snapshot(&records, date("2024-02-02")).expect("snapshot");
    assert!(snapshot.contents.starts_with("[\n  {\n    \"id\": 1,"));
    assert_eq!(parse_snapshot(&snapshot.contents).expect("reparse"), records);
}

#[tokio::test]
async fn writes_and_reads_snapshot_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let snapshot = Snapshot {
        filename: export_filename(date("2024-02-02")),
        contents: "[]".into(),
    };
    let path = write_snapshot(&dir.path().join("exports"), &snapshot)
        .await
        .expect("write");
    assert_eq!(read_snapshot_file(&path).await.expect("read"), "[]");

    let missing = read_snapshot_file(dir.path().join("missing.json")).await;
    assert!(matches!(missing, Err(ImportError::Read(_))));
}
