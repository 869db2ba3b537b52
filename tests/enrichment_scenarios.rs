mod common;

use common::*;
use wellmerge_core::config::DuplicatePolicy;
use wellmerge_core::error::Error;
use wellmerge_io::read_csv;
use wellmerge_refdb::ReferenceRecord;

#[tokio::test]
async fn test_matching_file_gets_well_name_on_every_row() {
    let h = harness(
        vec![ReferenceRecord::new("Acme Corp", "Rig1", job_date(), "WellA")],
        DuplicatePolicy::Last,
    );
    h.storage.insert(source("jobs/acme.csv"), ACME_CSV);

    let outcome = h.enricher.run(&source("jobs/acme.csv")).await.unwrap();
    assert_eq!(outcome.well_name, "WellA");
    assert_eq!(outcome.rows, 3);
    assert!(outcome.matched);
    assert_eq!(outcome.destination.bucket, OUTPUT_BUCKET);
    assert_eq!(outcome.destination.key, "jobs/acme.csv");

    let written = output_text(&h.storage, "jobs/acme.csv").expect("output written");
    assert_eq!(
        written,
        "client_name,rig_name,job_date,depth,well_name\n\
         Acme,Rig1,01/02/2023,100,WellA\n\
         Acme,Rig1,01/02/2023,200,WellA\n\
         Acme,Rig1,01/02/2023,300,WellA\n"
    );
}

#[tokio::test]
async fn test_unmatched_file_gets_empty_well_name_and_error_log() {
    let h = harness(
        vec![ReferenceRecord::new("Other", "Rig9", job_date(), "WellZ")],
        DuplicatePolicy::Last,
    );
    h.storage.insert(source("acme.csv"), ACME_CSV);

    let logs = CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(capture_subscriber(&logs));

    let outcome = h.enricher.run(&source("acme.csv")).await.unwrap();
    assert!(!outcome.matched);
    assert_eq!(outcome.candidates, 0);

    let enriched = read_csv(output_text(&h.storage, "acme.csv").unwrap().as_bytes()).unwrap();
    let well = enriched.column("well_name").unwrap();
    assert_eq!(well.len(), 3);
    assert!(well.values.iter().all(|v| v.is_empty()));

    let text = logs.contents();
    assert!(text.contains("ERROR"), "logs: {text}");
    assert!(text.contains("Missing well_name"), "logs: {text}");
    assert!(text.contains("client_name Acme rig_name Rig1 job_date 2023-01-02"));
}

#[tokio::test]
async fn test_missing_key_column_writes_nothing() {
    let h = harness(
        vec![ReferenceRecord::new("Acme", "Rig1", job_date(), "WellA")],
        DuplicatePolicy::Last,
    );
    h.storage
        .insert(source("nodate.csv"), "client_name,rig_name,depth\nAcme,Rig1,100\n");

    let err = h.enricher.run(&source("nodate.csv")).await.unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "job_date"), "{err:?}");
    assert!(output_text(&h.storage, "nodate.csv").is_none());
    assert_eq!(h.storage.len(), 1);
}

#[tokio::test]
async fn test_duplicate_matches_follow_policy() {
    let records = vec![
        ReferenceRecord::new("Acme", "Rig1", job_date(), "WellA"),
        ReferenceRecord::new("Acme", "Rig1", job_date(), "WellB"),
    ];

    let last = harness(records.clone(), DuplicatePolicy::Last);
    last.storage.insert(source("acme.csv"), ACME_CSV);
    let outcome = last.enricher.run(&source("acme.csv")).await.unwrap();
    assert_eq!(outcome.well_name, "WellB");
    assert_eq!(outcome.candidates, 2);

    let reject = harness(records, DuplicatePolicy::Reject);
    reject.storage.insert(source("acme.csv"), ACME_CSV);
    let err = reject.enricher.run(&source("acme.csv")).await.unwrap_err();
    match err {
        Error::AmbiguousWell { candidates } => assert_eq!(candidates, vec!["WellA", "WellB"]),
        other => panic!("expected AmbiguousWell, got {other:?}"),
    }
    assert!(output_text(&reject.storage, "acme.csv").is_none());
}

#[tokio::test]
async fn test_mixed_key_values_are_rejected() {
    let h = harness(
        vec![ReferenceRecord::new("Acme", "Rig1", job_date(), "WellA")],
        DuplicatePolicy::Last,
    );
    h.storage.insert(
        source("mixed.csv"),
        "client_name,rig_name,job_date\nAcme,Rig1,01/02/2023\nAcme,Rig2,01/02/2023\n",
    );

    let err = h.enricher.run(&source("mixed.csv")).await.unwrap_err();
    assert!(matches!(err, Error::AmbiguousValue { ref column, .. } if column == "rig_name"));
}

#[tokio::test]
async fn test_blank_client_name_is_rejected_without_output() {
    let h = harness(
        vec![ReferenceRecord::new("Totally Different Co", "Rig1", job_date(), "WrongWell")],
        DuplicatePolicy::Last,
    );
    h.storage.insert(
        source("blank.csv"),
        "client_name,rig_name,job_date,depth\n,Rig1,01/02/2023,100\n,Rig1,01/02/2023,200\n",
    );

    let err = h.enricher.run(&source("blank.csv")).await.unwrap_err();
    assert!(matches!(err, Error::BlankValue(ref c) if c == "client_name"), "{err:?}");
    assert!(output_text(&h.storage, "blank.csv").is_none());
}

#[tokio::test]
async fn test_unreachable_reference_store_writes_nothing() {
    let h = harness(Vec::new(), DuplicatePolicy::Last);
    h.storage.insert(source("acme.csv"), ACME_CSV);
    h.reference.set_unavailable(true);

    let err = h.enricher.run(&source("acme.csv")).await.unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
    assert!(output_text(&h.storage, "acme.csv").is_none());
}

#[tokio::test]
async fn test_run_all_processes_each_record_in_order() {
    let h = harness(
        vec![ReferenceRecord::new("Acme", "Rig1", job_date(), "WellA")],
        DuplicatePolicy::Last,
    );
    h.storage.insert(source("a.csv"), ACME_CSV);
    h.storage.insert(source("b.csv"), ACME_CSV);

    let outcomes = h
        .enricher
        .run_all(&[source("a.csv"), source("b.csv")])
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].source.key, "a.csv");
    assert_eq!(outcomes[1].source.key, "b.csv");
    assert!(output_text(&h.storage, "b.csv").is_some());
}
