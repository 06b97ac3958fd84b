mod common;

use std::fs;

use common::*;
use medtrack_analytics::{
    models::{EventCategory, MedicationId, PatientId},
    store::{seed_demo_data, CsvStore, DosageStore, EventStore, StoreError},
    Analytics, AnalyticsPolicy,
};

#[test]
fn missing_files_load_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::open(dir.path()).load().unwrap();
    assert_eq!(store.event_count(), 0);
    assert_eq!(store.dosage_count(), 0);
}

#[test]
fn reads_exported_rows() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("medications.csv"), "id,name\n10,Ibuprofen\n").unwrap();
    fs::write(
        dir.path().join("events.csv"),
        "id,patient_id,medication_id,occurred_at,title,description,category,severity,duration_minutes\n\
         1,1,,2024-05-01T10:00:00Z,Headache,Dull ache,SYMPTOM,MILD,30\n\
         2,1,10,2024-05-01T12:00:00Z,Nausea,After lunch,SIDE_EFFECT,MODERATE,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("dosages.csv"),
        "id,patient_id,medication_id,administered_at,amount,unit,schedule,administered\n\
         1,1,10,2024-05-01T08:00:00Z,200,mg,AM,true\n",
    )
    .unwrap();

    let store = CsvStore::open(dir.path()).load().unwrap();
    assert_eq!(store.medication_name(MedicationId(10)).unwrap().as_deref(), Some("Ibuprofen"));

    let events = store.events_for_patient(PatientId(1)).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].medication_id, None);
    assert_eq!(events[1].category, EventCategory::SideEffect);
    assert_eq!(events[1].duration_minutes, None);

    let result = Analytics::from_store(store, AnalyticsPolicy::default())
        .analyze_correlation(PatientId(1), MedicationId(10))
        .unwrap();
    assert_eq!(result.total_events_after_dosage, 2);
    assert_eq!(result.correlation_percentage, 200.0);
}

#[test]
fn malformed_rows_are_store_errors() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("events.csv"),
        "id,patient_id,medication_id,occurred_at,title,description,category,severity,duration_minutes\n\
         1,1,,not-a-date,Headache,,SYMPTOM,MILD,\n",
    )
    .unwrap();

    let err = CsvStore::open(dir.path()).load().unwrap_err();
    assert!(matches!(err, StoreError::Csv { .. }));
}

#[test]
fn seeded_data_round_trips_through_the_loader() {
    let dir = tempfile::tempdir().unwrap();
    let (events, dosages) = seed_demo_data(dir.path(), t0()).unwrap();

    let store = CsvStore::open(dir.path()).load().unwrap();
    assert_eq!(store.event_count(), events);
    assert_eq!(store.dosage_count(), dosages);
    assert_eq!(
        store.distinct_medication_ids(PatientId(1)).unwrap(),
        vec![MedicationId(1), MedicationId(2)]
    );
    assert_eq!(
        store.medication_name(MedicationId(3)).unwrap().as_deref(),
        Some("Sumatriptan")
    );
}
