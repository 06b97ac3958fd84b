#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use medtrack_analytics::{
    models::{
        DosageId, DosageSchedule, EventCategory, EventId, MedicalEvent, MedicationDosage,
        MedicationId, PatientId, Severity,
    },
    store::{DosageStore, EventStore, InMemoryStore, StoreError, StoreResult},
    Analytics, AnalyticsPolicy,
};

pub const PATIENT: PatientId = PatientId(1);
pub const OTHER_PATIENT: PatientId = PatientId(2);
pub const IBUPROFEN: MedicationId = MedicationId(10);
pub const SERTRALINE: MedicationId = MedicationId(20);

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

pub fn hours(h: i64) -> DateTime<Utc> {
    t0() + Duration::hours(h)
}

pub fn event(
    id: i64,
    at: DateTime<Utc>,
    category: EventCategory,
    severity: Severity,
) -> MedicalEvent {
    MedicalEvent {
        id: EventId(id),
        patient_id: PATIENT,
        medication_id: None,
        occurred_at: at,
        title: format!("event {id}"),
        description: "recorded in test".to_string(),
        category,
        severity,
        duration_minutes: None,
    }
}

pub fn symptom(id: i64, at: DateTime<Utc>) -> MedicalEvent {
    event(id, at, EventCategory::Symptom, Severity::Mild)
}

pub fn dose(id: i64, medication: MedicationId, at: DateTime<Utc>) -> MedicationDosage {
    MedicationDosage {
        id: DosageId(id),
        patient_id: PATIENT,
        medication_id: medication,
        administered_at: at,
        amount: 200.0,
        unit: "mg".to_string(),
        schedule: DosageSchedule::Am,
        administered: true,
    }
}

pub fn base_store() -> InMemoryStore {
    InMemoryStore::new()
        .with_medication(IBUPROFEN, "Ibuprofen")
        .with_medication(SERTRALINE, "Sertraline")
}

pub fn analytics(store: InMemoryStore) -> Analytics {
    Analytics::from_store(store, AnalyticsPolicy::default())
}

/// Store whose every query fails, as an unreachable database would.
pub struct FailingStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

impl EventStore for FailingStore {
    fn events_for_patient(&self, _: PatientId) -> StoreResult<Vec<MedicalEvent>> {
        down()
    }

    fn events_between(
        &self,
        _: PatientId,
        _: DateTime<Utc>,
        _: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicalEvent>> {
        down()
    }

    fn events_by_category_between(
        &self,
        _: PatientId,
        _: EventCategory,
        _: DateTime<Utc>,
        _: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicalEvent>> {
        down()
    }
}

impl DosageStore for FailingStore {
    fn dosages_for(&self, _: PatientId, _: MedicationId) -> StoreResult<Vec<MedicationDosage>> {
        down()
    }

    fn dosages_for_between(
        &self,
        _: PatientId,
        _: MedicationId,
        _: DateTime<Utc>,
        _: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicationDosage>> {
        down()
    }

    fn dosages_between(
        &self,
        _: PatientId,
        _: DateTime<Utc>,
        _: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicationDosage>> {
        down()
    }

    fn dosages_for_patient(&self, _: PatientId) -> StoreResult<Vec<MedicationDosage>> {
        down()
    }

    fn distinct_medication_ids(&self, _: PatientId) -> StoreResult<Vec<MedicationId>> {
        down()
    }

    fn medication_name(&self, _: MedicationId) -> StoreResult<Option<String>> {
        down()
    }
}
