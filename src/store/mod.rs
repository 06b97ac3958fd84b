//! Read-only query contracts over medical events and dosage administrations.
//!
//! Range queries are inclusive on both ends; callers needing half-open windows
//! filter the upper bound themselves.

pub mod files;
pub mod memory;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{EventCategory, MedicalEvent, MedicationDosage, MedicationId, PatientId};

pub use files::{seed_demo_data, CsvStore};
pub use memory::InMemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("{0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait EventStore: Send + Sync {
    /// Whole event history of a patient.
    fn events_for_patient(&self, patient: PatientId) -> StoreResult<Vec<MedicalEvent>>;

    fn events_between(
        &self,
        patient: PatientId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicalEvent>>;

    fn events_by_category_between(
        &self,
        patient: PatientId,
        category: EventCategory,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicalEvent>>;
}

pub trait DosageStore: Send + Sync {
    fn dosages_for(
        &self,
        patient: PatientId,
        medication: MedicationId,
    ) -> StoreResult<Vec<MedicationDosage>>;

    fn dosages_for_between(
        &self,
        patient: PatientId,
        medication: MedicationId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicationDosage>>;

    /// Dosages of any medication administered within the range.
    fn dosages_between(
        &self,
        patient: PatientId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicationDosage>>;

    fn dosages_for_patient(&self, patient: PatientId) -> StoreResult<Vec<MedicationDosage>>;

    /// Medications the patient has dosage records for, in first-seen order.
    fn distinct_medication_ids(&self, patient: PatientId) -> StoreResult<Vec<MedicationId>>;

    fn medication_name(&self, medication: MedicationId) -> StoreResult<Option<String>>;
}
