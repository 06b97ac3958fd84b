//! Vector-backed store used by the CSV loader, the demo server and tests.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{
    EventCategory, MedicalEvent, Medication, MedicationDosage, MedicationId, PatientId,
};

use super::{DosageStore, EventStore, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    medications: HashMap<MedicationId, String>,
    events: Vec<MedicalEvent>,
    dosages: Vec<MedicationDosage>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        medications: Vec<Medication>,
        events: Vec<MedicalEvent>,
        dosages: Vec<MedicationDosage>,
    ) -> Self {
        Self {
            medications: medications.into_iter().map(|m| (m.id, m.name)).collect(),
            events,
            dosages,
        }
    }

    pub fn with_medication(mut self, id: MedicationId, name: impl Into<String>) -> Self {
        self.medications.insert(id, name.into());
        self
    }

    pub fn with_event(mut self, event: MedicalEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_dosage(mut self, dosage: MedicationDosage) -> Self {
        self.dosages.push(dosage);
        self
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn dosage_count(&self) -> usize {
        self.dosages.len()
    }

    fn events_where<F>(&self, patient: PatientId, keep: F) -> Vec<MedicalEvent>
    where
        F: Fn(&MedicalEvent) -> bool,
    {
        self.events
            .iter()
            .filter(|e| e.patient_id == patient && keep(e))
            .cloned()
            .collect()
    }

    fn dosages_where<F>(&self, patient: PatientId, keep: F) -> Vec<MedicationDosage>
    where
        F: Fn(&MedicationDosage) -> bool,
    {
        self.dosages
            .iter()
            .filter(|d| d.patient_id == patient && keep(d))
            .cloned()
            .collect()
    }
}

fn within(at: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    at >= start && at <= end
}

impl EventStore for InMemoryStore {
    fn events_for_patient(&self, patient: PatientId) -> StoreResult<Vec<MedicalEvent>> {
        Ok(self.events_where(patient, |_| true))
    }

    fn events_between(
        &self,
        patient: PatientId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicalEvent>> {
        Ok(self.events_where(patient, |e| within(e.occurred_at, start, end)))
    }

    fn events_by_category_between(
        &self,
        patient: PatientId,
        category: EventCategory,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicalEvent>> {
        Ok(self.events_where(patient, |e| {
            e.category == category && within(e.occurred_at, start, end)
        }))
    }
}

impl DosageStore for InMemoryStore {
    fn dosages_for(
        &self,
        patient: PatientId,
        medication: MedicationId,
    ) -> StoreResult<Vec<MedicationDosage>> {
        Ok(self.dosages_where(patient, |d| d.medication_id == medication))
    }

    fn dosages_for_between(
        &self,
        patient: PatientId,
        medication: MedicationId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicationDosage>> {
        Ok(self.dosages_where(patient, |d| {
            d.medication_id == medication && within(d.administered_at, start, end)
        }))
    }

    fn dosages_between(
        &self,
        patient: PatientId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MedicationDosage>> {
        Ok(self.dosages_where(patient, |d| within(d.administered_at, start, end)))
    }

    fn dosages_for_patient(&self, patient: PatientId) -> StoreResult<Vec<MedicationDosage>> {
        Ok(self.dosages_where(patient, |_| true))
    }

    fn distinct_medication_ids(&self, patient: PatientId) -> StoreResult<Vec<MedicationId>> {
        let mut ids: Vec<MedicationId> = Vec::new();
        for dosage in self.dosages.iter().filter(|d| d.patient_id == patient) {
            if !ids.contains(&dosage.medication_id) {
                ids.push(dosage.medication_id);
            }
        }
        Ok(ids)
    }

    fn medication_name(&self, medication: MedicationId) -> StoreResult<Option<String>> {
        Ok(self.medications.get(&medication).cloned())
    }
}
