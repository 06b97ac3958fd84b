//! CSV-backed loading of the tracking data folder.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

use crate::models::{
    DosageId, DosageSchedule, EventCategory, EventId, MedicalEvent, Medication, MedicationDosage,
    MedicationId, PatientId, Severity,
};

use super::{InMemoryStore, StoreError, StoreResult};

pub const MEDICATIONS_FILE: &str = "medications.csv";
pub const EVENTS_FILE: &str = "events.csv";
pub const DOSAGES_FILE: &str = "dosages.csv";

/// Folder of `medications.csv`, `events.csv` and `dosages.csv` exports.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Read every file into memory. Missing files load as empty collections.
    pub fn load(&self) -> StoreResult<InMemoryStore> {
        let medications: Vec<Medication> = read_rows(&self.dir.join(MEDICATIONS_FILE))?;
        let events: Vec<MedicalEvent> = read_rows(&self.dir.join(EVENTS_FILE))?;
        let dosages: Vec<MedicationDosage> = read_rows(&self.dir.join(DOSAGES_FILE))?;
        info!(
            dir = %self.dir.display(),
            medications = medications.len(),
            events = events.len(),
            dosages = dosages.len(),
            "loaded tracking data"
        );
        Ok(InMemoryStore::from_parts(medications, events, dosages))
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    if !path.exists() {
        warn!(path = %path.display(), "data file missing; run seed or export data first");
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;
    let mut out = Vec::new();
    for row in reader.deserialize::<T>() {
        out.push(row.map_err(|source| csv_error(path, source))?);
    }
    Ok(out)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> StoreResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|source| csv_error(path, source))?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_error(path: &Path, source: csv::Error) -> StoreError {
    StoreError::Csv {
        file: path.display().to_string(),
        source,
    }
}

/// Write a small demo dataset relative to `now`, replacing existing files.
///
/// Patient 1 takes lisinopril every morning and metformin every evening for the
/// last three weeks and logs headaches, dizziness and one rash. Patient 2 only
/// has sumatriptan doses on migraine days.
pub fn seed_demo_data(dir: &Path, now: DateTime<Utc>) -> StoreResult<(usize, usize)> {
    std::fs::create_dir_all(dir)?;

    let medications = vec![
        Medication {
            id: MedicationId(1),
            name: "Lisinopril".to_string(),
        },
        Medication {
            id: MedicationId(2),
            name: "Metformin".to_string(),
        },
        Medication {
            id: MedicationId(3),
            name: "Sumatriptan".to_string(),
        },
    ];

    let mut dosages = Vec::new();
    let mut events = Vec::new();
    let mut next_dosage = 1;
    let mut next_event = 1;
    let mut push_dosage = |patient: i64,
                           medication: i64,
                           at: DateTime<Utc>,
                           amount: f64,
                           unit: &str,
                           schedule: DosageSchedule| {
        dosages.push(MedicationDosage {
            id: DosageId(next_dosage),
            patient_id: PatientId(patient),
            medication_id: MedicationId(medication),
            administered_at: at,
            amount,
            unit: unit.to_string(),
            schedule,
            administered: true,
        });
        next_dosage += 1;
    };

    let start = now - Duration::days(21);
    for day in 0..21 {
        let morning = start + Duration::days(day) + Duration::hours(8);
        push_dosage(1, 1, morning, 10.0, "mg", DosageSchedule::Am);
        push_dosage(
            1,
            2,
            morning + Duration::hours(12),
            500.0,
            "mg",
            DosageSchedule::Pm,
        );
    }
    for day in [2, 9, 15] {
        let at = start + Duration::days(day) + Duration::hours(14);
        push_dosage(2, 3, at, 50.0, "mg", DosageSchedule::AsNeeded);
    }

    let mut push_event = |patient: i64,
                          medication: Option<i64>,
                          at: DateTime<Utc>,
                          title: &str,
                          category: EventCategory,
                          severity: Severity| {
        events.push(MedicalEvent {
            id: EventId(next_event),
            patient_id: PatientId(patient),
            medication_id: medication.map(MedicationId),
            occurred_at: at,
            title: title.to_string(),
            description: format!("Logged by patient: {}", title.to_lowercase()),
            category,
            severity,
            duration_minutes: Some(45),
        });
        next_event += 1;
    };

    for day in (0..21).step_by(3) {
        let at = start + Duration::days(day) + Duration::hours(11);
        push_event(
            1,
            None,
            at,
            "Headache",
            EventCategory::Symptom,
            Severity::Moderate,
        );
    }
    for day in [4, 12, 19] {
        let at = start + Duration::days(day) + Duration::hours(9);
        push_event(
            1,
            Some(1),
            at,
            "Dizziness on standing",
            EventCategory::SideEffect,
            Severity::Mild,
        );
    }
    push_event(
        1,
        Some(2),
        start + Duration::days(17) + Duration::hours(22),
        "Rash on forearms",
        EventCategory::AdverseReaction,
        Severity::Severe,
    );
    push_event(
        1,
        None,
        start + Duration::days(20) + Duration::hours(7),
        "Blood pressure 128/82",
        EventCategory::Observation,
        Severity::Mild,
    );
    for day in [2, 15] {
        let at = start + Duration::days(day) + Duration::hours(13);
        push_event(
            2,
            None,
            at,
            "Migraine",
            EventCategory::Symptom,
            Severity::Severe,
        );
    }

    write_rows(&dir.join(MEDICATIONS_FILE), &medications)?;
    write_rows(&dir.join(EVENTS_FILE), &events)?;
    write_rows(&dir.join(DOSAGES_FILE), &dosages)?;
    info!(
        dir = %dir.display(),
        events = events.len(),
        dosages = dosages.len(),
        "wrote demo data"
    );
    Ok((events.len(), dosages.len()))
}
