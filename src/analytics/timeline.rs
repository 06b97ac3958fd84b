//! Merged event and dosage timeline for a period.

use std::collections::{hash_map::Entry, HashMap};

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::{
    error::{require_assigned, require_ordered, AnalyticsResult},
    models::{
        MedicalEvent, MedicationDosage, MedicationId, PatientId, Severity, TimelineAnalysis,
        TimelineDataPoint, TimelineKind,
    },
};

use super::Analytics;

fn event_point(event: MedicalEvent) -> TimelineDataPoint {
    TimelineDataPoint {
        timestamp: event.occurred_at,
        kind: TimelineKind::Event,
        source_id: event.id.0,
        description: format!("{}: {}", event.category.label(), event.title),
        value: None,
        unit: None,
        severity: event.severity,
    }
}

// Dosages carry no severity of their own and are shown as mild.
fn dosage_point(dosage: MedicationDosage, medication_name: &str) -> TimelineDataPoint {
    TimelineDataPoint {
        timestamp: dosage.administered_at,
        kind: TimelineKind::Dosage,
        source_id: dosage.id.0,
        description: format!(
            "{} {} {} ({})",
            medication_name,
            dosage.amount,
            dosage.unit,
            dosage.schedule.label()
        ),
        value: Some(dosage.amount),
        unit: Some(dosage.unit),
        severity: Severity::Mild,
    }
}

impl Analytics {
    /// Every event and dosage in `[start, end]`. Points are returned events
    /// first, then dosages, and are not sorted by time.
    #[instrument(skip(self))]
    pub fn build_timeline(
        &self,
        patient: PatientId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AnalyticsResult<TimelineAnalysis> {
        require_assigned(patient.is_assigned(), "patient id")?;
        require_ordered(start, end)?;

        let events = self.events.events_between(patient, start, end)?;
        let dosages = self.dosages.dosages_between(patient, start, end)?;

        let mut names: HashMap<MedicationId, String> = HashMap::new();
        for dosage in &dosages {
            if let Entry::Vacant(slot) = names.entry(dosage.medication_id) {
                slot.insert(self.medication_name(dosage.medication_id)?);
            }
        }

        let mut data_points = Vec::with_capacity(events.len() + dosages.len());
        data_points.extend(events.into_iter().map(event_point));
        for dosage in dosages {
            let name = &names[&dosage.medication_id];
            data_points.push(dosage_point(dosage, name));
        }
        debug!(points = data_points.len(), "built timeline");

        Ok(TimelineAnalysis {
            patient_id: patient,
            period_start: start,
            period_end: end,
            data_points,
            generated_at: Utc::now(),
        })
    }
}
