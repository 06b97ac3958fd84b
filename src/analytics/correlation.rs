//! Dose-to-event correlation for a single medication.

use tracing::{debug, instrument};

use crate::{
    error::{require_assigned, AnalyticsResult},
    models::{results::histograms, CorrelationResult, MedicationId, PatientId},
};

use super::Analytics;

/// Map a correlation percentage onto the five-tier strength scale.
///
/// Tiers are inclusive at their lower bound: 80 → 0.9, 60 → 0.8, 40 → 0.6,
/// 20 → 0.4, anything lower → 0.2.
pub fn strength_for(percentage: f64) -> f64 {
    match percentage {
        p if p >= 80.0 => 0.9,
        p if p >= 60.0 => 0.8,
        p if p >= 40.0 => 0.6,
        p if p >= 20.0 => 0.4,
        _ => 0.2,
    }
}

/// Following events per hundred doses. Not clamped.
pub fn correlation_percentage(following_events: usize, total_dosages: usize) -> f64 {
    if total_dosages == 0 {
        return 0.0;
    }
    following_events as f64 / total_dosages as f64 * 100.0
}

impl Analytics {
    /// Correlate every dose of `medication` with the events recorded in the
    /// window after it.
    #[instrument(skip(self))]
    pub fn analyze_correlation(
        &self,
        patient: PatientId,
        medication: MedicationId,
    ) -> AnalyticsResult<CorrelationResult> {
        require_assigned(patient.is_assigned(), "patient id")?;
        require_assigned(medication.is_assigned(), "medication id")?;

        let medication_name = self.medication_name(medication)?;
        let dosages = self.dosages.dosages_for(patient, medication)?;
        if dosages.is_empty() {
            debug!("no dosage history");
            return Ok(CorrelationResult::empty(
                patient,
                medication,
                medication_name,
            ));
        }

        let following = self.window_join(patient, &dosages)?.following;
        let percentage = correlation_percentage(following.len(), dosages.len());
        let (category_breakdown, severity_breakdown) = histograms(&following);
        debug!(
            dosages = dosages.len(),
            following = following.len(),
            percentage,
            "computed correlation"
        );

        Ok(CorrelationResult {
            patient_id: patient,
            medication_id: medication,
            medication_name,
            total_dosages: dosages.len(),
            total_events_after_dosage: following.len(),
            correlation_percentage: percentage,
            correlation_strength: strength_for(percentage),
            category_breakdown,
            severity_breakdown,
            generated_at: chrono::Utc::now(),
        })
    }

    /// Correlations for every medication the patient has been dosed with, in
    /// the order the store lists them.
    #[instrument(skip(self))]
    pub fn analyze_all_correlations(
        &self,
        patient: PatientId,
    ) -> AnalyticsResult<Vec<CorrelationResult>> {
        require_assigned(patient.is_assigned(), "patient id")?;
        self.dosages
            .distinct_medication_ids(patient)?
            .into_iter()
            .map(|medication| self.analyze_correlation(patient, medication))
            .collect()
    }
}
