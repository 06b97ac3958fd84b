//! Medication impact over a period: symptom reduction, adverse-event penalty and
//! before/after symptom trends.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::{
    error::{require_assigned, require_ordered, AnalyticsResult},
    models::{EventCategory, ImpactAnalysis, MedicalEvent, MedicationId, PatientId},
};

use super::Analytics;

pub const BEFORE_SERIES: &str = "before_medication";
pub const AFTER_SERIES: &str = "after_medication";

/// Share of doses not followed by a symptom, as a percentage floored at 0.
pub fn symptom_reduction(doses_followed_by_symptom: usize, total_dosages: usize) -> f64 {
    if total_dosages == 0 {
        return 0.0;
    }
    let ratio = doses_followed_by_symptom as f64 / total_dosages as f64;
    ((1.0 - ratio) * 100.0).max(0.0)
}

/// Reduction rewarded in full, adverse-event share penalised at half weight,
/// clamped to `[0, 1]`.
pub fn effectiveness_score(
    reduction_percentage: f64,
    adverse_events: usize,
    following_events: usize,
) -> f64 {
    let adverse_share = if following_events == 0 {
        0.0
    } else {
        adverse_events as f64 / following_events as f64
    };
    (reduction_percentage / 100.0 - adverse_share * 0.5).clamp(0.0, 1.0)
}

/// Number of weekly trend buckets for a period: whole weeks rounded up, at
/// least one and at most `max_weeks`.
pub fn trend_weeks(start: DateTime<Utc>, end: DateTime<Utc>, max_weeks: u32) -> u32 {
    let week = Duration::weeks(1).num_seconds();
    let seconds = (end - start).num_seconds().max(0);
    let weeks = (seconds + week - 1) / week;
    let cap = i64::from(max_weeks.max(1));
    weeks.clamp(1, cap) as u32
}

fn count_in(events: &[MedicalEvent], start: DateTime<Utc>, end: DateTime<Utc>) -> usize {
    events
        .iter()
        .filter(|e| e.occurred_at >= start && e.occurred_at < end)
        .count()
}

/// Weekly symptom counts in equal windows either side of `pivot`. The before
/// series runs oldest to newest and ends at `pivot`; the after series starts there.
fn before_after_trends(
    symptoms: &[MedicalEvent],
    pivot: DateTime<Utc>,
    weeks: u32,
) -> IndexMap<String, Vec<usize>> {
    let weeks = i64::from(weeks);
    let before = (0..weeks)
        .rev()
        .map(|k| {
            count_in(
                symptoms,
                pivot - Duration::weeks(k + 1),
                pivot - Duration::weeks(k),
            )
        })
        .collect();
    let after = (0..weeks)
        .map(|k| {
            count_in(
                symptoms,
                pivot + Duration::weeks(k),
                pivot + Duration::weeks(k + 1),
            )
        })
        .collect();

    let mut trends = IndexMap::new();
    trends.insert(BEFORE_SERIES.to_string(), before);
    trends.insert(AFTER_SERIES.to_string(), after);
    trends
}

impl Analytics {
    #[instrument(skip(self))]
    pub fn analyze_impact(
        &self,
        patient: PatientId,
        medication: MedicationId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AnalyticsResult<ImpactAnalysis> {
        require_assigned(patient.is_assigned(), "patient id")?;
        require_assigned(medication.is_assigned(), "medication id")?;
        require_ordered(start, end)?;

        let medication_name = self.medication_name(medication)?;
        let dosages = self
            .dosages
            .dosages_for_between(patient, medication, start, end)?;
        if dosages.is_empty() {
            debug!("no dosages in period");
            return Ok(ImpactAnalysis::empty(
                patient,
                medication,
                medication_name,
                start,
                end,
            ));
        }

        let join = self.window_join(patient, &dosages)?;
        let symptom_events = self
            .events
            .events_by_category_between(patient, EventCategory::Symptom, start, end)?
            .len();
        let adverse_events = self
            .events
            .events_by_category_between(patient, EventCategory::AdverseReaction, start, end)?
            .len();

        let reduction = symptom_reduction(join.doses_followed_by_symptom, dosages.len());
        let score = effectiveness_score(reduction, adverse_events, join.following.len());

        let weeks = trend_weeks(start, end, self.policy.max_trend_weeks);
        let span = Duration::weeks(i64::from(weeks));
        let symptoms = self.events.events_by_category_between(
            patient,
            EventCategory::Symptom,
            start - span,
            start + span,
        )?;
        let weekly_trends = before_after_trends(&symptoms, start, weeks);
        debug!(
            dosages = dosages.len(),
            following = join.following.len(),
            reduction,
            score,
            "computed impact"
        );

        Ok(ImpactAnalysis {
            patient_id: patient,
            medication_id: medication,
            medication_name,
            period_start: start,
            period_end: end,
            total_dosages: dosages.len(),
            total_events_after_dosage: join.following.len(),
            symptom_events,
            adverse_events,
            symptom_reduction_percentage: reduction,
            effectiveness_score: score,
            weekly_trends,
            generated_at: Utc::now(),
        })
    }
}
