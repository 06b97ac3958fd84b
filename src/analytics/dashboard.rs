//! Whole-history dashboard counts and the sliding weekly series built from them.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, instrument};

use crate::{
    error::{require_assigned, AnalyticsResult},
    models::{results::histograms, DashboardSummary, MedicalEvent, PatientId, WeeklySummaries},
};

use super::Analytics;

/// Summary over `events`, with `recent_since` marking the start of the recency window.
fn summary_of(
    patient: PatientId,
    events: &[MedicalEvent],
    total_dosages: usize,
    recent_since: DateTime<Utc>,
) -> DashboardSummary {
    let (category_breakdown, severity_breakdown) = histograms(events);
    DashboardSummary {
        patient_id: patient,
        total_events: events.len(),
        total_dosages,
        category_breakdown,
        severity_breakdown,
        recent_events: events
            .iter()
            .filter(|e| e.occurred_at >= recent_since)
            .count(),
        generated_at: Utc::now(),
    }
}

/// Bounds of `week_n`: `[as_of - n weeks, as_of - (n - 1) weeks)`.
pub fn week_bounds(as_of: DateTime<Utc>, n: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    let n = i64::from(n);
    (as_of - Duration::weeks(n), as_of - Duration::weeks(n - 1))
}

impl Analytics {
    pub fn summarize(&self, patient: PatientId) -> AnalyticsResult<DashboardSummary> {
        self.summarize_as_of(patient, Utc::now())
    }

    /// Dashboard counts with the recency window ending at `as_of`.
    #[instrument(skip(self))]
    pub fn summarize_as_of(
        &self,
        patient: PatientId,
        as_of: DateTime<Utc>,
    ) -> AnalyticsResult<DashboardSummary> {
        require_assigned(patient.is_assigned(), "patient id")?;
        let events = self.events.events_for_patient(patient)?;
        let dosages = self.dosages.dosages_for_patient(patient)?;
        let summary = summary_of(
            patient,
            &events,
            dosages.len(),
            as_of - self.policy.recent_window,
        );
        debug!(
            events = summary.total_events,
            recent = summary.recent_events,
            "computed dashboard summary"
        );
        Ok(summary)
    }

    pub fn weekly_summaries(&self, patient: PatientId) -> AnalyticsResult<WeeklySummaries> {
        self.weekly_summaries_as_of(patient, Utc::now())
    }

    /// One summary per week going back from `as_of`, keyed `week_1` (most
    /// recent) to `week_N`. Each bucket is half-open so boundary events land in
    /// exactly one week, and every event of a bucket counts as recent.
    #[instrument(skip(self))]
    pub fn weekly_summaries_as_of(
        &self,
        patient: PatientId,
        as_of: DateTime<Utc>,
    ) -> AnalyticsResult<WeeklySummaries> {
        require_assigned(patient.is_assigned(), "patient id")?;
        let mut weeks = WeeklySummaries::new();
        for n in 1..=self.policy.weekly_buckets {
            let (start, end) = week_bounds(as_of, n);
            let mut events = self.events.events_between(patient, start, end)?;
            events.retain(|e| e.occurred_at < end);
            let dosages = self
                .dosages
                .dosages_between(patient, start, end)?
                .into_iter()
                .filter(|d| d.administered_at < end)
                .count();
            weeks.insert(
                format!("week_{n}"),
                summary_of(patient, &events, dosages, start),
            );
        }
        Ok(weeks)
    }
}
