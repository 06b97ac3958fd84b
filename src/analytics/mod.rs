//! Correlation, dashboard, timeline and impact analytics over the tracking store.
//!
//! Each entry point pulls what it needs from the injected stores, reduces it in
//! memory and returns a fresh result record. `Analytics` holds no mutable state,
//! so one instance can serve concurrent callers.

pub mod correlation;
pub mod dashboard;
pub mod impact;
pub mod timeline;

use std::{collections::HashSet, sync::Arc};

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    models::{EventCategory, EventId, MedicalEvent, MedicationDosage, MedicationId, PatientId},
    store::{DosageStore, EventStore},
};

pub use correlation::strength_for;
pub use impact::{effectiveness_score, symptom_reduction};

/// Windows and bucket counts used by the analytics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsPolicy {
    /// Look-ahead after a dose within which an event counts as following it.
    pub correlation_window: Duration,
    /// Dashboard "recent events" lookback.
    pub recent_window: Duration,
    pub weekly_buckets: u32,
    /// Upper bound on buckets in each impact trend series.
    pub max_trend_weeks: u32,
}

impl Default for AnalyticsPolicy {
    fn default() -> Self {
        Self {
            correlation_window: Duration::hours(24),
            recent_window: Duration::days(7),
            weekly_buckets: 8,
            max_trend_weeks: 8,
        }
    }
}

/// Resolve an optional period: both bounds, or neither for the `default_period`
/// ending now. One bound alone is rejected.
pub fn resolve_period(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    default_period: Duration,
) -> AnalyticsResult<(DateTime<Utc>, DateTime<Utc>)> {
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        (None, None) => {
            let end = Utc::now();
            Ok((end - default_period, end))
        }
        _ => Err(AnalyticsError::InvalidArgument(
            "start and end must be supplied together".to_string(),
        )),
    }
}

#[derive(Debug, Default)]
struct WindowJoin {
    following: Vec<MedicalEvent>,
    /// Doses whose window holds a symptom recorded after the dose itself.
    doses_followed_by_symptom: usize,
}

/// Entry point to the analytics, wired with its store collaborators.
#[derive(Clone)]
pub struct Analytics {
    events: Arc<dyn EventStore>,
    dosages: Arc<dyn DosageStore>,
    policy: AnalyticsPolicy,
}

impl Analytics {
    pub fn new(
        events: Arc<dyn EventStore>,
        dosages: Arc<dyn DosageStore>,
        policy: AnalyticsPolicy,
    ) -> Self {
        Self {
            events,
            dosages,
            policy,
        }
    }

    /// Convenience constructor for a single store implementing both contracts.
    pub fn from_store<S>(store: S, policy: AnalyticsPolicy) -> Self
    where
        S: EventStore + DosageStore + 'static,
    {
        let store = Arc::new(store);
        Self::new(store.clone(), store, policy)
    }

    fn medication_name(&self, medication: MedicationId) -> AnalyticsResult<String> {
        Ok(self
            .dosages
            .medication_name(medication)?
            .unwrap_or_else(|| format!("Medication #{medication}")))
    }

    /// Join each dose with the events in `[administered_at, administered_at +
    /// window)`. Following events are deduplicated by id in first-seen order.
    fn window_join(
        &self,
        patient: PatientId,
        dosages: &[MedicationDosage],
    ) -> AnalyticsResult<WindowJoin> {
        let mut seen: HashSet<EventId> = HashSet::new();
        let mut join = WindowJoin::default();
        for dosage in dosages {
            let events = self.window_events(patient, dosage)?;
            if events.iter().any(|e| {
                e.category == EventCategory::Symptom && e.occurred_at > dosage.administered_at
            }) {
                join.doses_followed_by_symptom += 1;
            }
            for event in events {
                if seen.insert(event.id) {
                    join.following.push(event);
                }
            }
        }
        Ok(join)
    }

    fn window_events(
        &self,
        patient: PatientId,
        dosage: &MedicationDosage,
    ) -> AnalyticsResult<Vec<MedicalEvent>> {
        let start = dosage.administered_at;
        let end = start + self.policy.correlation_window;
        let mut events = self.events.events_between(patient, start, end)?;
        events.retain(|e| e.occurred_at < end);
        Ok(events)
    }
}
