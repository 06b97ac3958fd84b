//! Aggregate records returned by the analytics entry points.
//!
//! Every record is built fresh per request and stamped with `generated_at` when
//! constructed; none of them is mutated afterwards.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use super::{EventCategory, MedicalEvent, MedicationId, PatientId, Severity};

pub type CategoryHistogram = BTreeMap<EventCategory, usize>;
pub type SeverityHistogram = BTreeMap<Severity, usize>;

/// Ordered `week_N` buckets, most recent week first.
pub type WeeklySummaries = IndexMap<String, DashboardSummary>;

/// Count events per category and per severity.
pub fn histograms<'a, I>(events: I) -> (CategoryHistogram, SeverityHistogram)
where
    I: IntoIterator<Item = &'a MedicalEvent>,
{
    let mut categories = CategoryHistogram::new();
    let mut severities = SeverityHistogram::new();
    for event in events {
        *categories.entry(event.category).or_insert(0) += 1;
        *severities.entry(event.severity).or_insert(0) += 1;
    }
    (categories, severities)
}

/// How often a medication's doses are followed by a medical event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub patient_id: PatientId,
    pub medication_id: MedicationId,
    pub medication_name: String,
    pub total_dosages: usize,
    pub total_events_after_dosage: usize,
    /// Following events per hundred doses; may exceed 100.
    pub correlation_percentage: f64,
    pub correlation_strength: f64,
    pub category_breakdown: CategoryHistogram,
    pub severity_breakdown: SeverityHistogram,
    pub generated_at: DateTime<Utc>,
}

impl CorrelationResult {
    /// Result for a medication with no dosage history.
    pub fn empty(
        patient_id: PatientId,
        medication_id: MedicationId,
        medication_name: String,
    ) -> Self {
        Self {
            patient_id,
            medication_id,
            medication_name,
            total_dosages: 0,
            total_events_after_dosage: 0,
            correlation_percentage: 0.0,
            correlation_strength: 0.0,
            category_breakdown: CategoryHistogram::new(),
            severity_breakdown: SeverityHistogram::new(),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub patient_id: PatientId,
    pub total_events: usize,
    pub total_dosages: usize,
    pub category_breakdown: CategoryHistogram,
    pub severity_breakdown: SeverityHistogram,
    pub recent_events: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineKind {
    Event,
    Dosage,
}

/// A single entry on a patient timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineDataPoint {
    pub timestamp: DateTime<Utc>,
    pub kind: TimelineKind,
    /// Id of the event or dosage this point was built from.
    pub source_id: i64,
    pub description: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub severity: Severity,
}

/// Timeline points for a period. Points are not sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineAnalysis {
    pub patient_id: PatientId,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub data_points: Vec<TimelineDataPoint>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactAnalysis {
    pub patient_id: PatientId,
    pub medication_id: MedicationId,
    pub medication_name: String,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub total_dosages: usize,
    pub total_events_after_dosage: usize,
    pub symptom_events: usize,
    pub adverse_events: usize,
    pub symptom_reduction_percentage: f64,
    pub effectiveness_score: f64,
    pub weekly_trends: IndexMap<String, Vec<usize>>,
    pub generated_at: DateTime<Utc>,
}

impl ImpactAnalysis {
    /// Result for a period in which the medication was never dosed.
    pub fn empty(
        patient_id: PatientId,
        medication_id: MedicationId,
        medication_name: String,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Self {
        Self {
            patient_id,
            medication_id,
            medication_name,
            period_start,
            period_end,
            total_dosages: 0,
            total_events_after_dosage: 0,
            symptom_events: 0,
            adverse_events: 0,
            symptom_reduction_percentage: 0.0,
            effectiveness_score: 0.0,
            weekly_trends: IndexMap::new(),
            generated_at: Utc::now(),
        }
    }
}
