//! Domain records read from the tracking store and the aggregates produced from them.

pub mod results;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use results::{
    CategoryHistogram, CorrelationResult, DashboardSummary, ImpactAnalysis, SeverityHistogram,
    TimelineAnalysis, TimelineDataPoint, TimelineKind, WeeklySummaries,
};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Store-assigned ids are positive; anything else means "not set".
            pub fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identity of a tracked patient.
    PatientId
);
record_id!(
    /// Identity of a medication in the catalogue.
    MedicationId
);
record_id!(
    /// Identity of a recorded medical event.
    EventId
);
record_id!(DosageId);

/// Classification of a medical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Symptom,
    SideEffect,
    AdverseReaction,
    Observation,
    Emergency,
    Medication,
}

impl EventCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Symptom => "Symptom",
            Self::SideEffect => "Side effect",
            Self::AdverseReaction => "Adverse reaction",
            Self::Observation => "Observation",
            Self::Emergency => "Emergency",
            Self::Medication => "Medication",
        }
    }
}

/// Ordered severity scale, mildest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Critical,
}

/// When in the day a dose is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DosageSchedule {
    Am,
    Pm,
    Noon,
    Bedtime,
    AsNeeded,
}

impl DosageSchedule {
    pub fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
            Self::Noon => "noon",
            Self::Bedtime => "bedtime",
            Self::AsNeeded => "as needed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
}

/// A symptom, reaction or observation recorded against a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalEvent {
    pub id: EventId,
    pub patient_id: PatientId,
    pub medication_id: Option<MedicationId>,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub severity: Severity,
    pub duration_minutes: Option<u32>,
}

/// One administration of a medication to a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationDosage {
    pub id: DosageId,
    pub patient_id: PatientId,
    pub medication_id: MedicationId,
    pub administered_at: DateTime<Utc>,
    pub amount: f64,
    pub unit: String,
    pub schedule: DosageSchedule,
    pub administered: bool,
}
