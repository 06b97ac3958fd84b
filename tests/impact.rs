mod common;

use chrono::Duration;
use common::*;
use medtrack_analytics::{
    analytics::impact::{AFTER_SERIES, BEFORE_SERIES},
    models::{EventCategory, MedicationId, Severity},
    Analytics, AnalyticsError, AnalyticsPolicy,
};

#[test]
fn no_dosages_in_period_yields_zero_result() {
    let store = base_store()
        .with_dosage(dose(1, IBUPROFEN, hours(-100)))
        .with_event(symptom(1, hours(5)));

    let impact = analytics(store)
        .analyze_impact(PATIENT, IBUPROFEN, hours(0), hours(48))
        .unwrap();

    assert_eq!(impact.medication_name, "Ibuprofen");
    assert_eq!(impact.period_start, hours(0));
    assert_eq!(impact.period_end, hours(48));
    assert_eq!(impact.total_dosages, 0);
    assert_eq!(impact.symptom_events, 0);
    assert_eq!(impact.effectiveness_score, 0.0);
    assert!(impact.weekly_trends.is_empty());
}

#[test]
fn reduction_and_score_from_symptom_free_doses() {
    // Four daily doses; only the first is followed by a symptom.
    let store = base_store()
        .with_dosage(dose(1, IBUPROFEN, hours(0)))
        .with_dosage(dose(2, IBUPROFEN, hours(24)))
        .with_dosage(dose(3, IBUPROFEN, hours(48)))
        .with_dosage(dose(4, IBUPROFEN, hours(72)))
        .with_event(symptom(1, hours(3)))
        .with_event(event(2, hours(50), EventCategory::Observation, Severity::Mild))
        .with_event(event(3, hours(80), EventCategory::AdverseReaction, Severity::Moderate))
        .with_event(event(4, hours(90), EventCategory::Observation, Severity::Mild));

    let impact = analytics(store)
        .analyze_impact(PATIENT, IBUPROFEN, hours(0), hours(96))
        .unwrap();

    assert_eq!(impact.total_dosages, 4);
    assert_eq!(impact.total_events_after_dosage, 4);
    assert_eq!(impact.symptom_events, 1);
    assert_eq!(impact.adverse_events, 1);
    assert_eq!(impact.symptom_reduction_percentage, 75.0);
    // 0.75 - (1 / 4) * 0.5
    assert!((impact.effectiveness_score - 0.625).abs() < 1e-9);
}

#[test]
fn symptom_at_dose_time_does_not_count_against_the_dose() {
    let store = base_store()
        .with_dosage(dose(1, IBUPROFEN, hours(0)))
        .with_event(symptom(1, hours(0)));

    let impact = analytics(store)
        .analyze_impact(PATIENT, IBUPROFEN, hours(0), hours(24))
        .unwrap();

    assert_eq!(impact.symptom_events, 1);
    assert_eq!(impact.total_events_after_dosage, 1);
    assert_eq!(impact.symptom_reduction_percentage, 100.0);
}

#[test]
fn score_is_clamped_when_adverse_events_dominate() {
    // Every dose is followed by a symptom and adverse reactions outnumber the
    // events following doses, so the raw score is negative.
    let store = base_store()
        .with_dosage(dose(1, IBUPROFEN, hours(0)))
        .with_event(symptom(1, hours(2)))
        .with_event(event(2, hours(30), EventCategory::AdverseReaction, Severity::Severe))
        .with_event(event(3, hours(40), EventCategory::AdverseReaction, Severity::Severe))
        .with_event(event(4, hours(50), EventCategory::AdverseReaction, Severity::Critical));

    let impact = analytics(store)
        .analyze_impact(PATIENT, IBUPROFEN, hours(0), hours(72))
        .unwrap();

    assert_eq!(impact.adverse_events, 3);
    assert_eq!(impact.total_events_after_dosage, 1);
    assert_eq!(impact.symptom_reduction_percentage, 0.0);
    assert_eq!(impact.effectiveness_score, 0.0);
}

#[test]
fn score_never_exceeds_one() {
    let store = base_store()
        .with_dosage(dose(1, IBUPROFEN, hours(0)))
        .with_dosage(dose(2, IBUPROFEN, hours(24)));

    let impact = analytics(store)
        .analyze_impact(PATIENT, IBUPROFEN, hours(0), hours(48))
        .unwrap();

    assert_eq!(impact.symptom_reduction_percentage, 100.0);
    assert_eq!(impact.effectiveness_score, 1.0);
}

#[test]
fn weekly_trends_compare_equal_windows_around_start() {
    let start = hours(0);
    let end = start + Duration::days(14);
    let store = base_store()
        .with_dosage(dose(1, IBUPROFEN, start + Duration::hours(1)))
        // Before: two in the week right before start, one two weeks before.
        .with_event(symptom(1, start - Duration::days(1)))
        .with_event(symptom(2, start - Duration::days(3)))
        .with_event(symptom(3, start - Duration::days(10)))
        .with_event(symptom(4, start - Duration::days(20)))
        // After: one in each of the first two weeks.
        .with_event(symptom(5, start + Duration::days(2)))
        .with_event(symptom(6, start + Duration::days(9)))
        .with_event(event(
            7,
            start + Duration::days(4),
            EventCategory::Observation,
            Severity::Mild,
        ));

    let impact = analytics(store)
        .analyze_impact(PATIENT, IBUPROFEN, start, end)
        .unwrap();

    let keys: Vec<&str> = impact.weekly_trends.keys().map(String::as_str).collect();
    assert_eq!(keys, vec![BEFORE_SERIES, AFTER_SERIES]);
    assert_eq!(impact.weekly_trends[BEFORE_SERIES], vec![1, 2]);
    assert_eq!(impact.weekly_trends[AFTER_SERIES], vec![1, 1]);
}

#[test]
fn invalid_inputs_are_rejected() {
    let engine = analytics(base_store());
    assert!(matches!(
        engine.analyze_impact(PATIENT, IBUPROFEN, hours(10), hours(0)),
        Err(AnalyticsError::InvalidRange { .. })
    ));
    assert!(matches!(
        engine.analyze_impact(PATIENT, MedicationId(0), hours(0), hours(10)),
        Err(AnalyticsError::InvalidArgument(_))
    ));
}

#[test]
fn store_failures_surface_as_unavailable() {
    let engine = Analytics::from_store(FailingStore, AnalyticsPolicy::default());
    let err = engine
        .analyze_impact(PATIENT, IBUPROFEN, hours(0), hours(48))
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::StoreUnavailable(_)));
}
