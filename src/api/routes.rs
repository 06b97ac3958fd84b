//! HTTP route handlers for Axum.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    analytics::resolve_period,
    models::{
        CorrelationResult, DashboardSummary, ImpactAnalysis, MedicationId, PatientId,
        TimelineAnalysis, WeeklySummaries,
    },
};

use super::{
    types::{reject, ApiError, RangeQuery},
    AppState,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn dashboard(
    Path(patient_id): Path<i64>,
    State(state): State<AppState>,
) -> ApiResult<DashboardSummary> {
    state
        .analytics
        .summarize(PatientId(patient_id))
        .map(Json)
        .map_err(reject)
}

pub async fn weekly_dashboard(
    Path(patient_id): Path<i64>,
    State(state): State<AppState>,
) -> ApiResult<WeeklySummaries> {
    state
        .analytics
        .weekly_summaries(PatientId(patient_id))
        .map(Json)
        .map_err(reject)
}

pub async fn all_correlations(
    Path(patient_id): Path<i64>,
    State(state): State<AppState>,
) -> ApiResult<Vec<CorrelationResult>> {
    state
        .analytics
        .analyze_all_correlations(PatientId(patient_id))
        .map(Json)
        .map_err(reject)
}

pub async fn correlation(
    Path((patient_id, medication_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
) -> ApiResult<CorrelationResult> {
    state
        .analytics
        .analyze_correlation(PatientId(patient_id), MedicationId(medication_id))
        .map(Json)
        .map_err(reject)
}

pub async fn timeline(
    Path(patient_id): Path<i64>,
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> ApiResult<TimelineAnalysis> {
    let (start, end) =
        resolve_period(range.start, range.end, state.default_period).map_err(reject)?;
    state
        .analytics
        .build_timeline(PatientId(patient_id), start, end)
        .map(Json)
        .map_err(reject)
}

pub async fn impact(
    Path((patient_id, medication_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> ApiResult<ImpactAnalysis> {
    let (start, end) =
        resolve_period(range.start, range.end, state.default_period).map_err(reject)?;
    state
        .analytics
        .analyze_impact(
            PatientId(patient_id),
            MedicationId(medication_id),
            start,
            end,
        )
        .map(Json)
        .map_err(reject)
}
