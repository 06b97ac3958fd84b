//! Request parameters and error mapping for the JSON API.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::error::AnalyticsError;

/// Optional RFC 3339 period bounds.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

pub type ApiError = (StatusCode, String);

pub fn reject(err: AnalyticsError) -> ApiError {
    let status = match &err {
        AnalyticsError::InvalidArgument(_) | AnalyticsError::InvalidRange { .. } => {
            StatusCode::BAD_REQUEST
        }
        AnalyticsError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    if status.is_server_error() {
        warn!(%err, "analytics request failed");
    }
    (status, err.to_string())
}
