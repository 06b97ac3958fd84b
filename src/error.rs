//! Error taxonomy for the analytics engine.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Reject ids that were never assigned by the store.
pub(crate) fn require_assigned(assigned: bool, field: &str) -> AnalyticsResult<()> {
    if assigned {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidArgument(format!("{field} is required")))
    }
}

pub(crate) fn require_ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> AnalyticsResult<()> {
    if start > end {
        return Err(AnalyticsError::InvalidRange { start, end });
    }
    Ok(())
}
