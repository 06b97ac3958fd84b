//! Correlation and impact analytics over patient medication dosages and
//! medical events.

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;

pub use analytics::{Analytics, AnalyticsPolicy};
pub use error::{AnalyticsError, AnalyticsResult};
