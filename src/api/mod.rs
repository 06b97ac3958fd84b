//! HTTP layer exposing the patient analytics as JSON.

pub mod routes;
pub mod types;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use chrono::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{analytics::Analytics, config::Settings, store::CsvStore};

#[derive(Clone)]
pub struct AppState {
    pub analytics: Analytics,
    /// Period applied when a range-bounded request carries no dates.
    pub default_period: Duration,
}

pub fn router(state: AppState) -> Router {
    let patient = Router::new()
        .route("/dashboard", get(routes::dashboard))
        .route("/dashboard/weekly", get(routes::weekly_dashboard))
        .route("/correlations", get(routes::all_correlations))
        .route("/correlations/:medication_id", get(routes::correlation))
        .route("/timeline", get(routes::timeline))
        .route("/impact/:medication_id", get(routes::impact));

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api/analytics/patients/:patient_id", patient)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let store = CsvStore::open(&settings.data_dir)
        .load()
        .context("loading tracking data")?;
    let state = AppState {
        analytics: Analytics::from_store(store, settings.policy()?),
        default_period: settings.default_period()?,
    };

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving medtrack-analytics API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
