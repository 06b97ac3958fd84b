//! CLI entry-point for the patient timeline.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{analytics::resolve_period, config::Settings, models::PatientId};

use super::{load_analytics, print_json};

/// Args for the `timeline` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Patient id.
    #[arg(long)]
    pub patient: i64,
    /// Period start (RFC 3339). Defaults to the configured period ending now.
    #[arg(long, requires = "end")]
    pub start: Option<DateTime<Utc>>,
    /// Period end (RFC 3339).
    #[arg(long, requires = "start")]
    pub end: Option<DateTime<Utc>>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let analytics = load_analytics(&settings)?;
    let (start, end) = resolve_period(args.start, args.end, settings.default_period()?)?;
    let timeline = analytics.build_timeline(PatientId(args.patient), start, end)?;
    print_json(&timeline)
}
