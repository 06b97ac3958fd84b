//! CLI entry-point for medication impact scoring.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    analytics::resolve_period,
    config::Settings,
    models::{MedicationId, PatientId},
};

use super::{load_analytics, print_json};

/// Args for the `impact` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Patient id.
    #[arg(long)]
    pub patient: i64,
    /// Medication id.
    #[arg(long)]
    pub medication: i64,
    #[arg(long, requires = "end")]
    pub start: Option<DateTime<Utc>>,
    #[arg(long, requires = "start")]
    pub end: Option<DateTime<Utc>>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let analytics = load_analytics(&settings)?;
    let (start, end) = resolve_period(args.start, args.end, settings.default_period()?)?;
    let impact = analytics.analyze_impact(
        PatientId(args.patient),
        MedicationId(args.medication),
        start,
        end,
    )?;
    info!(score = impact.effectiveness_score, "computed impact");
    print_json(&impact)
}
