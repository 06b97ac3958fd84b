//! CLI entry-points for the dashboard summary and its weekly series.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{config::Settings, models::PatientId};

use super::{load_analytics, print_json};

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Patient id.
    #[arg(long)]
    pub patient: i64,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let analytics = load_analytics(&settings)?;
    let summary = analytics.summarize(PatientId(args.patient))?;
    print_json(&summary)
}

#[instrument(skip(settings))]
pub async fn run_weekly(args: Args, settings: Settings) -> Result<()> {
    let analytics = load_analytics(&settings)?;
    let weeks = analytics.weekly_summaries(PatientId(args.patient))?;
    print_json(&weeks)
}
