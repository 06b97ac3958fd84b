//! CLI entry-point for dose/event correlation.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    config::Settings,
    models::{MedicationId, PatientId},
};

use super::{load_analytics, print_json};

/// Args for the `correlate` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Patient id.
    #[arg(long)]
    pub patient: i64,
    /// Restrict to one medication; all of the patient's medications otherwise.
    #[arg(long)]
    pub medication: Option<i64>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let analytics = load_analytics(&settings)?;
    let patient = PatientId(args.patient);
    match args.medication {
        Some(medication) => {
            print_json(&analytics.analyze_correlation(patient, MedicationId(medication))?)
        }
        None => print_json(&analytics.analyze_all_correlations(patient)?),
    }
}
