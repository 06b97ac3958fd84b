//! CLI entry-point for writing the demo dataset.

use anyhow::Result;
use chrono::Utc;
use tracing::{info, instrument};

use crate::{config::Settings, store::seed_demo_data};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let (events, dosages) = seed_demo_data(&settings.data_dir, Utc::now())?;
    info!(events, dosages, "seeded demo data");
    println!(
        "Seeded {events} events and {dosages} dosages into {}.",
        settings.data_dir.display()
    );
    Ok(())
}
