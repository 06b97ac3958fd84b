//! Command-line interface wiring for medtrack-analytics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{analytics::Analytics, config::Settings, store::CsvStore};

pub mod correlate;
pub mod dashboard;
pub mod impact;
pub mod seed;
pub mod serve;
pub mod timeline;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Medication and medical-event analytics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Seed => seed::run(settings).await,
            Commands::Dashboard(args) => dashboard::run(args, settings).await,
            Commands::Weekly(args) => dashboard::run_weekly(args, settings).await,
            Commands::Correlate(args) => correlate::run(args, settings).await,
            Commands::Timeline(args) => timeline::run(args, settings).await,
            Commands::Impact(args) => impact::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a demo dataset into the data directory.
    Seed,
    /// Whole-history dashboard summary for a patient.
    Dashboard(dashboard::Args),
    /// Dashboard summaries for each of the last weeks.
    Weekly(dashboard::Args),
    /// Correlate medication doses with following medical events.
    Correlate(correlate::Args),
    /// Events and dosages for a period.
    Timeline(timeline::Args),
    /// Effectiveness of a medication over a period.
    Impact(impact::Args),
    /// Serve the JSON API.
    Serve(serve::Args),
}

/// Build the analytics over the CSV exports in the data directory.
pub(crate) fn load_analytics(settings: &Settings) -> Result<Analytics> {
    let store = CsvStore::open(&settings.data_dir)
        .load()
        .with_context(|| format!("loading data from {}", settings.data_dir.display()))?;
    Ok(Analytics::from_store(store, settings.policy()?))
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
