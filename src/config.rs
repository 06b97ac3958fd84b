//! Runtime configuration utilities for medtrack-analytics.

use std::{env, path::PathBuf, str::FromStr};

use anyhow::{ensure, Context};
use chrono::Duration;
use serde::Deserialize;

use crate::analytics::AnalyticsPolicy;

/// Longest accepted correlation window, one year.
pub const MAX_WINDOW_HOURS: i64 = 24 * 366;
/// Longest accepted recency window or default period, ten years.
pub const MAX_PERIOD_DAYS: i64 = 3660;
/// Most weekly buckets for the dashboard series and the impact trends.
pub const MAX_WEEKS: u32 = 104;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Folder holding the medications, events and dosages CSV exports.
    pub data_dir: PathBuf,
    /// Hours after a dose within which an event is attributed to it.
    pub correlation_window_hours: i64,
    /// Days counted as "recent" on the dashboard.
    pub recent_days: i64,
    /// Number of weekly dashboard summaries.
    pub weekly_buckets: u32,
    /// Cap on buckets per impact trend series.
    pub max_trend_weeks: u32,
    /// Period used when a range-bounded request omits its dates.
    pub default_period_days: i64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn bounded_hours(name: &str, hours: i64) -> anyhow::Result<Duration> {
    ensure!(
        (1..=MAX_WINDOW_HOURS).contains(&hours),
        "{name} must be between 1 and {MAX_WINDOW_HOURS}, got {hours}"
    );
    Duration::try_hours(hours).with_context(|| format!("{name} out of range: {hours}"))
}

fn bounded_days(name: &str, days: i64) -> anyhow::Result<Duration> {
    ensure!(
        (1..=MAX_PERIOD_DAYS).contains(&days),
        "{name} must be between 1 and {MAX_PERIOD_DAYS}, got {days}"
    );
    Duration::try_days(days).with_context(|| format!("{name} out of range: {days}"))
}

fn bounded_weeks(name: &str, weeks: u32) -> anyhow::Result<u32> {
    ensure!(
        (1..=MAX_WEEKS).contains(&weeks),
        "{name} must be between 1 and {MAX_WEEKS}, got {weeks}"
    );
    Duration::try_weeks(i64::from(weeks))
        .with_context(|| format!("{name} out of range: {weeks}"))?;
    Ok(weeks)
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let defaults = AnalyticsPolicy::default();

        let settings = Self {
            data_dir,
            correlation_window_hours: env_or(
                "CORRELATION_WINDOW_HOURS",
                defaults.correlation_window.num_hours(),
            ),
            recent_days: env_or("RECENT_DAYS", defaults.recent_window.num_days()),
            weekly_buckets: env_or("WEEKLY_BUCKETS", defaults.weekly_buckets),
            max_trend_weeks: env_or("MAX_TREND_WEEKS", defaults.max_trend_weeks),
            default_period_days: env_or("DEFAULT_PERIOD_DAYS", 30),
        };
        settings.policy().context("invalid analytics settings")?;
        settings.default_period().context("invalid analytics settings")?;

        std::fs::create_dir_all(&settings.data_dir).context("creating data dir")?;
        Ok(settings)
    }

    /// Analytics windows derived from these settings.
    pub fn policy(&self) -> anyhow::Result<AnalyticsPolicy> {
        Ok(AnalyticsPolicy {
            correlation_window: bounded_hours(
                "CORRELATION_WINDOW_HOURS",
                self.correlation_window_hours,
            )?,
            recent_window: bounded_days("RECENT_DAYS", self.recent_days)?,
            weekly_buckets: bounded_weeks("WEEKLY_BUCKETS", self.weekly_buckets)?,
            max_trend_weeks: bounded_weeks("MAX_TREND_WEEKS", self.max_trend_weeks)?,
        })
    }

    pub fn default_period(&self) -> anyhow::Result<Duration> {
        bounded_days("DEFAULT_PERIOD_DAYS", self.default_period_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            data_dir: PathBuf::from("./data"),
            correlation_window_hours: 24,
            recent_days: 7,
            weekly_buckets: 8,
            max_trend_weeks: 4,
            default_period_days: 30,
        }
    }

    #[test]
    fn policy_uses_configured_windows() {
        let policy = settings().policy().unwrap();
        assert_eq!(policy.correlation_window, Duration::hours(24));
        assert_eq!(policy.recent_window, Duration::days(7));
        assert_eq!(policy.weekly_buckets, 8);
        assert_eq!(policy.max_trend_weeks, 4);
        assert_eq!(settings().default_period().unwrap(), Duration::days(30));
    }

    #[test]
    fn out_of_range_windows_are_errors() {
        let huge_window = Settings {
            correlation_window_hours: 9_000_000_000_000_000,
            ..settings()
        };
        assert!(huge_window.policy().is_err());

        let zero_window = Settings {
            correlation_window_hours: 0,
            ..settings()
        };
        assert!(zero_window.policy().is_err());

        let negative_recency = Settings {
            recent_days: -3,
            ..settings()
        };
        assert!(negative_recency.policy().is_err());

        let huge_period = Settings {
            default_period_days: 9_000_000_000_000,
            ..settings()
        };
        assert!(huge_period.default_period().is_err());
    }

    #[test]
    fn bucket_counts_are_capped() {
        let many_buckets = Settings {
            weekly_buckets: u32::MAX,
            ..settings()
        };
        assert!(many_buckets.policy().is_err());

        let many_trend_weeks = Settings {
            max_trend_weeks: MAX_WEEKS + 1,
            ..settings()
        };
        assert!(many_trend_weeks.policy().is_err());

        let at_cap = Settings {
            weekly_buckets: MAX_WEEKS,
            max_trend_weeks: MAX_WEEKS,
            ..settings()
        };
        assert_eq!(at_cap.policy().unwrap().weekly_buckets, MAX_WEEKS);
    }
}
