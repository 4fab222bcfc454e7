//! Planner configuration.
//!
//! Search order for [`load_config_from`]:
//! 1. an explicit path (must exist)
//! 2. `studyplan.toml` in the current directory
//! 3. `~/.config/studyplan/config.toml`
//!
//! Environment variable overrides: `STUDYPLAN_DAILY_HOURS`, `STUDYPLAN_DATA_FILE`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::AdaptiveParams;
use crate::planner::DEFAULT_DAILY_HOURS;

/// Name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = "studyplan.toml";

const HOURS_ENV: &str = "STUDYPLAN_DAILY_HOURS";
const DATA_FILE_ENV: &str = "STUDYPLAN_DATA_FILE";

/// Top-level studyplan configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Hours to distribute each day.
    #[serde(default = "default_daily_hours")]
    pub total_daily_hours: f64,
    /// CSV plan file used by the CLI.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Adaptive adjustment thresholds and factors.
    #[serde(default)]
    pub adaptive: AdaptiveParams,
}

fn default_daily_hours() -> f64 {
    DEFAULT_DAILY_HOURS
}
fn default_data_file() -> PathBuf {
    PathBuf::from("studyplan.csv")
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            total_daily_hours: default_daily_hours(),
            data_file: default_data_file(),
            adaptive: AdaptiveParams::default(),
        }
    }
}

impl PlannerConfig {
    /// Check that every value is usable by the engine.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.total_daily_hours.is_finite() && self.total_daily_hours >= 0.0,
            "total_daily_hours must be a non-negative number, got {}",
            self.total_daily_hours
        );
        validate_adaptive(&self.adaptive)
    }
}

/// Check adaptive thresholds and factors.
pub fn validate_adaptive(params: &AdaptiveParams) -> Result<()> {
    let in_range = |v: f64| (0.0..=100.0).contains(&v);
    anyhow::ensure!(
        in_range(params.low_threshold) && in_range(params.high_threshold),
        "thresholds must be between 0 and 100"
    );
    anyhow::ensure!(
        params.low_threshold <= params.high_threshold,
        "low threshold ({}) must not exceed high threshold ({})",
        params.low_threshold,
        params.high_threshold
    );
    for (name, factor) in [
        ("boost_factor", params.boost_factor),
        ("reduce_factor", params.reduce_factor),
    ] {
        anyhow::ensure!(
            factor.is_finite() && factor > 0.0,
            "{name} must be a positive number, got {factor}"
        );
    }
    Ok(())
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PlannerConfig> {
    let mut config = match resolve_config_path(path)? {
        Some(path) => parse_config_file(&path)?,
        None => PlannerConfig::default(),
    };

    if let Ok(hours) = std::env::var(HOURS_ENV) {
        config.total_daily_hours = hours
            .trim()
            .parse()
            .with_context(|| format!("invalid {HOURS_ENV}: '{hours}'"))?;
    }
    if let Ok(file) = std::env::var(DATA_FILE_ENV) {
        if !file.is_empty() {
            config.data_file = PathBuf::from(file);
        }
    }

    config.validate()?;
    Ok(config)
}

/// The config file that [`load_config_from`] would read, if any.
pub fn resolve_config_path(path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(p) = path {
        if p.exists() {
            return Ok(Some(p.to_path_buf()));
        }
        anyhow::bail!("config file not found: {}", p.display());
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Ok(Some(local));
    }
    Ok(global_config_path().filter(|p| p.exists()))
}

fn parse_config_file(path: &Path) -> Result<PlannerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = toml::from_str::<PlannerConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("studyplan")
            .join("config.toml")
    })
}

/// Persist a new daily budget into a config file.
///
/// Only the `total_daily_hours` key is rewritten; comments and the rest of
/// the file are preserved. The file is created if it does not exist.
pub fn set_total_daily_hours_in_file(path: &Path, hours: f64) -> Result<()> {
    anyhow::ensure!(
        hours.is_finite() && hours >= 0.0,
        "hours must be a non-negative number, got {hours}"
    );

    let content = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?
    } else {
        String::new()
    };
    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    doc["total_daily_hours"] = toml_edit::value(hours);

    std::fs::write(path, doc.to_string())
        .with_context(|| format!("failed to update config: {}", path.display()))?;
    Ok(())
}

/// Starter config written by `studyplan init`.
pub const SAMPLE_CONFIG: &str = r#"# studyplan configuration

# Hours to distribute across all subjects each day.
total_daily_hours = 4.0

# Plan file (CSV) used by the CLI.
data_file = "studyplan.csv"

[adaptive]
# Subjects scoring below low_threshold get boost_factor more time,
# subjects above high_threshold get reduce_factor of their time.
low_threshold = 70.0
high_threshold = 90.0
boost_factor = 1.15
reduce_factor = 0.9
"#;
