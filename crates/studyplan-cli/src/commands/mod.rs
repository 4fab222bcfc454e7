//! Subcommand implementations and the state they share.

use std::path::PathBuf;

use anyhow::{Context, Result};

use studyplan_core::config::{load_config_from, PlannerConfig};
use studyplan_core::StudyPlanner;

pub mod hours;
pub mod init;
pub mod interactive;
pub mod schedule;
pub mod subjects;

/// Subjects seeded by `init` and by an interactive session with no plan file.
pub const DEMO_SUBJECTS: [(&str, i64, i64, f64); 4] = [
    ("Math", 9, 10, 80.0),
    ("Physics", 8, 9, 70.0),
    ("History", 4, 5, 90.0),
    ("English", 3, 4, 95.0),
];

/// Resolved configuration for one CLI invocation.
#[derive(Debug)]
pub struct Session {
    pub config: PlannerConfig,
    /// The `--config` path, if one was given.
    pub config_path: Option<PathBuf>,
    /// Plan file read and written by subject/schedule commands.
    pub data_file: PathBuf,
    /// Budget after `--hours` is applied.
    pub daily_hours: f64,
}

impl Session {
    pub fn open(
        config_path: Option<PathBuf>,
        data: Option<PathBuf>,
        hours: Option<f64>,
    ) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let data_file = data.unwrap_or_else(|| config.data_file.clone());
        let daily_hours = hours.unwrap_or(config.total_daily_hours);

        Ok(Self {
            config,
            config_path,
            data_file,
            daily_hours,
        })
    }

    /// A planner with this session's budget and the plan file's subjects.
    ///
    /// A missing plan file yields an empty planner.
    pub fn load_planner(&self) -> Result<StudyPlanner> {
        let mut planner = StudyPlanner::with_daily_hours(self.daily_hours)?;
        if self.data_file.exists() {
            planner
                .load_from_file(&self.data_file)
                .with_context(|| format!("failed to load plan: {}", self.data_file.display()))?;
        } else {
            tracing::debug!(path = %self.data_file.display(), "no plan file yet");
        }
        Ok(planner)
    }

    pub fn save_planner(&self, planner: &StudyPlanner) -> Result<()> {
        planner
            .save_to_file(&self.data_file)
            .with_context(|| format!("failed to save plan: {}", self.data_file.display()))
    }
}

/// A planner holding [`DEMO_SUBJECTS`].
pub fn demo_planner(daily_hours: f64) -> Result<StudyPlanner> {
    let mut planner = StudyPlanner::with_daily_hours(daily_hours)?;
    for (name, difficulty, importance, perf) in DEMO_SUBJECTS {
        planner.add_subject(name, difficulty, importance, perf)?;
    }
    Ok(planner)
}
