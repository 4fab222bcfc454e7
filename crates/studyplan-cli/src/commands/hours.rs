//! The `studyplan hours` command.

use std::path::PathBuf;

use anyhow::Result;

use studyplan_core::config::{resolve_config_path, set_total_daily_hours_in_file, CONFIG_FILE_NAME};
use studyplan_core::StudyPlanner;

use super::Session;

pub fn execute(session: &Session, set: Option<f64>) -> Result<()> {
    let Some(hours) = set else {
        println!("Total daily hours: {:.2}", session.daily_hours);
        return Ok(());
    };

    // Same validation the planner applies.
    StudyPlanner::with_daily_hours(hours)?;

    let target = match resolve_config_path(session.config_path.as_deref())? {
        Some(path) => path,
        None => PathBuf::from(CONFIG_FILE_NAME),
    };
    set_total_daily_hours_in_file(&target, hours)?;
    println!(
        "Total daily hours set to {hours:.2} in {}",
        target.display()
    );
    Ok(())
}
