//! The `studyplan init` command.

use std::path::Path;

use anyhow::Result;

use studyplan_core::config::{set_total_daily_hours_in_file, CONFIG_FILE_NAME, SAMPLE_CONFIG};
use studyplan_core::planner::DEFAULT_DAILY_HOURS;

use super::demo_planner;

/// Plan file written when `--data` is not given.
const DEFAULT_DATA_FILE: &str = "studyplan.csv";

pub fn execute(config: Option<&Path>, data: Option<&Path>, hours: Option<f64>) -> Result<()> {
    // Validates the budget before anything is written.
    let mut planner = demo_planner(hours.unwrap_or(DEFAULT_DAILY_HOURS))?;

    // Create the config file
    let config_path = config.unwrap_or(Path::new(CONFIG_FILE_NAME));
    if config_path.exists() {
        println!("{} already exists, skipping.", config_path.display());
    } else {
        std::fs::write(config_path, SAMPLE_CONFIG)?;
        if let Some(hours) = hours {
            set_total_daily_hours_in_file(config_path, hours)?;
        }
        println!("Created {}", config_path.display());
    }

    // Create the plan file with example subjects
    let data_file = data.unwrap_or(Path::new(DEFAULT_DATA_FILE));
    if data_file.exists() {
        println!("{} already exists, skipping.", data_file.display());
    } else {
        planner.generate_schedule();
        planner.save_to_file(data_file)?;
        println!("Created {}", data_file.display());
    }

    println!("\nNext steps:");
    println!("  1. Run: studyplan list");
    println!("  2. Run: studyplan record --name Math --score 65");
    println!("  3. Run: studyplan schedule");

    Ok(())
}
