//! The `schedule`, `show` and `adjust` commands.

use anyhow::Result;

use studyplan_core::config::validate_adaptive;
use studyplan_core::{AdaptiveParams, Schedule};

use super::Session;

pub fn generate(session: &Session, format: &str) -> Result<()> {
    let mut planner = session.load_planner()?;
    let schedule = planner.generate_schedule();
    session.save_planner(&planner)?;
    print_schedule(&schedule, format)
}

pub fn show(session: &Session, format: &str) -> Result<()> {
    let planner = session.load_planner()?;
    print_schedule(&planner.current_schedule(), format)
}

pub fn adjust(
    session: &Session,
    low: Option<f64>,
    high: Option<f64>,
    boost: Option<f64>,
    reduce: Option<f64>,
) -> Result<()> {
    let defaults = session.config.adaptive;
    let params = AdaptiveParams {
        low_threshold: low.unwrap_or(defaults.low_threshold),
        high_threshold: high.unwrap_or(defaults.high_threshold),
        boost_factor: boost.unwrap_or(defaults.boost_factor),
        reduce_factor: reduce.unwrap_or(defaults.reduce_factor),
    };
    validate_adaptive(&params)?;

    let mut planner = session.load_planner()?;
    planner.adaptive_adjust(&params);
    session.save_planner(&planner)?;
    print_schedule(&planner.current_schedule(), "text")
}

fn print_schedule(schedule: &Schedule, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&schedule.alloc)?),
        _ => print!("{schedule}"),
    }
    Ok(())
}
