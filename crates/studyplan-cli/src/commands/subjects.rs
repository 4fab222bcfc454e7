//! The `add`, `remove`, `list` and `record` commands.

use anyhow::Result;

use studyplan_core::StudyPlanner;

use super::Session;

pub fn add(session: &Session, name: &str, difficulty: i64, importance: i64, perf: f64) -> Result<()> {
    let mut planner = session.load_planner()?;
    planner.add_subject(name, difficulty, importance, perf)?;
    session.save_planner(&planner)?;
    println!("Added {name}");
    Ok(())
}

pub fn remove(session: &Session, name: &str) -> Result<()> {
    let mut planner = session.load_planner()?;
    if planner.remove_subject(name) {
        session.save_planner(&planner)?;
        println!("Removed {name}");
    } else {
        println!("No subject named {name}, nothing removed.");
    }
    Ok(())
}

pub fn list(session: &Session, format: &str) -> Result<()> {
    let planner = session.load_planner()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(planner.subjects())?),
        _ => println!("{}", render_table(&planner)),
    }
    Ok(())
}

pub fn record(session: &Session, name: &str, score: f64) -> Result<()> {
    let mut planner = session.load_planner()?;
    planner.record_performance(name, score)?;
    session.save_planner(&planner)?;

    if let Some(subject) = planner.find_subject(name) {
        println!(
            "Recorded {score:.1} for {name}, average now {:.1} over {} score(s)",
            subject.performance_score(),
            subject.performance_history().len()
        );
    }
    Ok(())
}

/// Subjects as a table, or a placeholder line when there are none.
pub(crate) fn render_table(planner: &StudyPlanner) -> String {
    use comfy_table::{Cell, Table};

    if planner.is_empty() {
        return "(No subjects available)".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Subject",
        "Difficulty",
        "Importance",
        "Performance",
        "Hours",
    ]);

    for s in planner.subjects() {
        table.add_row(vec![
            Cell::new(s.name()),
            Cell::new(s.difficulty()),
            Cell::new(s.importance()),
            Cell::new(format!("{:.1}", s.performance_score())),
            Cell::new(format!("{:.2}", s.allocated_hours())),
        ]);
    }

    table.to_string()
}
