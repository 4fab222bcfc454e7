//! CSV plan file reading and writing.
//!
//! One subject per line:
//!
//! ```text
//! name,difficulty,importance,perfScore,allocatedHours
//! Math,9,10,80,1.78
//! ```
//!
//! Performance history is not stored; a loaded subject keeps its saved score
//! as a standalone value until the next recorded score.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{PlannerError, Result};
use crate::model::Subject;
use crate::planner::validate_name;

/// Header written at the top of every plan file.
pub const CSV_HEADER: &str = "name,difficulty,importance,perfScore,allocatedHours";

/// A first line containing this is treated as a header and skipped.
const HEADER_MARKER: &str = "name,difficulty,importance";

const FIELD_COUNT: usize = 5;

/// Write subjects to `path`, truncating any existing content.
pub fn save_subjects(path: &Path, subjects: &[Subject]) -> Result<()> {
    std::fs::write(path, render_subjects(subjects)).map_err(|source| PlannerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), subjects = subjects.len(), "saved plan");
    Ok(())
}

/// Read and validate every subject in `path`.
pub fn load_subjects(path: &Path) -> Result<Vec<Subject>> {
    let content = std::fs::read_to_string(path).map_err(|source| PlannerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let subjects = parse_subjects(&content)?;
    tracing::info!(path = %path.display(), subjects = subjects.len(), "loaded plan");
    Ok(subjects)
}

/// Render subjects as plan file text, header included.
///
/// Floats use their shortest exact representation so they read back to the
/// same value.
pub fn render_subjects(subjects: &[Subject]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + subjects.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for s in subjects {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            s.name(),
            s.difficulty(),
            s.importance(),
            s.performance_score(),
            s.allocated_hours()
        ));
    }
    out
}

/// Parse plan file text (useful for testing).
///
/// Either every line parses and the full list is returned, or nothing is.
pub fn parse_subjects(content: &str) -> Result<Vec<Subject>> {
    let mut subjects = Vec::new();
    let mut seen = HashSet::new();
    let mut first = true;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.trim().is_empty() {
            continue;
        }
        if first {
            first = false;
            if line.contains(HEADER_MARKER) {
                continue;
            }
        }

        let subject = parse_line(line, line_no)?;
        if !seen.insert(subject.name().to_string()) {
            return Err(PlannerError::DuplicateSubject(subject.name().to_string()));
        }
        subjects.push(subject);
    }

    Ok(subjects)
}

fn parse_line(line: &str, line_no: usize) -> Result<Subject> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(format_error(
            line_no,
            format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        ));
    }

    let name = fields[0];
    validate_name(name).map_err(|e| format_error(line_no, e.to_string()))?;

    let difficulty = parse_int(fields[1], "difficulty", line_no)?;
    let importance = parse_int(fields[2], "importance", line_no)?;
    let performance = parse_float(fields[3], "performance score", line_no)?;
    let hours = parse_float(fields[4], "allocated hours", line_no)?;

    let mut subject = Subject::new(name, difficulty, importance, performance);
    subject.set_allocated_hours(hours);
    Ok(subject)
}

fn parse_int(field: &str, what: &str, line_no: usize) -> Result<i64> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|e| format_error(line_no, format!("invalid {what} '{}': {e}", field.trim())))
}

fn parse_float(field: &str, what: &str, line_no: usize) -> Result<f64> {
    let value = field
        .trim()
        .parse::<f64>()
        .map_err(|e| format_error(line_no, format!("invalid {what} '{}': {e}", field.trim())))?;
    if !value.is_finite() {
        return Err(format_error(
            line_no,
            format!("{what} must be finite, got '{}'", field.trim()),
        ));
    }
    Ok(value)
}

fn format_error(line: usize, message: String) -> PlannerError {
    PlannerError::InvalidFormat { line, message }
}
