//! The subject registry.
//!
//! [`StudyPlanner`] owns every subject by value, in insertion order, together
//! with the daily hour budget. All allocation work is delegated to
//! [`crate::engine`]; persistence to [`crate::persistence`].

use std::path::Path;

use crate::engine::{self, AdaptiveParams};
use crate::error::{PlannerError, Result};
use crate::model::{Schedule, Subject, DEFAULT_PERFORMANCE};
use crate::persistence;

/// Daily budget of a freshly created planner.
pub const DEFAULT_DAILY_HOURS: f64 = 4.0;

/// A set of uniquely named subjects and the hours available each day.
#[derive(Debug, Clone)]
pub struct StudyPlanner {
    subjects: Vec<Subject>,
    total_daily_hours: f64,
}

impl Default for StudyPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl StudyPlanner {
    pub fn new() -> Self {
        Self {
            subjects: Vec::new(),
            total_daily_hours: DEFAULT_DAILY_HOURS,
        }
    }

    /// Create an empty planner with a custom budget.
    pub fn with_daily_hours(hours: f64) -> Result<Self> {
        let mut planner = Self::new();
        planner.set_total_daily_hours(hours)?;
        Ok(planner)
    }

    /// Register a new subject.
    pub fn add_subject(
        &mut self,
        name: &str,
        difficulty: i64,
        importance: i64,
        performance: f64,
    ) -> Result<()> {
        validate_name(name)?;
        validate_score(performance)?;
        if self.find_subject(name).is_some() {
            return Err(PlannerError::DuplicateSubject(name.to_string()));
        }
        self.subjects
            .push(Subject::new(name, difficulty, importance, performance));
        tracing::debug!(name, "added subject");
        Ok(())
    }

    /// Register a subject with the default (perfect) performance score.
    pub fn add_subject_default(&mut self, name: &str, difficulty: i64, importance: i64) -> Result<()> {
        self.add_subject(name, difficulty, importance, DEFAULT_PERFORMANCE)
    }

    /// Remove a subject by name. Returns whether anything was removed.
    pub fn remove_subject(&mut self, name: &str) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.name() != name);
        let removed = self.subjects.len() != before;
        if removed {
            tracing::debug!(name, "removed subject");
        }
        removed
    }

    pub fn find_subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name() == name)
    }

    fn find_subject_mut(&mut self, name: &str) -> Result<&mut Subject> {
        self.subjects
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| PlannerError::SubjectNotFound(name.to_string()))
    }

    /// All subjects, in insertion order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn total_daily_hours(&self) -> f64 {
        self.total_daily_hours
    }

    /// Set the daily budget. Rejects negative and non-finite values.
    pub fn set_total_daily_hours(&mut self, hours: f64) -> Result<()> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(PlannerError::InvalidHours(hours));
        }
        self.total_daily_hours = hours;
        Ok(())
    }

    /// Recompute every subject's allocation from its weight.
    pub fn generate_schedule(&mut self) -> Schedule {
        engine::generate_schedule(&mut self.subjects, self.total_daily_hours)
    }

    /// Rebalance current allocations from performance scores.
    pub fn adaptive_adjust(&mut self, params: &AdaptiveParams) {
        engine::adaptive_adjust(&mut self.subjects, self.total_daily_hours, params);
    }

    /// Record a score for the named subject.
    pub fn record_performance(&mut self, name: &str, score: f64) -> Result<()> {
        validate_score(score)?;
        let subject = self.find_subject_mut(name)?;
        subject.update_performance(score);
        tracing::debug!(
            name,
            score,
            average = subject.performance_score(),
            "recorded performance"
        );
        Ok(())
    }

    /// Override the named subject's score without touching its history.
    pub fn set_performance(&mut self, name: &str, score: f64) -> Result<()> {
        validate_score(score)?;
        self.find_subject_mut(name)?.set_performance(score);
        Ok(())
    }

    /// Snapshot of the allocations currently held by each subject.
    pub fn current_schedule(&self) -> Schedule {
        self.subjects
            .iter()
            .map(|s| (s.name().to_string(), s.allocated_hours()))
            .collect()
    }

    /// Write all subjects to a CSV plan file, replacing its contents.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        persistence::save_subjects(path, &self.subjects)
    }

    /// Replace all subjects with those read from a CSV plan file.
    ///
    /// The whole file is validated first; on any error the registry keeps
    /// its previous subjects.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        self.subjects = persistence::load_subjects(path)?;
        Ok(())
    }
}

/// Names end up as the first CSV field, so they cannot contain separators.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains([',', '\n', '\r']) {
        return Err(PlannerError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Out-of-range scores are clamped, but NaN and infinities have no
/// meaningful clamp and would end up in the plan file.
fn validate_score(score: f64) -> Result<()> {
    if !score.is_finite() {
        return Err(PlannerError::InvalidScore(score));
    }
    Ok(())
}
