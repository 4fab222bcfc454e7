//! Core data model types for studyplan.
//!
//! A [`Subject`] is one study topic with its priority inputs and its current
//! slot in the daily plan. A [`Schedule`] is a derived name → hours snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Lowest and highest accepted difficulty/importance rating.
pub const RATING_RANGE: (i64, i64) = (1, 10);

/// Score assigned to a subject that has never been scored.
pub const DEFAULT_PERFORMANCE: f64 = 100.0;

/// Number of recent scores kept for the rolling performance average.
pub const HISTORY_WINDOW: usize = 10;

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics: when `lo > hi` the lower bound
/// is checked first and wins.
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Round to two decimal places (half away from zero).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn clamp_rating(v: i64) -> u8 {
    // Range is 1..=10, so the narrowing is lossless.
    clamp(v, RATING_RANGE.0, RATING_RANGE.1) as u8
}

fn clamp_score(v: f64) -> f64 {
    // NaN fails both comparisons in `clamp`; pin it to the floor.
    if v.is_nan() {
        return 0.0;
    }
    clamp(v, 0.0, 100.0)
}

/// A single study topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    name: String,
    difficulty: u8,
    importance: u8,
    performance_score: f64,
    allocated_hours: f64,
    performance_history: Vec<f64>,
}

impl Subject {
    /// Create a subject, clamping ratings to 1–10 and the score to 0–100.
    pub fn new(name: impl Into<String>, difficulty: i64, importance: i64, performance: f64) -> Self {
        Self {
            name: name.into(),
            difficulty: clamp_rating(difficulty),
            importance: clamp_rating(importance),
            performance_score: clamp_score(performance),
            allocated_hours: 0.0,
            performance_history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn importance(&self) -> u8 {
        self.importance
    }

    pub fn performance_score(&self) -> f64 {
        self.performance_score
    }

    pub fn allocated_hours(&self) -> f64 {
        self.allocated_hours
    }

    /// The most recent recorded scores, oldest first.
    pub fn performance_history(&self) -> &[f64] {
        &self.performance_history
    }

    /// Priority weight: `difficulty * importance * (1.5 - score / 100)`.
    ///
    /// A weaker recent performance raises the weight, so the subject gets
    /// more of the day.
    pub fn priority_weight(&self) -> f64 {
        let perf_factor = 1.5 - (self.performance_score / 100.0);
        let base = f64::from(self.difficulty) * f64::from(self.importance);
        base * perf_factor
    }

    /// Set the scheduled hours. Negative values are stored as zero.
    pub fn set_allocated_hours(&mut self, hours: f64) {
        self.allocated_hours = hours.max(0.0);
    }

    /// Record a new score and recompute the rolling average.
    pub fn update_performance(&mut self, score: f64) {
        self.performance_history.push(clamp_score(score));
        if self.performance_history.len() > HISTORY_WINDOW {
            let excess = self.performance_history.len() - HISTORY_WINDOW;
            self.performance_history.drain(..excess);
        }
        let sum: f64 = self.performance_history.iter().sum();
        self.performance_score = sum / self.performance_history.len() as f64;
    }

    /// Override the score without touching the history.
    pub fn set_performance(&mut self, score: f64) {
        self.performance_score = clamp_score(score);
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<15} | diff: {:<2} imp: {:<2} perf: {:<6} hrs: {:<5}",
            self.name,
            self.difficulty,
            self.importance,
            format!("{:.1}", self.performance_score),
            format!("{:.2}", self.allocated_hours),
        )
    }
}

/// A name → hours snapshot of one day's plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Hours per subject, ordered by name.
    pub alloc: BTreeMap<String, f64>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all allocated hours.
    pub fn total_hours(&self) -> f64 {
        self.alloc.values().sum()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.alloc.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.alloc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alloc.is_empty()
    }
}

impl Add for Schedule {
    type Output = Schedule;

    /// Merge two schedules, summing the hours of subjects present in both.
    fn add(mut self, other: Schedule) -> Schedule {
        for (name, hours) in other.alloc {
            *self.alloc.entry(name).or_insert(0.0) += hours;
        }
        self
    }
}

impl<'a> Add<&'a Schedule> for &'a Schedule {
    type Output = Schedule;

    fn add(self, other: &'a Schedule) -> Schedule {
        self.clone() + other.clone()
    }
}

impl FromIterator<(String, f64)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            alloc: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schedule (total {:.2} hrs):", self.total_hours())?;
        for (name, hours) in &self.alloc {
            writeln!(f, "  - {name:<15} -> {hours:.2} hrs")?;
        }
        Ok(())
    }
}
