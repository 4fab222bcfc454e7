//! Allocation engine.
//!
//! Splits the daily budget across subjects in proportion to their priority
//! weight, and rebalances existing allocations from recorded performance.
//! Everything here is a pure in-memory transformation over a slice of
//! subjects; the registry decides which subjects and which budget.

use serde::{Deserialize, Serialize};

use crate::model::{clamp, round2, Schedule, Subject};

/// Every subject gets at least this many hours before renormalization.
pub const MIN_SLOT_HOURS: f64 = 0.25;

/// Lower bound applied to each subject during adaptive adjustment.
pub const ADJUST_FLOOR_HOURS: f64 = 0.1;

/// Thresholds and factors for [`adaptive_adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveParams {
    /// Subjects scoring below this get more time.
    #[serde(default = "default_low_threshold")]
    pub low_threshold: f64,
    /// Subjects scoring above this get less time.
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,
    /// Multiplier applied to underperforming subjects.
    #[serde(default = "default_boost_factor")]
    pub boost_factor: f64,
    /// Multiplier applied to strong subjects.
    #[serde(default = "default_reduce_factor")]
    pub reduce_factor: f64,
}

fn default_low_threshold() -> f64 {
    70.0
}
fn default_high_threshold() -> f64 {
    90.0
}
fn default_boost_factor() -> f64 {
    1.15
}
fn default_reduce_factor() -> f64 {
    0.9
}

impl Default for AdaptiveParams {
    fn default() -> Self {
        Self {
            low_threshold: default_low_threshold(),
            high_threshold: default_high_threshold(),
            boost_factor: default_boost_factor(),
            reduce_factor: default_reduce_factor(),
        }
    }
}

/// Priority weight of every subject, in slice order.
pub fn compute_weights(subjects: &[Subject]) -> Vec<f64> {
    subjects.iter().map(Subject::priority_weight).collect()
}

/// Distribute `total_hours` over `weights`.
///
/// - Non-positive total weight: an even, unrounded split.
/// - Otherwise: proportional shares floored at [`MIN_SLOT_HOURS`], rescaled
///   back to `total_hours`, rounded to two decimals. The rescale can push a
///   floored share back under the floor; that is not re-iterated.
pub fn allocate(weights: &[f64], total_hours: f64) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let sum_weights: f64 = weights.iter().sum();
    if sum_weights <= 0.0 {
        let per = total_hours / weights.len() as f64;
        tracing::warn!(
            sum_weights,
            "non-positive total weight, splitting {total_hours}h evenly"
        );
        return vec![per; weights.len()];
    }

    let mut raw: Vec<f64> = weights
        .iter()
        .map(|w| ((w / sum_weights) * total_hours).max(MIN_SLOT_HOURS))
        .collect();

    let raw_sum: f64 = raw.iter().sum();
    if raw_sum > 0.0 {
        let scale = total_hours / raw_sum;
        for hours in &mut raw {
            *hours *= scale;
        }
        if raw.iter().any(|&h| h < MIN_SLOT_HOURS) {
            tracing::debug!(scale, "renormalization pushed a slot below the floor");
        }
    }

    raw.into_iter().map(round2).collect()
}

/// Compute a fresh schedule and write each share into its subject.
///
/// Returns an empty schedule (and touches nothing) when there are no
/// subjects.
pub fn generate_schedule(subjects: &mut [Subject], total_daily_hours: f64) -> Schedule {
    let mut schedule = Schedule::new();
    if subjects.is_empty() {
        return schedule;
    }

    let weights = compute_weights(subjects);
    let shares = allocate(&weights, total_daily_hours);

    for (subject, hours) in subjects.iter_mut().zip(shares) {
        subject.set_allocated_hours(hours);
        schedule.alloc.insert(subject.name().to_string(), hours);
    }

    tracing::debug!(
        subjects = subjects.len(),
        total = schedule.total_hours(),
        "generated schedule"
    );
    schedule
}

/// Nudge current allocations toward underperforming subjects.
///
/// Works on whatever `allocated_hours` each subject holds right now; weights
/// are not recomputed. Each subject is scaled by the boost or reduce factor
/// according to its score, clamped to `[ADJUST_FLOOR_HOURS, total_daily_hours]`,
/// and then all subjects are rescaled so they sum to the budget again.
pub fn adaptive_adjust(subjects: &mut [Subject], total_daily_hours: f64, params: &AdaptiveParams) {
    for subject in subjects.iter_mut() {
        let perf = subject.performance_score();
        let current = subject.allocated_hours();
        let adjusted = if perf < params.low_threshold {
            current * params.boost_factor
        } else if perf > params.high_threshold {
            current * params.reduce_factor
        } else {
            current
        };
        subject.set_allocated_hours(clamp(adjusted, ADJUST_FLOOR_HOURS, total_daily_hours));
    }

    let sum: f64 = subjects.iter().map(Subject::allocated_hours).sum();
    if sum <= 0.0 {
        tracing::warn!("adaptive adjustment found no allocated hours, skipping rescale");
        return;
    }

    let scale = total_daily_hours / sum;
    for subject in subjects.iter_mut() {
        let hours = round2(subject.allocated_hours() * scale);
        subject.set_allocated_hours(hours);
    }

    tracing::debug!(subjects = subjects.len(), scale, "adaptive adjustment applied");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_subjects() -> Vec<Subject> {
        vec![
            Subject::new("Math", 9, 10, 80.0),
            Subject::new("Physics", 8, 9, 70.0),
            Subject::new("History", 4, 5, 90.0),
            Subject::new("English", 3, 4, 95.0),
        ]
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn weights_for_demo_subjects() {
        let weights = compute_weights(&demo_subjects());
        assert_close(weights[0], 63.0);
        assert_close(weights[1], 57.6);
        assert_close(weights[2], 12.0);
        assert_close(weights[3], 6.6);
    }

    #[test]
    fn demo_schedule_floors_and_rescales() {
        let mut subjects = demo_subjects();
        let schedule = generate_schedule(&mut subjects, 4.0);

        assert_close(schedule.get("Math").unwrap(), 1.78);
        assert_close(schedule.get("Physics").unwrap(), 1.63);
        assert_close(schedule.get("History").unwrap(), 0.34);
        assert_close(schedule.get("English").unwrap(), 0.25);
        assert!((schedule.total_hours() - 4.0).abs() < 1e-9);

        for s in &subjects {
            assert_eq!(schedule.get(s.name()), Some(s.allocated_hours()));
        }
    }

    #[test]
    fn empty_registry_gives_empty_schedule() {
        let mut subjects: Vec<Subject> = Vec::new();
        assert!(generate_schedule(&mut subjects, 4.0).is_empty());
    }

    #[test]
    fn single_subject_gets_everything() {
        for total in [0.0, 0.1, 3.0, 12.5] {
            let mut subjects = vec![Subject::new("Solo", 2, 3, 50.0)];
            let schedule = generate_schedule(&mut subjects, total);
            assert_close(schedule.get("Solo").unwrap(), total);
        }
    }

    #[test]
    fn identical_subjects_share_equally() {
        let mut subjects = vec![
            Subject::new("A", 5, 5, 75.0),
            Subject::new("B", 5, 5, 75.0),
            Subject::new("C", 5, 5, 75.0),
        ];
        let schedule = generate_schedule(&mut subjects, 4.0);
        for name in ["A", "B", "C"] {
            assert_close(schedule.get(name).unwrap(), 1.33);
        }
    }

    #[test]
    fn non_positive_weights_split_evenly() {
        assert_eq!(allocate(&[0.0, 0.0, 0.0], 3.0), vec![1.0, 1.0, 1.0]);
        let shares = allocate(&[0.0, 0.0, 0.0], 1.0);
        assert_close(shares[0], 1.0 / 3.0);
    }

    #[test]
    fn skewed_weights_can_undershoot_floor() {
        // The floored slot shrinks again after rescaling.
        let shares = allocate(&[1000.0, 1.0], 1.0);
        assert!(shares[1] < MIN_SLOT_HOURS);
        assert_close(shares[0] + shares[1], 1.0);
    }

    #[test]
    fn adjust_after_demo_schedule() {
        let mut subjects = demo_subjects();
        generate_schedule(&mut subjects, 4.0);
        adaptive_adjust(&mut subjects, 4.0, &AdaptiveParams::default());

        // Only English (95 > 90) changes before the rescale.
        let hours: Vec<f64> = subjects.iter().map(Subject::allocated_hours).collect();
        assert_close(hours[0], 1.79);
        assert_close(hours[1], 1.64);
        assert_close(hours[2], 0.34);
        assert_close(hours[3], 0.23);
    }

    #[test]
    fn adjust_without_schedule_uses_floor() {
        let mut subjects = demo_subjects();
        adaptive_adjust(&mut subjects, 4.0, &AdaptiveParams::default());
        for s in &subjects {
            assert_close(s.allocated_hours(), 1.0);
        }
    }

    #[test]
    fn adjust_boosts_weak_subjects() {
        let mut subjects = vec![
            Subject::new("Weak", 5, 5, 40.0),
            Subject::new("Strong", 5, 5, 95.0),
        ];
        for s in &mut subjects {
            s.set_allocated_hours(1.0);
        }
        adaptive_adjust(&mut subjects, 2.0, &AdaptiveParams::default());
        // 1.15 vs 0.9, rescaled to 2.0.
        assert_close(subjects[0].allocated_hours(), 1.12);
        assert_close(subjects[1].allocated_hours(), 0.88);
    }

    #[test]
    fn repeated_adjustment_stays_on_budget() {
        let mut subjects = demo_subjects();
        subjects[1].set_performance(30.0);
        generate_schedule(&mut subjects, 4.0);

        for _ in 0..20 {
            adaptive_adjust(&mut subjects, 4.0, &AdaptiveParams::default());
            let total: f64 = subjects.iter().map(Subject::allocated_hours).sum();
            assert!((total - 4.0).abs() <= 0.01 * subjects.len() as f64);
            for s in &subjects {
                assert!(s.allocated_hours() <= 4.0);
            }
        }
    }

    #[test]
    fn custom_params_are_respected() {
        let params = AdaptiveParams {
            low_threshold: 50.0,
            high_threshold: 60.0,
            boost_factor: 2.0,
            reduce_factor: 0.5,
        };
        let mut subjects = vec![
            Subject::new("A", 5, 5, 40.0),
            Subject::new("B", 5, 5, 55.0),
            Subject::new("C", 5, 5, 70.0),
        ];
        for s in &mut subjects {
            s.set_allocated_hours(1.0);
        }
        adaptive_adjust(&mut subjects, 3.5, &params);
        // 2.0 + 1.0 + 0.5 = 3.5, so the rescale is the identity.
        assert_close(subjects[0].allocated_hours(), 2.0);
        assert_close(subjects[1].allocated_hours(), 1.0);
        assert_close(subjects[2].allocated_hours(), 0.5);
    }
}
