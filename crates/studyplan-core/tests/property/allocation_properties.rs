use proptest::prelude::*;
use studyplan_core::persistence::{parse_subjects, render_subjects};
use studyplan_core::{AdaptiveParams, StudyPlanner};

fn planner_strategy() -> impl Strategy<Value = StudyPlanner> {
    (
        prop::collection::vec((-5i64..15, -5i64..15, -20.0f64..120.0), 1..12),
        0.0f64..24.0,
    )
        .prop_map(|(specs, hours)| {
            let mut planner = StudyPlanner::with_daily_hours(hours).unwrap();
            for (i, (difficulty, importance, perf)) in specs.into_iter().enumerate() {
                planner
                    .add_subject(&format!("Subject{i}"), difficulty, importance, perf)
                    .unwrap();
            }
            planner
        })
}

fn tolerance(planner: &StudyPlanner) -> f64 {
    0.01 * planner.len() as f64 + 1e-9
}

proptest! {
    #[test]
    fn attributes_stay_in_range(
        mut planner in planner_strategy(),
        scores in prop::collection::vec(-50.0f64..150.0, 0..30),
    ) {
        for (i, score) in scores.iter().enumerate() {
            let name = format!("Subject{}", i % planner.len());
            planner.record_performance(&name, *score).unwrap();
        }
        planner.generate_schedule();
        planner.adaptive_adjust(&AdaptiveParams::default());

        for s in planner.subjects() {
            prop_assert!((1..=10).contains(&s.difficulty()));
            prop_assert!((1..=10).contains(&s.importance()));
            prop_assert!((0.0..=100.0).contains(&s.performance_score()));
            prop_assert!(s.allocated_hours() >= 0.0);
            prop_assert!(s.performance_history().len() <= 10);
        }
    }

    #[test]
    fn schedule_sums_to_budget(mut planner in planner_strategy()) {
        let schedule = planner.generate_schedule();
        prop_assert_eq!(schedule.len(), planner.len());
        let diff = (schedule.total_hours() - planner.total_daily_hours()).abs();
        prop_assert!(diff <= tolerance(&planner), "off by {}", diff);
    }

    #[test]
    fn schedule_is_deterministic(planner in planner_strategy()) {
        let mut a = planner.clone();
        let mut b = planner;
        prop_assert_eq!(a.generate_schedule(), b.generate_schedule());
    }

    #[test]
    fn repeated_adjustment_stays_on_budget(mut planner in planner_strategy(), rounds in 1usize..6) {
        planner.generate_schedule();
        for _ in 0..rounds {
            planner.adaptive_adjust(&AdaptiveParams::default());
            let total = planner.current_schedule().total_hours();
            let diff = (total - planner.total_daily_hours()).abs();
            prop_assert!(diff <= tolerance(&planner), "off by {}", diff);
        }
    }

    #[test]
    fn csv_roundtrip_preserves_tuples(mut planner in planner_strategy()) {
        planner.generate_schedule();
        let loaded = parse_subjects(&render_subjects(planner.subjects())).unwrap();
        prop_assert_eq!(loaded.len(), planner.len());
        for (a, b) in planner.subjects().iter().zip(&loaded) {
            prop_assert_eq!(a.name(), b.name());
            prop_assert_eq!(a.difficulty(), b.difficulty());
            prop_assert_eq!(a.importance(), b.importance());
            prop_assert_eq!(a.performance_score(), b.performance_score());
            prop_assert_eq!(a.allocated_hours(), b.allocated_hours());
        }
    }
}
