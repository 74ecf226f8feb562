//! Property-based tests for intern_core.

use chrono::{DateTime, NaiveDateTime};
use intern_core::{stage_index, Memory, ProjectStages, MILESTONE_THRESHOLD};
use proptest::prelude::*;

fn arb_stages() -> impl Strategy<Value = ProjectStages> {
    prop::collection::vec("[a-z ]{1,20}", 1..30)
        .prop_map(|v| ProjectStages::new(v).unwrap())
}

fn ts(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
}

proptest! {
    /// Stage index is `min(total / 3, len - 1)` for every total.
    #[test]
    fn stage_index_matches_formula(total in 0usize..10_000, stages in arb_stages()) {
        let expected = std::cmp::min(total / 3, stages.len() - 1);
        prop_assert_eq!(stages.index_for(total), expected);
        prop_assert_eq!(stage_index(total, stages.len()), expected);
        prop_assert_eq!(stages.current(total), &stages.as_slice()[expected]);
    }

    /// Adding memories never moves the stage backwards.
    #[test]
    fn stage_index_is_monotonic(total in 0usize..10_000, len in 1usize..50) {
        prop_assert!(stage_index(total, len) <= stage_index(total + 1, len));
    }

    /// Any non-negative importance is accepted and classified by the threshold.
    #[test]
    fn milestone_classification(importance in 0.0f64..10.0, secs in 0i64..2_000_000_000) {
        let m = Memory::new("post", ts(secs), importance, "daily").unwrap();
        prop_assert_eq!(m.is_milestone(), importance >= MILESTONE_THRESHOLD);
    }

    #[test]
    fn negative_importance_rejected(importance in -10.0f64..-0.0001) {
        prop_assert!(Memory::new("post", ts(0), importance, "daily").is_err());
    }
}
