use crate::store::{parse_decimal, KeyValueStore};

pub const GOAL_KEY: &str = "dailyGoal";
pub const DEFAULT_GOAL: f64 = 2.0;
pub const MIN_GOAL: f64 = 0.3;
pub const MAX_GOAL: f64 = 10.0;

/// Goal below which a day never counts as achieved.
const ACHIEVABLE_GOAL: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub percent: f64,
    pub achieved: bool,
}

impl Progress {
    pub fn compute(intake: f64, goal: f64) -> Self {
        let percent = if goal.is_finite() && goal > 0.0 {
            let ratio = intake / goal * 100.0;
            if ratio.is_finite() { ratio.clamp(0.0, 100.0) } else { 0.0 }
        } else {
            0.0
        };

        Self {
            percent,
            achieved: intake >= goal && goal > ACHIEVABLE_GOAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GoalTracker;

impl GoalTracker {
    pub fn get_goal<S: KeyValueStore + ?Sized>(&self, store: &S) -> f64 {
        store
            .read_text(GOAL_KEY)
            .and_then(|text| parse_decimal(&text))
            .filter(|goal| *goal > 0.0)
            .unwrap_or(DEFAULT_GOAL)
    }

    /// Stores the goal clamped to `[MIN_GOAL, MAX_GOAL]` and returns it.
    pub fn set_goal<S: KeyValueStore + ?Sized>(&self, store: &mut S, value: f64) -> f64 {
        let goal = if value.is_nan() {
            DEFAULT_GOAL
        } else {
            value.clamp(MIN_GOAL, MAX_GOAL)
        };
        store.write_text(GOAL_KEY, &goal.to_string());
        goal
    }

    pub fn progress<S: KeyValueStore + ?Sized>(&self, store: &S, intake_today: f64) -> Progress {
        Progress::compute(intake_today, self.get_goal(store))
    }
}
