//! Analytics module - derived training metrics
//!
//! Features:
//! - 7/30-day activity summaries (workouts, minutes, volume)
//! - Logging streak
//! - Muscle group ranking and achievements
//! - Per-exercise trend classification
//! - Chart series (category, weekday, monthly, progress)
//!
//! Everything here is a pure function of the workout list and a [`Clock`].

pub mod achievements;
pub mod breakdown;
pub mod dashboard;
pub mod muscle_groups;
pub mod progress;
pub mod streak;
pub mod summary;
pub mod trends;

pub use achievements::{Achievement, Achievements};
pub use breakdown::{Breakdown, CategoryShare, MonthlyDuration, WeekdayCount};
pub use dashboard::{DashboardStats, RecentWorkout, StreakBadge};
pub use muscle_groups::MuscleGroupCount;
pub use streak::current_streak;
pub use summary::{ActivitySummary, WindowSummary};
pub use trends::{ExerciseTrend, Trend};

use crate::clock::Clock;
use crate::db::WorkoutRecord;

/// Training analytics over a snapshot of workouts
pub struct Analytics {
    workouts: Vec<WorkoutRecord>,
    clock: Clock,
}

impl Analytics {
    pub fn new(workouts: Vec<WorkoutRecord>, clock: Clock) -> Self {
        Self { workouts, clock }
    }

    pub fn workouts(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn summary(&self) -> ActivitySummary {
        summary::summarize(&self.workouts, self.clock)
    }

    pub fn streak(&self) -> u32 {
        streak::current_streak(&self.workouts, self.clock)
    }

    pub fn top_muscle_groups(&self) -> Vec<MuscleGroupCount> {
        muscle_groups::top_muscle_groups(&self.workouts, muscle_groups::TOP_MUSCLE_GROUPS)
    }

    pub fn achievements(&self) -> Achievements {
        Achievements::compute(&self.workouts, self.clock)
    }

    pub fn trends(&self) -> Vec<ExerciseTrend> {
        trends::exercise_trends(&self.workouts)
    }

    pub fn breakdown(&self) -> Breakdown {
        Breakdown::compute(&self.workouts, self.clock)
    }

    pub fn dashboard(&self, weekly_goal: u32) -> DashboardStats {
        DashboardStats::compute(&self.workouts, self.clock, weekly_goal)
    }

    pub fn recent(&self, limit: usize) -> Vec<RecentWorkout> {
        dashboard::recent_workouts(&self.workouts, self.clock, limit)
    }
}

/// Workouts sorted oldest first. Stable for equal timestamps.
pub(crate) fn chronological(workouts: &[WorkoutRecord]) -> Vec<&WorkoutRecord> {
    let mut sorted: Vec<_> = workouts.iter().collect();
    sorted.sort_by_key(|w| w.created_at);
    sorted
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::clock::Clock;
    use crate::db::{ExercisePerformance, WorkoutRecord};

    /// Fixed "now" for all analytics tests: Thursday 2025-03-20 12:00 UTC
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap()
    }

    pub fn clock() -> Clock {
        Clock::utc(now())
    }

    pub fn create_workout(days_ago: i64, duration: Option<u32>) -> WorkoutRecord {
        create_workout_at(now() - Duration::days(days_ago), duration)
    }

    pub fn create_workout_at(at: DateTime<Utc>, duration: Option<u32>) -> WorkoutRecord {
        WorkoutRecord {
            id: format!("w-{}", at.timestamp()),
            name: "Session".to_string(),
            notes: None,
            duration_minutes: duration,
            created_at: at,
            exercises: vec![],
        }
    }

    pub fn strength(id: &str, muscles: &[&str], weight: &[f64], reps: &[u32]) -> ExercisePerformance {
        ExercisePerformance {
            exercise_id: id.to_string(),
            exercise_name: id.replace('_', " "),
            category: "strength".to_string(),
            muscle_groups: muscles.iter().map(|m| m.to_string()).collect(),
            sets: Some(reps.len() as u32),
            reps: Some(reps.to_vec()),
            weight: Some(weight.to_vec()),
            distance: None,
            duration_secs: None,
        }
    }

    pub fn cardio(id: &str, distance: Option<f64>, secs: Option<u32>) -> ExercisePerformance {
        ExercisePerformance {
            exercise_id: id.to_string(),
            exercise_name: id.replace('_', " "),
            category: "cardio".to_string(),
            muscle_groups: vec![],
            sets: None,
            reps: None,
            weight: None,
            distance,
            duration_secs: secs,
        }
    }

    pub fn with(mut workout: WorkoutRecord, exercises: Vec<ExercisePerformance>) -> WorkoutRecord {
        workout.exercises = exercises;
        workout
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_analytics_empty() {
        let analytics = Analytics::new(vec![], clock());
        let summary = analytics.summary();
        assert_eq!(summary.week, WindowSummary { days: 7, ..Default::default() });
        assert_eq!(summary.month.workout_count, 0);
        assert_eq!(analytics.streak(), 0);
        assert!(analytics.top_muscle_groups().is_empty());
        assert_eq!(analytics.achievements(), Achievements::default());
        assert!(analytics.trends().is_empty());

        let breakdown = analytics.breakdown();
        assert!(breakdown.categories.is_empty());
        assert!(breakdown.weekdays.iter().all(|d| d.count == 0));
        assert!(breakdown.monthly.is_empty());

        assert_eq!(analytics.dashboard(4).total_workouts, 0);
        assert!(analytics.recent(5).is_empty());
    }

    #[test]
    fn test_chronological_sorts_unordered_input() {
        let workouts = vec![
            create_workout(2, None),
            create_workout(5, None),
            create_workout(0, None),
        ];
        let sorted = chronological(&workouts);
        assert!(sorted.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }
}
