//! Trailing-window activity summaries

use serde::Serialize;

use crate::clock::Clock;
use crate::db::WorkoutRecord;

pub const WEEK_DAYS: i64 = 7;
pub const MONTH_DAYS: i64 = 30;

/// Totals over workouts with `created_at >= now - days`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WindowSummary {
    pub days: i64,
    pub workout_count: usize,
    pub total_minutes: u64,
    pub total_volume: f64,
}

impl WindowSummary {
    pub fn for_window(workouts: &[WorkoutRecord], clock: Clock, days: i64) -> Self {
        let start = clock.days_ago(days);

        workouts
            .iter()
            .filter(|w| w.created_at >= start)
            .fold(Self { days, ..Self::default() }, |mut acc, w| {
                acc.workout_count += 1;
                acc.total_minutes += u64::from(w.minutes());
                acc.total_volume += w.volume();
                acc
            })
    }

    /// Whole hours, rounded
    pub fn hours(&self) -> u64 {
        (self.total_minutes + 30) / 60
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub week: WindowSummary,
    pub month: WindowSummary,
}

pub fn summarize(workouts: &[WorkoutRecord], clock: Clock) -> ActivitySummary {
    ActivitySummary {
        week: WindowSummary::for_window(workouts, clock, WEEK_DAYS),
        month: WindowSummary::for_window(workouts, clock, MONTH_DAYS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::*;
    use chrono::Duration;

    #[test]
    fn test_summary_empty() {
        let summary = summarize(&[], clock());
        assert_eq!(summary.week.workout_count, 0);
        assert_eq!(summary.week.total_minutes, 0);
        assert_eq!(summary.week.total_volume, 0.0);
        assert_eq!(summary.month.workout_count, 0);
    }

    #[test]
    fn test_summary_windows() {
        let workouts = vec![
            with(
                create_workout(1, Some(45)),
                vec![strength("bench_press", &["chest"], &[100.0, 110.0], &[10, 8])],
            ),
            create_workout(3, None),
            with(
                create_workout(12, Some(60)),
                vec![strength("squat", &["legs"], &[200.0], &[5])],
            ),
            create_workout(31, Some(90)),
        ];

        let summary = summarize(&workouts, clock());
        assert_eq!(summary.week.workout_count, 2);
        assert_eq!(summary.week.total_minutes, 45);
        assert_eq!(summary.week.total_volume, 1880.0);

        assert_eq!(summary.month.workout_count, 3);
        assert_eq!(summary.month.total_minutes, 105);
        assert_eq!(summary.month.total_volume, 2880.0);
    }

    #[test]
    fn test_window_lower_bound_inclusive() {
        let boundary = create_workout_at(now() - Duration::days(7), Some(30));
        let just_outside = create_workout_at(now() - Duration::days(7) - Duration::seconds(1), Some(30));

        let week = WindowSummary::for_window(&[boundary, just_outside], clock(), WEEK_DAYS);
        assert_eq!(week.workout_count, 1);
        assert_eq!(week.total_minutes, 30);
    }

    #[test]
    fn test_empty_workout_counts_without_volume() {
        let workouts = vec![create_workout(0, Some(20))];
        let week = WindowSummary::for_window(&workouts, clock(), WEEK_DAYS);
        assert_eq!(week.workout_count, 1);
        assert_eq!(week.total_minutes, 20);
        assert_eq!(week.total_volume, 0.0);
    }

    #[test]
    fn test_cardio_has_no_volume() {
        let workouts = vec![with(
            create_workout(0, Some(30)),
            vec![cardio("running", Some(3.1), Some(1800))],
        )];
        assert_eq!(summarize(&workouts, clock()).week.total_volume, 0.0);
    }

    #[test]
    fn test_hours_rounding() {
        let summary = WindowSummary { total_minutes: 89, ..Default::default() };
        assert_eq!(summary.hours(), 1);
        let summary = WindowSummary { total_minutes: 90, ..Default::default() };
        assert_eq!(summary.hours(), 2);
    }
}
