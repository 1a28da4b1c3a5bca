//! Progress chart series

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::chronological;
use crate::clock::Clock;
use crate::db::WorkoutRecord;

pub const FREQUENCY_WEEKS: usize = 12;
pub const DURATION_POINTS: usize = 20;
pub const VOLUME_POINTS: usize = 15;
pub const EXERCISE_POINTS: usize = 15;

/// Workouts per week, weeks starting on Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyFrequency {
    pub week_start: NaiveDate,
    pub workouts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationPoint {
    pub date: NaiveDate,
    pub workout: String,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub workout: String,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionMetrics {
    Cardio { distance: f64, minutes: u32 },
    Strength { max_weight: f64, total_volume: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseProgressPoint {
    pub date: NaiveDate,
    pub workout: String,
    pub metrics: SessionMetrics,
}

/// Short chart label, e.g. "Mar 16"
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Last twelve weeks that have workouts, oldest first
pub fn weekly_frequency(workouts: &[WorkoutRecord], clock: Clock) -> Vec<WeeklyFrequency> {
    let mut weeks: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for workout in workouts {
        *weeks.entry(week_start(clock.date_of(workout.created_at))).or_insert(0) += 1;
    }

    let skip = weeks.len().saturating_sub(FREQUENCY_WEEKS);
    weeks
        .into_iter()
        .skip(skip)
        .map(|(week_start, workouts)| WeeklyFrequency { week_start, workouts })
        .collect()
}

/// Duration of the last twenty workouts that logged one
pub fn duration_trend(workouts: &[WorkoutRecord], clock: Clock) -> Vec<DurationPoint> {
    let points: Vec<_> = chronological(workouts)
        .into_iter()
        .filter_map(|w| {
            w.duration_minutes.map(|minutes| DurationPoint {
                date: clock.date_of(w.created_at),
                workout: w.name.clone(),
                minutes,
            })
        })
        .collect();
    last_n(points, DURATION_POINTS)
}

/// Total volume of the last fifteen workouts that lifted anything
pub fn volume_progress(workouts: &[WorkoutRecord], clock: Clock) -> Vec<VolumePoint> {
    let points: Vec<_> = chronological(workouts)
        .into_iter()
        .map(|w| VolumePoint {
            date: clock.date_of(w.created_at),
            workout: w.name.clone(),
            volume: w.volume(),
        })
        .filter(|p| p.volume > 0.0)
        .collect();
    last_n(points, VOLUME_POINTS)
}

/// Last fifteen sessions of one exercise.
/// Only the first entry of the exercise in each workout is used.
pub fn exercise_progress(
    workouts: &[WorkoutRecord],
    exercise_id: &str,
    clock: Clock,
) -> Vec<ExerciseProgressPoint> {
    let points: Vec<_> = chronological(workouts)
        .into_iter()
        .filter_map(|w| {
            let exercise = w.exercises.iter().find(|e| e.exercise_id == exercise_id)?;
            let metrics = if exercise.kind().is_cardio() {
                SessionMetrics::Cardio {
                    distance: exercise.distance.unwrap_or(0.0),
                    minutes: exercise.duration_secs.map(rounded_minutes).unwrap_or(0),
                }
            } else {
                SessionMetrics::Strength {
                    max_weight: exercise.max_weight(),
                    total_volume: exercise.volume(),
                }
            };
            Some(ExerciseProgressPoint {
                date: clock.date_of(w.created_at),
                workout: w.name.clone(),
                metrics,
            })
        })
        .collect();
    last_n(points, EXERCISE_POINTS)
}

/// Seconds to whole minutes, half up
fn rounded_minutes(secs: u32) -> u32 {
    secs / 60 + u32::from(secs % 60 >= 30)
}

fn last_n<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    let skip = items.len().saturating_sub(n);
    items.drain(..skip);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::*;

    #[test]
    fn test_week_start_is_sunday() {
        let thursday = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        assert_eq!(week_start(thursday), sunday);
        assert_eq!(week_start(sunday), sunday);
        assert_eq!(short_date(sunday), "Mar 16");
    }

    #[test]
    fn test_weekly_frequency() {
        // now = Thu 2025-03-20; days 0..=4 are Sun 16th..Thu 20th
        let workouts: Vec<_> = [0, 1, 4, 5, 12].iter().map(|d| create_workout(*d, None)).collect();
        let weeks = weekly_frequency(&workouts, clock());
        let counts: Vec<_> = weeks.iter().map(|w| (short_date(w.week_start), w.workouts)).collect();
        assert_eq!(
            counts,
            vec![("Mar 2".to_string(), 1), ("Mar 9".to_string(), 1), ("Mar 16".to_string(), 3)]
        );
    }

    #[test]
    fn test_weekly_frequency_keeps_last_twelve() {
        let workouts: Vec<_> = (0..20).map(|w| create_workout(w * 7, None)).collect();
        let weeks = weekly_frequency(&workouts, clock());
        assert_eq!(weeks.len(), FREQUENCY_WEEKS);
        assert_eq!(weeks.last().unwrap().week_start, week_start(clock().today()));
    }

    #[test]
    fn test_duration_trend_chronological_and_filtered() {
        let workouts = vec![
            create_workout(1, Some(50)),
            create_workout(3, None),
            create_workout(2, Some(0)),
            create_workout(5, Some(40)),
        ];
        let minutes: Vec<_> = duration_trend(&workouts, clock()).iter().map(|p| p.minutes).collect();
        assert_eq!(minutes, vec![40, 0, 50]);
    }

    #[test]
    fn test_duration_trend_limit() {
        let workouts: Vec<_> = (0..30).map(|d| create_workout(d, Some(d as u32))).collect();
        let points = duration_trend(&workouts, clock());
        assert_eq!(points.len(), DURATION_POINTS);
        assert_eq!(points.last().unwrap().minutes, 0);
        assert_eq!(points[0].minutes, 19);
    }

    #[test]
    fn test_volume_progress_skips_zero_volume() {
        let workouts = vec![
            with(
                create_workout(2, None),
                vec![strength("squat", &["legs"], &[200.0], &[5])],
            ),
            with(create_workout(1, None), vec![cardio("running", Some(3.0), None)]),
            with(
                create_workout(0, None),
                vec![
                    strength("bench_press", &["chest"], &[100.0, 110.0], &[10, 8]),
                    strength("squat", &["legs"], &[100.0], &[1]),
                ],
            ),
        ];
        let volumes: Vec<_> = volume_progress(&workouts, clock()).iter().map(|p| p.volume).collect();
        assert_eq!(volumes, vec![1000.0, 1980.0]);
    }

    #[test]
    fn test_exercise_progress() {
        let workouts = vec![
            with(
                create_workout(0, None),
                vec![strength("bench_press", &["chest"], &[135.0, 155.0], &[10, 6])],
            ),
            with(create_workout(1, None), vec![cardio("running", Some(3.1), Some(1830))]),
            with(
                create_workout(3, None),
                vec![strength("bench_press", &["chest"], &[135.0], &[8])],
            ),
        ];

        let bench = exercise_progress(&workouts, "bench_press", clock());
        assert_eq!(bench.len(), 2);
        assert_eq!(
            bench[1].metrics,
            SessionMetrics::Strength { max_weight: 155.0, total_volume: 2280.0 }
        );

        let run = exercise_progress(&workouts, "running", clock());
        assert_eq!(run[0].metrics, SessionMetrics::Cardio { distance: 3.1, minutes: 31 });

        assert!(exercise_progress(&workouts, "deadlift", clock()).is_empty());
    }

    #[test]
    fn test_exercise_progress_huge_duration() {
        let workouts = vec![with(
            create_workout(0, None),
            vec![cardio("running", Some(1.0), Some(u32::MAX))],
        )];
        let run = exercise_progress(&workouts, "running", clock());
        assert_eq!(
            run[0].metrics,
            SessionMetrics::Cardio { distance: 1.0, minutes: u32::MAX / 60 }
        );
        assert_eq!(rounded_minutes(89), 1);
        assert_eq!(rounded_minutes(90), 2);
    }
}
