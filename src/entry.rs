//! Parsing of exercise entries typed on the command line
//!
//! Format: `ID[:DATA]` where ID is a catalog id or name.
//! - strength/flexibility: `WEIGHTxREPS` sets separated by commas,
//!   a bare `REPS` is a bodyweight set (`bench_press:135x10,155x8`)
//! - cardio: `DISTANCE[,SECONDS]` (`running:3.1,1800`)

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};

use crate::db::{ExercisePerformance, WorkoutRecord};
use crate::exercises;

/// Reps of the set a strength entry gets when no sets are given
const DEFAULT_REPS: u32 = 10;

pub fn parse_entry(input: &str) -> Result<ExercisePerformance> {
    let (key, data) = match input.split_once(':') {
        Some((key, data)) => (key.trim(), Some(data.trim())),
        None => (input.trim(), None),
    };

    let exercise = exercises::lookup(key).ok_or_else(|| anyhow!("Unknown exercise: {key}"))?;
    let mut performance = ExercisePerformance::from_exercise(exercise);

    if exercise.category.is_cardio() {
        let (distance, secs) = match data {
            Some(data) if !data.is_empty() => parse_cardio(data)
                .with_context(|| format!("Bad cardio entry '{input}', expected DISTANCE[,SECONDS]"))?,
            _ => (0.0, 0),
        };
        performance.distance = Some(distance);
        performance.duration_secs = Some(secs);
    } else {
        let sets = match data {
            Some(data) if !data.is_empty() => parse_sets(data)
                .with_context(|| format!("Bad sets in '{input}', expected WEIGHTxREPS,..."))?,
            _ => vec![(0.0, DEFAULT_REPS)],
        };
        performance.sets = Some(sets.len() as u32);
        performance.weight = Some(sets.iter().map(|(w, _)| *w).collect());
        performance.reps = Some(sets.iter().map(|(_, r)| *r).collect());
    }

    Ok(performance)
}

fn parse_sets(data: &str) -> Result<Vec<(f64, u32)>> {
    data.split(',')
        .map(|set| -> Result<(f64, u32)> {
            let set = set.trim();
            match set.split_once(['x', 'X']) {
                Some((weight, reps)) => Ok((parse_amount(weight)?, reps.trim().parse()?)),
                None => Ok((0.0, set.parse()?)),
            }
        })
        .collect()
}

fn parse_cardio(data: &str) -> Result<(f64, u32)> {
    match data.split_once(',') {
        Some((distance, secs)) => Ok((parse_amount(distance)?, secs.trim().parse()?)),
        None => Ok((parse_amount(data)?, 0)),
    }
}

fn parse_amount(raw: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse()?;
    if !value.is_finite() || value < 0.0 {
        bail!("'{}' is not a non-negative number", raw.trim());
    }
    Ok(value)
}

/// Build a new workout from command-line input
pub fn new_workout(
    name: &str,
    duration_minutes: Option<u32>,
    notes: Option<String>,
    entries: &[String],
    created_at: DateTime<Utc>,
) -> Result<WorkoutRecord> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Workout name must not be empty");
    }
    if entries.is_empty() {
        bail!("Add at least one exercise with --exercise");
    }

    let exercises = entries
        .iter()
        .map(|e| parse_entry(e))
        .collect::<Result<Vec<_>>>()?;

    Ok(WorkoutRecord {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        notes: notes.filter(|n| !n.trim().is_empty()),
        duration_minutes,
        created_at,
        exercises,
    })
}
