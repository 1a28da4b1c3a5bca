//! Import of workout exports from the hosted backend
//!
//! The export is a JSON array of workouts with nested `workout_exercises`,
//! each joined to its `exercises` catalog row.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::db::{Database, ExercisePerformance, WorkoutRecord};

#[derive(Debug, Deserialize)]
struct WorkoutRow {
    id: String,
    name: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    duration_minutes: Option<u32>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    workout_exercises: Vec<WorkoutExerciseRow>,
}

#[derive(Debug, Deserialize)]
struct WorkoutExerciseRow {
    #[serde(default)]
    sets: Option<u32>,
    #[serde(default)]
    reps: Option<Vec<u32>>,
    #[serde(default)]
    weight: Option<Vec<f64>>,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    duration_seconds: Option<u32>,
    exercises: Option<ExerciseRow>,
}

#[derive(Debug, Deserialize)]
struct ExerciseRow {
    id: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    muscle_groups: Option<Vec<String>>,
}

impl WorkoutRow {
    fn into_record(self) -> Result<WorkoutRecord> {
        let workout_id = self.id;
        let mut exercises = Vec::with_capacity(self.workout_exercises.len());
        for row in self.workout_exercises {
            let Some(exercise) = row.exercises else {
                warn!("Workout {}: exercise entry without catalog row, skipped", workout_id);
                continue;
            };
            let weights = row.weight.as_deref().unwrap_or_default();
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                bail!("Workout {}: negative weight for {}", workout_id, exercise.name);
            }
            if row.distance.is_some_and(|d| !d.is_finite() || d < 0.0) {
                bail!("Workout {}: negative distance for {}", workout_id, exercise.name);
            }
            exercises.push(ExercisePerformance {
                exercise_id: exercise.id,
                exercise_name: exercise.name,
                category: exercise.category.unwrap_or_else(|| "other".to_string()),
                muscle_groups: exercise.muscle_groups.unwrap_or_default(),
                sets: row.sets,
                reps: row.reps,
                weight: row.weight,
                distance: row.distance,
                duration_secs: row.duration_seconds,
            });
        }

        Ok(WorkoutRecord {
            id: workout_id,
            name: self.name,
            notes: self.notes,
            duration_minutes: self.duration_minutes,
            created_at: self.created_at,
            exercises,
        })
    }
}

/// Parse an export into workout records
pub fn parse_workouts(json: &str) -> Result<Vec<WorkoutRecord>> {
    let rows: Vec<WorkoutRow> = serde_json::from_str(json).context("Invalid workout export")?;
    rows.into_iter().map(WorkoutRow::into_record).collect()
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Store workouts from an export file; workouts already present are skipped
pub fn import_file(db: &Database, path: &Path) -> Result<ImportReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    import_workouts(db, parse_workouts(&json)?)
}

pub fn import_workouts(db: &Database, workouts: Vec<WorkoutRecord>) -> Result<ImportReport> {
    let mut report = ImportReport::default();
    for workout in workouts {
        if db.get_workout(&workout.id)?.is_some() {
            report.skipped += 1;
            continue;
        }
        db.add_workout(&workout)?;
        report.imported += 1;
    }
    info!("Imported {} workouts, skipped {}", report.imported, report.skipped);
    Ok(report)
}
