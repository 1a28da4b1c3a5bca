//! Database module - SQLite storage for workout data

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::exercises::{Category, Exercise};

/// One logged workout with its exercises
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub name: String,
    pub notes: Option<String>,
    pub duration_minutes: Option<u32>,
    pub created_at: DateTime<Utc>,
    /// Logging order is preserved
    pub exercises: Vec<ExercisePerformance>,
}

/// A single exercise as performed inside a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisePerformance {
    pub exercise_id: String,
    pub exercise_name: String,
    /// Raw category string; see [`ExercisePerformance::kind`]
    pub category: String,
    pub muscle_groups: Vec<String>,
    pub sets: Option<u32>,
    /// One entry per set, parallel to `weight`
    pub reps: Option<Vec<u32>>,
    pub weight: Option<Vec<f64>>,
    /// Miles
    pub distance: Option<f64>,
    pub duration_secs: Option<u32>,
}

impl ExercisePerformance {
    /// New performance with catalog metadata and an empty log
    pub fn from_exercise(exercise: &Exercise) -> Self {
        Self {
            exercise_id: exercise.id.to_string(),
            exercise_name: exercise.name.to_string(),
            category: exercise.category.as_str().to_string(),
            muscle_groups: exercise.muscle_groups.iter().map(|m| m.to_string()).collect(),
            sets: None,
            reps: None,
            weight: None,
            distance: None,
            duration_secs: None,
        }
    }

    pub fn kind(&self) -> Category {
        Category::parse(&self.category)
    }

    /// Σ weight[i] × reps[i], zipped to the shorter array.
    /// Zero unless both arrays are present.
    pub fn volume(&self) -> f64 {
        match (&self.weight, &self.reps) {
            (Some(weight), Some(reps)) => weight
                .iter()
                .zip(reps)
                .map(|(w, r)| w * f64::from(*r))
                .sum(),
            _ => 0.0,
        }
    }

    /// Heaviest set, 0 when no weights were logged
    pub fn max_weight(&self) -> f64 {
        self.weight
            .as_deref()
            .unwrap_or_default()
            .iter()
            .copied()
            .fold(0.0, f64::max)
    }
}

impl WorkoutRecord {
    pub fn volume(&self) -> f64 {
        self.exercises.iter().map(ExercisePerformance::volume).sum()
    }

    pub fn minutes(&self) -> u32 {
        self.duration_minutes.unwrap_or(0)
    }
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Cannot open database at {path}"))?;
        let db = Self { conn };
        db.init_schema()?;
        debug!("Opened database {}", path);
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                notes TEXT,
                duration_minutes INTEGER,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                exercise_id TEXT NOT NULL,
                exercise_name TEXT NOT NULL,
                category TEXT NOT NULL,
                muscle_groups TEXT NOT NULL,
                sets INTEGER,
                reps TEXT,
                weight TEXT,
                distance REAL,
                duration_seconds INTEGER
            );
            CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout
                ON workout_exercises(workout_id);",
        )?;
        Ok(())
    }

    /// Add new workout with all of its exercises
    pub fn add_workout(&self, workout: &WorkoutRecord) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO workouts (id, name, notes, duration_minutes, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                workout.id,
                workout.name,
                workout.notes,
                workout.duration_minutes,
                workout.created_at.to_rfc3339(),
            ],
        )
        .with_context(|| format!("Cannot insert workout {}", workout.id))?;

        for (position, ex) in workout.exercises.iter().enumerate() {
            tx.execute(
                "INSERT INTO workout_exercises (workout_id, position, exercise_id, exercise_name, category, muscle_groups, sets, reps, weight, distance, duration_seconds)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    workout.id,
                    position as i64,
                    ex.exercise_id,
                    ex.exercise_name,
                    ex.category,
                    serde_json::to_string(&ex.muscle_groups)?,
                    ex.sets,
                    ex.reps.as_ref().map(serde_json::to_string).transpose()?,
                    ex.weight.as_ref().map(serde_json::to_string).transpose()?,
                    ex.distance,
                    ex.duration_secs,
                ],
            )?;
        }

        tx.commit()?;
        info!(
            "Saved workout {} ({} exercises)",
            workout.id,
            workout.exercises.len()
        );
        Ok(())
    }

    /// Get all workouts, newest first
    pub fn get_workouts(&self) -> Result<Vec<WorkoutRecord>> {
        self.query_workouts(None)
    }

    /// Get the latest `limit` workouts, newest first
    pub fn get_recent_workouts(&self, limit: usize) -> Result<Vec<WorkoutRecord>> {
        self.query_workouts(Some(limit))
    }

    /// Get one workout by id
    pub fn get_workout(&self, id: &str) -> Result<Option<WorkoutRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, notes, duration_minutes, created_at FROM workouts WHERE id = ?1",
                params![id],
                WorkoutRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => {
                let mut exercises = self.load_exercises(Some(id))?;
                let workout = row.into_record(exercises.remove(id).unwrap_or_default())?;
                Ok(Some(workout))
            }
            None => Ok(None),
        }
    }

    /// Delete a workout and its exercises. Returns false if it did not exist.
    pub fn delete_workout(&self, id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM workout_exercises WHERE workout_id = ?1", params![id])?;
        let removed = tx.execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
        tx.commit()?;
        if removed > 0 {
            info!("Deleted workout {}", id);
        }
        Ok(removed > 0)
    }

    pub fn workout_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn query_workouts(&self, limit: Option<usize>) -> Result<Vec<WorkoutRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, notes, duration_minutes, created_at FROM workouts ORDER BY created_at DESC LIMIT ?1",
        )?;
        let bounded = limit.is_some();
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let rows = stmt
            .query_map(params![limit], WorkoutRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        // A limited fetch loads only the exercises of the returned workouts
        let mut exercises = if bounded {
            HashMap::new()
        } else {
            self.load_exercises(None)?
        };
        rows.into_iter()
            .map(|row| -> Result<WorkoutRecord> {
                let entries = if bounded {
                    self.load_exercises(Some(row.id.as_str()))?.remove(&row.id)
                } else {
                    exercises.remove(&row.id)
                };
                row.into_record(entries.unwrap_or_default())
            })
            .collect()
    }

    /// Exercises grouped by workout id, each group in logging order
    fn load_exercises(
        &self,
        workout_id: Option<&str>,
    ) -> Result<HashMap<String, Vec<ExercisePerformance>>> {
        let mut stmt = self.conn.prepare(
            "SELECT workout_id, exercise_id, exercise_name, category, muscle_groups, sets, reps, weight, distance, duration_seconds
             FROM workout_exercises
             WHERE ?1 IS NULL OR workout_id = ?1
             ORDER BY workout_id, position",
        )?;

        let rows = stmt
            .query_map(params![workout_id], |row| {
                Ok(ExerciseRow {
                    workout_id: row.get(0)?,
                    exercise_id: row.get(1)?,
                    exercise_name: row.get(2)?,
                    category: row.get(3)?,
                    muscle_groups: row.get(4)?,
                    sets: row.get(5)?,
                    reps: row.get(6)?,
                    weight: row.get(7)?,
                    distance: row.get(8)?,
                    duration_secs: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut grouped: HashMap<String, Vec<ExercisePerformance>> = HashMap::new();
        for row in rows {
            let workout_id = row.workout_id.clone();
            grouped.entry(workout_id).or_default().push(row.into_performance()?);
        }
        Ok(grouped)
    }
}

struct WorkoutRow {
    id: String,
    name: String,
    notes: Option<String>,
    duration_minutes: Option<u32>,
    created_at: String,
}

impl WorkoutRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            notes: row.get(2)?,
            duration_minutes: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn into_record(self, exercises: Vec<ExercisePerformance>) -> Result<WorkoutRecord> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .with_context(|| format!("Bad created_at for workout {}", self.id))?
            .with_timezone(&Utc);
        Ok(WorkoutRecord {
            id: self.id,
            name: self.name,
            notes: self.notes,
            duration_minutes: self.duration_minutes,
            created_at,
            exercises,
        })
    }
}

struct ExerciseRow {
    workout_id: String,
    exercise_id: String,
    exercise_name: String,
    category: String,
    muscle_groups: String,
    sets: Option<u32>,
    reps: Option<String>,
    weight: Option<String>,
    distance: Option<f64>,
    duration_secs: Option<u32>,
}

impl ExerciseRow {
    fn into_performance(self) -> Result<ExercisePerformance> {
        let context = || format!("Bad exercise data in workout {}", self.workout_id);
        Ok(ExercisePerformance {
            muscle_groups: serde_json::from_str(&self.muscle_groups).with_context(context)?,
            reps: self
                .reps
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .with_context(context)?,
            weight: self
                .weight
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .with_context(context)?,
            exercise_id: self.exercise_id,
            exercise_name: self.exercise_name,
            category: self.category,
            sets: self.sets,
            distance: self.distance,
            duration_secs: self.duration_secs,
        })
    }
}
