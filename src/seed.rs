//! Synthetic workout generator for demos and manual testing

use chrono::{Duration, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::clock::Clock;
use crate::db::{ExercisePerformance, WorkoutRecord};
use crate::exercises::{Category, Exercise, get_all_exercises};

/// Chance that a given day has a workout
const TRAINING_DAY_PROBABILITY: f64 = 0.6;

const WORKOUT_NAMES: &[&str] = &[
    "Push Day",
    "Pull Day",
    "Leg Day",
    "Full Body",
    "Morning Cardio",
    "Mobility",
];

#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    /// Days back from now to fill
    pub days: u32,
    /// Upper bound on generated workouts
    pub max_workouts: usize,
    /// Fixed RNG seed for reproducible data
    pub seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            days: 60,
            max_workouts: 100,
            seed: None,
        }
    }
}

/// Generate workouts newest first, with loads creeping up over time
pub fn generate(options: SeedOptions, clock: Clock) -> Vec<WorkoutRecord> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut workouts = Vec::new();
    for day in 0..options.days {
        if workouts.len() >= options.max_workouts {
            break;
        }
        if !rng.gen_bool(TRAINING_DAY_PROBABILITY) {
            continue;
        }

        // Older sessions are lighter
        let progress = 1.0 - f64::from(day) / f64::from(options.days.max(1)) * 0.3;
        let created_at = clock.days_ago(i64::from(day))
            - Duration::hours(i64::from(clock.now().hour() % 6));
        let count = rng.gen_range(1..=4);

        let exercises: Vec<ExercisePerformance> = get_all_exercises()
            .choose_multiple(&mut rng, count)
            .map(|e| perform(e, progress, &mut rng))
            .collect();

        workouts.push(WorkoutRecord {
            id: uuid::Uuid::from_u128(rng.gen_range(0..u128::MAX)).to_string(),
            name: WORKOUT_NAMES.choose(&mut rng).copied().unwrap_or("Workout").to_string(),
            notes: None,
            duration_minutes: rng.gen_bool(0.9).then(|| rng.gen_range(20..=90)),
            created_at,
            exercises,
        });
    }

    info!("Generated {} synthetic workouts over {} days", workouts.len(), options.days);
    workouts
}

fn perform(exercise: &Exercise, progress: f64, rng: &mut StdRng) -> ExercisePerformance {
    let mut performance = ExercisePerformance::from_exercise(exercise);
    match exercise.category {
        Category::Cardio => {
            let miles: f64 = rng.gen_range(1.0..6.0) * progress;
            performance.distance = Some((miles * 10.0).round() / 10.0);
            performance.duration_secs = Some((miles * rng.gen_range(480.0..660.0)) as u32);
        }
        _ => {
            let sets = rng.gen_range(2..=5);
            let base: f64 = if exercise.category == Category::Strength {
                rng.gen_range(45.0..225.0) * progress
            } else {
                0.0
            };
            let weight: Vec<f64> = (0..sets).map(|_| (base / 5.0).round() * 5.0).collect();
            let reps: Vec<u32> = (0..sets).map(|_| rng.gen_range(5..=12)).collect();
            performance.sets = Some(sets);
            performance.weight = Some(weight);
            performance.reps = Some(reps);
        }
    }
    performance
}
