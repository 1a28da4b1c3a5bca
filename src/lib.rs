//! ironlog - Workout log with training analytics
//!
//! Logged workouts live in SQLite; the `analytics` module turns them into
//! summaries, streaks, rankings, trends and chart series.

pub mod analytics;
pub mod clock;
pub mod config;
pub mod db;
pub mod entry;
pub mod exercises;
pub mod import;
pub mod seed;
pub mod tui;

pub use clock::Clock;
pub use config::Config;
pub use db::{Database, ExercisePerformance, WorkoutRecord};
