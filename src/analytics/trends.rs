//! Per-exercise performance trends
//!
//! Compares the average of the last three sessions of an exercise against
//! the three sessions before them. Cardio is measured by distance,
//! everything else by volume (weight × reps).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::db::{ExercisePerformance, WorkoutRecord};
use crate::exercises::Category;

/// Fewer sessions than this never produce a trend
pub const MIN_SESSIONS: usize = 2;
/// Sessions per comparison window
pub const TREND_WINDOW: usize = 3;
pub const IMPROVING_RATIO: f64 = 1.10;
pub const DECLINING_RATIO: f64 = 0.90;
pub const MAX_TRENDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Improving => "↑",
            Trend::Declining => "↓",
            Trend::Stable => "→",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseTrend {
    pub exercise_id: String,
    pub name: String,
    pub category: String,
    pub sessions: usize,
    pub trend: Trend,
    /// Percent change, 0 when stable
    pub trend_value: u32,
    pub recent_avg: f64,
    pub older_avg: f64,
}

impl ExerciseTrend {
    pub fn format(&self) -> String {
        let change = if self.trend_value > 0 {
            format!(" {}%", self.trend_value)
        } else {
            String::new()
        };
        format!(
            "{:24} {:12} {:3} sessions  {} {}{}",
            self.name,
            self.category,
            self.sessions,
            self.trend.arrow(),
            self.trend.label(),
            change
        )
    }
}

/// Classify a recent average against an older one.
/// A zero or negative older average is always stable.
pub fn classify(recent_avg: f64, older_avg: f64) -> (Trend, u32) {
    if older_avg <= 0.0 {
        return (Trend::Stable, 0);
    }

    if recent_avg > older_avg * IMPROVING_RATIO {
        let pct = (recent_avg - older_avg) / older_avg * 100.0;
        (Trend::Improving, pct.round() as u32)
    } else if recent_avg < older_avg * DECLINING_RATIO {
        let pct = (older_avg - recent_avg) / older_avg * 100.0;
        (Trend::Declining, pct.round() as u32)
    } else {
        (Trend::Stable, 0)
    }
}

/// Metric compared between sessions
pub fn session_metric(category: Category, exercise: &ExercisePerformance) -> f64 {
    if category.is_cardio() {
        exercise.distance.unwrap_or(0.0)
    } else {
        exercise.volume()
    }
}

struct History<'a> {
    first: &'a ExercisePerformance,
    sessions: Vec<(DateTime<Utc>, &'a ExercisePerformance)>,
}

/// Trends for exercises with enough history, most-logged first
pub fn exercise_trends(workouts: &[WorkoutRecord]) -> Vec<ExerciseTrend> {
    let mut histories: Vec<History> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for workout in super::chronological(workouts) {
        for exercise in &workout.exercises {
            let slot = *index.entry(exercise.exercise_id.as_str()).or_insert_with(|| {
                histories.push(History {
                    first: exercise,
                    sessions: Vec::new(),
                });
                histories.len() - 1
            });
            histories[slot].sessions.push((workout.created_at, exercise));
        }
    }

    let total = histories.len();
    let mut trends: Vec<ExerciseTrend> = histories.iter().filter_map(trend_for).collect();
    debug!(
        "Trends: {} of {} exercises have enough sessions",
        trends.len(),
        total
    );

    trends.sort_by(|a, b| b.sessions.cmp(&a.sessions));
    trends.truncate(MAX_TRENDS);
    trends
}

fn trend_for(history: &History) -> Option<ExerciseTrend> {
    let n = history.sessions.len();
    if n < MIN_SESSIONS {
        return None;
    }

    let recent = &history.sessions[n.saturating_sub(TREND_WINDOW)..];
    let older = &history.sessions[n.saturating_sub(2 * TREND_WINDOW)..n.saturating_sub(TREND_WINDOW)];
    if recent.is_empty() || older.is_empty() {
        return None;
    }

    let category = history.first.kind();
    let average = |slice: &[(DateTime<Utc>, &ExercisePerformance)]| {
        slice.iter().map(|(_, e)| session_metric(category, e)).sum::<f64>() / slice.len() as f64
    };
    let recent_avg = average(recent);
    let older_avg = average(older);
    let (trend, trend_value) = classify(recent_avg, older_avg);

    Some(ExerciseTrend {
        exercise_id: history.first.exercise_id.clone(),
        name: history.first.exercise_name.clone(),
        category: history.first.category.clone(),
        sessions: n,
        trend,
        trend_value,
        recent_avg,
        older_avg,
    })
}
