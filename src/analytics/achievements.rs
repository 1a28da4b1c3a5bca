//! Achievement badges

use serde::Serialize;

use super::{streak, summary::WindowSummary, summary::WEEK_DAYS};
use crate::clock::Clock;
use crate::db::WorkoutRecord;

/// All-time workouts for "Consistent"
pub const CONSISTENT_MIN_WORKOUTS: usize = 10;
/// Streak days for "On Fire"
pub const ON_FIRE_MIN_STREAK: u32 = 7;
/// Volume in the last 7 days for "Strong"
pub const STRONG_WEEK_MIN_VOLUME: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Achievement {
    Consistent,
    OnFire,
    StrongWeek,
}

impl Achievement {
    pub fn emoji(&self) -> &'static str {
        match self {
            Achievement::Consistent => "🏆",
            Achievement::OnFire => "🔥",
            Achievement::StrongWeek => "💪",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Achievement::Consistent => "Consistent",
            Achievement::OnFire => "On Fire",
            Achievement::StrongWeek => "Strong",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Achievement::Consistent => format!("{}+ workouts logged", CONSISTENT_MIN_WORKOUTS),
            Achievement::OnFire => format!("{}+ day streak", ON_FIRE_MIN_STREAK),
            Achievement::StrongWeek => format!("{}+ lbs this week", STRONG_WEEK_MIN_VOLUME),
        }
    }
}

/// Independent threshold flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Achievements {
    pub consistent: bool,
    pub on_fire: bool,
    pub strong_week: bool,
}

impl Achievements {
    pub fn evaluate(total_workouts: usize, current_streak: u32, weekly_volume: f64) -> Self {
        Self {
            consistent: total_workouts >= CONSISTENT_MIN_WORKOUTS,
            on_fire: current_streak >= ON_FIRE_MIN_STREAK,
            strong_week: weekly_volume >= STRONG_WEEK_MIN_VOLUME,
        }
    }

    pub fn compute(workouts: &[WorkoutRecord], clock: Clock) -> Self {
        let week = WindowSummary::for_window(workouts, clock, WEEK_DAYS);
        Self::evaluate(
            workouts.len(),
            streak::current_streak(workouts, clock),
            week.total_volume,
        )
    }

    pub fn earned(&self) -> Vec<Achievement> {
        [
            (self.consistent, Achievement::Consistent),
            (self.on_fire, Achievement::OnFire),
            (self.strong_week, Achievement::StrongWeek),
        ]
        .into_iter()
        .filter_map(|(earned, a)| earned.then_some(a))
        .collect()
    }
}
