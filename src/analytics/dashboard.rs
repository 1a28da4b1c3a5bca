//! Dashboard cards and recent activity list

use chrono::{DateTime, Months, Utc};
use serde::Serialize;

use super::streak;
use super::summary::{WEEK_DAYS, WindowSummary};
use crate::clock::Clock;
use crate::db::WorkoutRecord;

/// Workouts per week the goal ring is measured against
pub const DEFAULT_WEEKLY_GOAL: u32 = 4;
/// Average session length that fills the duration ring
pub const TARGET_AVG_MINUTES: f64 = 60.0;
/// Streak days for the "Hot Streak" badge
pub const HOT_STREAK_DAYS: u32 = 7;
/// Streak days for the "Building" badge
pub const BUILDING_STREAK_DAYS: u32 = 3;

/// Badge shown on the streak card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreakBadge {
    HotStreak,
    Building,
    Growing,
}

impl StreakBadge {
    pub fn from_streak(days: u32) -> Self {
        if days >= HOT_STREAK_DAYS {
            StreakBadge::HotStreak
        } else if days >= BUILDING_STREAK_DAYS {
            StreakBadge::Building
        } else {
            StreakBadge::Growing
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            StreakBadge::HotStreak => "🔥",
            StreakBadge::Building => "💪",
            StreakBadge::Growing => "🌱",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreakBadge::HotStreak => "Hot Streak!",
            StreakBadge::Building => "Building!",
            StreakBadge::Growing => "Growing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_workouts: usize,
    pub total_minutes: u64,
    /// One decimal place
    pub total_hours: f64,
    pub avg_duration_minutes: u32,
    /// Last 7 days
    pub this_week: usize,
    /// Since the same day last calendar month
    pub this_month: usize,
    pub current_streak: u32,
    pub streak_badge: StreakBadge,
    pub weekly_goal: u32,
    /// Percentages, capped at 100
    pub weekly_goal_progress: f64,
    pub consistency: f64,
    pub duration_progress: f64,
}

impl DashboardStats {
    pub fn compute(workouts: &[WorkoutRecord], clock: Clock, weekly_goal: u32) -> Self {
        let total_workouts = workouts.len();
        let total_minutes: u64 = workouts.iter().map(|w| u64::from(w.minutes())).sum();
        let avg = if total_workouts > 0 {
            total_minutes as f64 / total_workouts as f64
        } else {
            0.0
        };

        let this_week = WindowSummary::for_window(workouts, clock, WEEK_DAYS).workout_count;
        let month_start = month_ago(clock);
        let this_month = workouts.iter().filter(|w| w.created_at >= month_start).count();
        let current_streak = streak::current_streak(workouts, clock);

        Self {
            total_workouts,
            total_minutes,
            total_hours: (total_minutes as f64 / 60.0 * 10.0).round() / 10.0,
            avg_duration_minutes: avg.round() as u32,
            this_week,
            this_month,
            current_streak,
            streak_badge: StreakBadge::from_streak(current_streak),
            weekly_goal,
            weekly_goal_progress: percent(this_week as f64, f64::from(weekly_goal)),
            consistency: percent(this_week as f64, WEEK_DAYS as f64),
            duration_progress: percent(avg, TARGET_AVG_MINUTES),
        }
    }
}

/// `value / target` as a percentage in 0..=100; 0 for a zero target
fn percent(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (value / target * 100.0).min(100.0)
}

fn month_ago(clock: Clock) -> DateTime<Utc> {
    clock
        .local(clock.now())
        .checked_sub_months(Months::new(1))
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|| clock.days_ago(30))
}

/// Row of the recent workouts list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentWorkout {
    pub id: String,
    pub name: String,
    pub when: String,
    pub duration_minutes: Option<u32>,
    pub exercise_count: usize,
    /// Distinct categories in logging order
    pub categories: Vec<String>,
}

/// Newest `limit` workouts regardless of input order
pub fn recent_workouts(workouts: &[WorkoutRecord], clock: Clock, limit: usize) -> Vec<RecentWorkout> {
    super::chronological(workouts)
        .into_iter()
        .rev()
        .take(limit)
        .map(|w| {
            let mut categories: Vec<String> = Vec::new();
            for ex in &w.exercises {
                if !categories.contains(&ex.category) {
                    categories.push(ex.category.clone());
                }
            }
            RecentWorkout {
                id: w.id.clone(),
                name: w.name.clone(),
                when: relative_day(w.created_at, clock),
                duration_minutes: w.duration_minutes,
                exercise_count: w.exercises.len(),
                categories,
            }
        })
        .collect()
}

/// "Today", "Yesterday", "N days ago" within a week, otherwise the date
pub fn relative_day(at: DateTime<Utc>, clock: Clock) -> String {
    let date = clock.date_of(at);
    match (clock.today() - date).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n @ 2..=6 => format!("{n} days ago"),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::*;

    #[test]
    fn test_dashboard_empty() {
        let stats = DashboardStats::compute(&[], clock(), DEFAULT_WEEKLY_GOAL);
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.avg_duration_minutes, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.weekly_goal_progress, 0.0);
        assert_eq!(stats.duration_progress, 0.0);
        assert_eq!(stats.current_streak, 0);
    }

    #[test]
    fn test_dashboard_totals() {
        let workouts = vec![
            create_workout(0, Some(45)),
            create_workout(1, Some(50)),
            create_workout(10, None),
            create_workout(40, Some(30)),
        ];
        let stats = DashboardStats::compute(&workouts, clock(), DEFAULT_WEEKLY_GOAL);

        assert_eq!(stats.total_workouts, 4);
        assert_eq!(stats.total_minutes, 125);
        assert_eq!(stats.total_hours, 2.1);
        assert_eq!(stats.avg_duration_minutes, 31);
        assert_eq!(stats.this_week, 2);
        assert_eq!(stats.this_month, 3);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.weekly_goal_progress, 50.0);
        assert_eq!(stats.consistency, 2.0 / 7.0 * 100.0);
    }

    #[test]
    fn test_progress_capped() {
        let workouts: Vec<_> = (0..6).map(|d| create_workout(d, Some(90))).collect();
        let stats = DashboardStats::compute(&workouts, clock(), DEFAULT_WEEKLY_GOAL);
        assert_eq!(stats.weekly_goal_progress, 100.0);
        assert_eq!(stats.duration_progress, 100.0);
    }

    #[test]
    fn test_streak_badge_tiers() {
        assert_eq!(StreakBadge::from_streak(0), StreakBadge::Growing);
        assert_eq!(StreakBadge::from_streak(2), StreakBadge::Growing);
        assert_eq!(StreakBadge::from_streak(3), StreakBadge::Building);
        assert_eq!(StreakBadge::from_streak(6), StreakBadge::Building);
        assert_eq!(StreakBadge::from_streak(7), StreakBadge::HotStreak);
        assert_eq!(StreakBadge::HotStreak.label(), "Hot Streak!");

        let workouts: Vec<_> = (0..3).map(|d| create_workout(d, Some(30))).collect();
        let stats = DashboardStats::compute(&workouts, clock(), DEFAULT_WEEKLY_GOAL);
        assert_eq!(stats.streak_badge, StreakBadge::Building);
    }

    #[test]
    fn test_zero_goal_guarded() {
        let workouts = vec![create_workout(0, Some(30))];
        let stats = DashboardStats::compute(&workouts, clock(), 0);
        assert_eq!(stats.weekly_goal_progress, 0.0);
    }

    #[test]
    fn test_relative_day() {
        let c = clock();
        assert_eq!(relative_day(now(), c), "Today");
        assert_eq!(relative_day(c.days_ago(1), c), "Yesterday");
        assert_eq!(relative_day(c.days_ago(4), c), "4 days ago");
        assert_eq!(relative_day(c.days_ago(7), c), "2025-03-13");
    }

    #[test]
    fn test_recent_workouts_newest_first() {
        let workouts = vec![
            create_workout(3, Some(30)),
            with(
                create_workout(0, Some(45)),
                vec![
                    strength("bench_press", &["chest"], &[135.0], &[8]),
                    cardio("running", Some(1.0), None),
                    strength("squat", &["legs"], &[185.0], &[5]),
                ],
            ),
            create_workout(1, None),
        ];

        let recent = recent_workouts(&workouts, clock(), 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].when, "Today");
        assert_eq!(recent[0].exercise_count, 3);
        assert_eq!(recent[0].categories, vec!["strength", "cardio"]);
        assert_eq!(recent[1].when, "Yesterday");
    }
}
