//! Consecutive-day logging streak

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::clock::Clock;
use crate::db::WorkoutRecord;

/// How far back the streak walk looks
pub const STREAK_LOOKBACK_DAYS: i64 = 30;

/// Current streak of consecutive logged days ending today.
///
/// Days before the first logged day are skipped without breaking the
/// streak, so a streak ending yesterday still counts when nothing has been
/// logged today. Once counting has started the first gap ends it.
pub fn current_streak(workouts: &[WorkoutRecord], clock: Clock) -> u32 {
    let logged = logged_dates(workouts, clock);
    let today = clock.today();

    let mut streak = 0;
    for offset in 0..STREAK_LOOKBACK_DAYS {
        let day = today - Duration::days(offset);
        if logged.contains(&day) {
            streak += 1;
        } else if streak > 0 {
            break;
        }
    }
    streak
}

/// Distinct calendar dates with at least one workout
pub fn logged_dates(workouts: &[WorkoutRecord], clock: Clock) -> HashSet<NaiveDate> {
    workouts.iter().map(|w| clock.date_of(w.created_at)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::*;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn on_days(days: &[i64]) -> Vec<WorkoutRecord> {
        days.iter().map(|d| create_workout(*d, None)).collect()
    }

    #[test]
    fn test_streak_empty() {
        assert_eq!(current_streak(&[], clock()), 0);
    }

    #[test]
    fn test_streak_including_today() {
        assert_eq!(current_streak(&on_days(&[0, 1, 2]), clock()), 3);
    }

    #[test]
    fn test_streak_tolerates_missing_today() {
        assert_eq!(current_streak(&on_days(&[1, 2, 3]), clock()), 3);
    }

    #[test]
    fn test_streak_starts_at_first_logged_day() {
        // Nothing for three days, then two consecutive days
        assert_eq!(current_streak(&on_days(&[3, 4, 6]), clock()), 2);
    }

    #[test]
    fn test_streak_breaks_on_gap() {
        assert_eq!(current_streak(&on_days(&[0, 1, 3, 4, 5]), clock()), 2);
    }

    #[test]
    fn test_streak_multiple_workouts_same_day() {
        assert_eq!(current_streak(&on_days(&[0, 0, 0, 1]), clock()), 2);
    }

    #[test]
    fn test_streak_capped_by_lookback() {
        let days: Vec<i64> = (0..45).collect();
        assert_eq!(current_streak(&on_days(&days), clock()), 30);
    }

    #[test]
    fn test_streak_outside_lookback_is_zero() {
        assert_eq!(current_streak(&on_days(&[31, 32]), clock()), 0);
    }

    #[test]
    fn test_streak_unsorted_input() {
        assert_eq!(current_streak(&on_days(&[2, 0, 1]), clock()), 3);
    }

    #[test]
    fn test_streak_uses_clock_offset() {
        // 22:00 UTC on the 19th is already the 20th at UTC+3
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap();
        let late = create_workout_at(Utc.with_ymd_and_hms(2025, 3, 19, 22, 0, 0).unwrap(), None);
        let workouts = vec![late];

        assert_eq!(current_streak(&workouts, Clock::utc(now)), 1);
        let moscow = Clock::new(now, FixedOffset::east_opt(3 * 3600).unwrap());
        assert_eq!(current_streak(&workouts, moscow), 1);
        assert_eq!(logged_dates(&workouts, moscow).len(), 1);
        assert!(logged_dates(&workouts, moscow).contains(&moscow.today()));
    }
}
