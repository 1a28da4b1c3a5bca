//! Chart data: category split, weekday distribution, monthly duration

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::clock::Clock;
use crate::db::WorkoutRecord;

/// Months kept in the duration chart
pub const MONTHLY_DURATION_MONTHS: usize = 6;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Rounded individually, so shares may sum to 100 ± 1
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    pub weekday: Weekday,
    pub count: usize,
}

impl WeekdayCount {
    pub fn name(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyDuration {
    pub year: i32,
    pub month: u32,
    pub average_minutes: u32,
    pub workouts: usize,
}

impl MonthlyDuration {
    /// e.g. "Mar 2025"
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_default()
    }
}

/// All three chart projections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub categories: Vec<CategoryShare>,
    pub weekdays: [WeekdayCount; 7],
    pub monthly: Vec<MonthlyDuration>,
}

impl Breakdown {
    pub fn compute(workouts: &[WorkoutRecord], clock: Clock) -> Self {
        Self {
            categories: category_distribution(workouts),
            weekdays: weekday_distribution(workouts, clock),
            monthly: monthly_average_duration(workouts, clock),
        }
    }
}

/// Exercise count per raw category, in first-seen order
pub fn category_distribution(workouts: &[WorkoutRecord]) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for exercise in workouts.iter().flat_map(|w| &w.exercises) {
        match index.get(exercise.category.as_str()) {
            Some(&i) => shares[i].count += 1,
            None => {
                index.insert(exercise.category.as_str(), shares.len());
                shares.push(CategoryShare {
                    category: exercise.category.clone(),
                    count: 1,
                    percentage: 0,
                });
            }
        }
    }

    let total: usize = shares.iter().map(|s| s.count).sum();
    if total == 0 {
        return Vec::new();
    }
    for share in &mut shares {
        share.percentage = (share.count as f64 / total as f64 * 100.0).round() as u32;
    }
    shares
}

/// Workouts per weekday, Monday first, zero-filled
pub fn weekday_distribution(workouts: &[WorkoutRecord], clock: Clock) -> [WeekdayCount; 7] {
    let mut days = WEEK.map(|weekday| WeekdayCount { weekday, count: 0 });
    for workout in workouts {
        let weekday = clock.local(workout.created_at).weekday();
        days[weekday.num_days_from_monday() as usize].count += 1;
    }
    days
}

/// Average logged duration per calendar month, oldest first, last six months.
/// Workouts without a duration are skipped.
pub fn monthly_average_duration(workouts: &[WorkoutRecord], clock: Clock) -> Vec<MonthlyDuration> {
    let mut months: BTreeMap<(i32, u32), (u64, usize)> = BTreeMap::new();

    for workout in workouts {
        let Some(minutes) = workout.duration_minutes else {
            continue;
        };
        let local = clock.local(workout.created_at);
        let entry = months.entry((local.year(), local.month())).or_default();
        entry.0 += u64::from(minutes);
        entry.1 += 1;
    }

    let skip = months.len().saturating_sub(MONTHLY_DURATION_MONTHS);
    months
        .into_iter()
        .skip(skip)
        .map(|((year, month), (total, count))| MonthlyDuration {
            year,
            month,
            average_minutes: (total as f64 / count as f64).round() as u32,
            workouts: count,
        })
        .collect()
}
