//! Muscle group frequency ranking

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::db::WorkoutRecord;

/// Number of groups shown on the dashboard
pub const TOP_MUSCLE_GROUPS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MuscleGroupCount {
    pub name: String,
    pub count: usize,
}

/// Count every (exercise, muscle group) pair, most frequent first.
/// A tag repeated within one exercise counts once.
/// Equal counts keep the order in which groups were first seen.
pub fn muscle_group_counts(workouts: &[WorkoutRecord]) -> Vec<MuscleGroupCount> {
    let mut counts: Vec<MuscleGroupCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for exercise in workouts.iter().flat_map(|w| &w.exercises) {
        let mut seen: HashSet<&str> = HashSet::new();
        for group in &exercise.muscle_groups {
            if !seen.insert(group.as_str()) {
                continue;
            }
            match index.get(group.as_str()) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(group.as_str(), counts.len());
                    counts.push(MuscleGroupCount {
                        name: group.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn top_muscle_groups(workouts: &[WorkoutRecord], limit: usize) -> Vec<MuscleGroupCount> {
    let mut counts = muscle_group_counts(workouts);
    counts.truncate(limit);
    counts
}
