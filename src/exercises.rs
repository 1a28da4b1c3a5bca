//! Exercise definitions - built-in exercise catalog

use serde::{Deserialize, Serialize};

/// Exercise category as used by the analytics.
///
/// Categories arrive as free-form strings from imported data, so anything
/// unrecognised maps to `Other` instead of failing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Strength,
    Cardio,
    Flexibility,
    Other,
}

impl Category {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "strength" => Category::Strength,
            "cardio" => Category::Cardio,
            "flexibility" => Category::Flexibility,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Strength => "strength",
            Category::Cardio => "cardio",
            Category::Flexibility => "flexibility",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Strength => "Strength",
            Category::Cardio => "Cardio",
            Category::Flexibility => "Flexibility",
            Category::Other => "Other",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Strength => "🏋️",
            Category::Cardio => "🏃",
            Category::Flexibility => "🧘",
            Category::Other => "•",
        }
    }

    /// Cardio is tracked by distance/time, everything else by sets
    pub fn is_cardio(&self) -> bool {
        matches!(self, Category::Cardio)
    }
}

#[derive(Debug, Clone)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub muscle_groups: &'static [&'static str],
    pub instructions: Option<&'static str>,
}

pub const EXERCISES: &[Exercise] = &[
    // Strength
    Exercise {
        id: "bench_press",
        name: "Bench Press",
        category: Category::Strength,
        muscle_groups: &["chest", "triceps", "shoulders"],
        instructions: Some("Lower the bar to mid-chest, press up until the elbows lock"),
    },
    Exercise {
        id: "squat",
        name: "Back Squat",
        category: Category::Strength,
        muscle_groups: &["quadriceps", "glutes", "hamstrings"],
        instructions: Some("Bar on upper back, sit down between the heels, drive up through the midfoot"),
    },
    Exercise {
        id: "deadlift",
        name: "Deadlift",
        category: Category::Strength,
        muscle_groups: &["back", "glutes", "hamstrings"],
        instructions: Some("Hinge at the hips, flat back, pull the bar along the legs"),
    },
    Exercise {
        id: "overhead_press",
        name: "Overhead Press",
        category: Category::Strength,
        muscle_groups: &["shoulders", "triceps"],
        instructions: None,
    },
    Exercise {
        id: "barbell_row",
        name: "Barbell Row",
        category: Category::Strength,
        muscle_groups: &["back", "biceps"],
        instructions: None,
    },
    Exercise {
        id: "pull_up",
        name: "Pull-up",
        category: Category::Strength,
        muscle_groups: &["back", "biceps"],
        instructions: Some("Dead hang, pull until the chin clears the bar"),
    },
    Exercise {
        id: "push_up",
        name: "Push-up",
        category: Category::Strength,
        muscle_groups: &["chest", "triceps", "core"],
        instructions: None,
    },
    Exercise {
        id: "bicep_curl",
        name: "Bicep Curl",
        category: Category::Strength,
        muscle_groups: &["biceps"],
        instructions: None,
    },
    Exercise {
        id: "lunge",
        name: "Walking Lunge",
        category: Category::Strength,
        muscle_groups: &["quadriceps", "glutes"],
        instructions: None,
    },
    Exercise {
        id: "plank",
        name: "Plank",
        category: Category::Strength,
        muscle_groups: &["core"],
        instructions: Some("Forearms under shoulders, body in a straight line"),
    },
    // Cardio
    Exercise {
        id: "running",
        name: "Running",
        category: Category::Cardio,
        muscle_groups: &["legs"],
        instructions: None,
    },
    Exercise {
        id: "cycling",
        name: "Cycling",
        category: Category::Cardio,
        muscle_groups: &["legs"],
        instructions: None,
    },
    Exercise {
        id: "rowing",
        name: "Rowing Machine",
        category: Category::Cardio,
        muscle_groups: &["back", "legs"],
        instructions: None,
    },
    Exercise {
        id: "jump_rope",
        name: "Jump Rope",
        category: Category::Cardio,
        muscle_groups: &[],
        instructions: None,
    },
    // Flexibility
    Exercise {
        id: "yoga_flow",
        name: "Yoga Flow",
        category: Category::Flexibility,
        muscle_groups: &["core", "hamstrings"],
        instructions: None,
    },
    Exercise {
        id: "hamstring_stretch",
        name: "Hamstring Stretch",
        category: Category::Flexibility,
        muscle_groups: &["hamstrings"],
        instructions: Some("Hold each side for 30 seconds"),
    },
];

pub fn get_all_exercises() -> &'static [Exercise] {
    EXERCISES
}

pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}

/// Find exercise by name, ignoring case (for matching imported records)
pub fn find_exercise_by_name(name: &str) -> Option<&'static Exercise> {
    let name = name.trim();
    EXERCISES.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

/// Lookup by id first, then by display name
pub fn lookup(key: &str) -> Option<&'static Exercise> {
    find_exercise(key).or_else(|| find_exercise_by_name(key))
}
