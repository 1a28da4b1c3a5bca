//! ironlog - Workout log with training analytics

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use ironlog::analytics::progress::{self, SessionMetrics};
use ironlog::analytics::Analytics;
use ironlog::config::{Config, DEFAULT_DB_PATH};
use ironlog::db::Database;
use ironlog::exercises::{self, get_all_exercises};
use ironlog::seed::{self, SeedOptions};
use ironlog::tui::App;
use ironlog::{entry, import};

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(author, version, about = "Workout log with training analytics")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "IRONLOG_DB", default_value = DEFAULT_DB_PATH, global = true)]
    db: String,

    /// UTC offset in hours for calendar days (default: system local time)
    #[arg(long, env = "IRONLOG_UTC_OFFSET", allow_hyphen_values = true, global = true)]
    utc_offset: Option<i32>,

    /// Target workouts per week
    #[arg(long, env = "IRONLOG_WEEKLY_GOAL", default_value = "4", global = true)]
    weekly_goal: u32,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Log a workout
    Log {
        /// Workout name (e.g., "Push day")
        name: String,

        /// Exercise entry, repeatable: "bench_press:135x10,155x8" or "running:3.1,1800"
        #[arg(short, long = "exercise", required = true)]
        exercises: Vec<String>,

        /// Duration in minutes
        #[arg(short, long)]
        duration: Option<u32>,

        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List recent workouts
    List {
        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show one workout with all sets
    Show { id: String },

    /// Delete a workout
    Delete { id: String },

    /// Show training statistics
    Stats,

    /// Show per-exercise performance trends
    Trends,

    /// Show category, weekday and monthly breakdowns
    Breakdown,

    /// Show progress series, optionally for one exercise
    Progress {
        /// Exercise id or name
        exercise: Option<String>,
    },

    /// List the exercise catalog
    Exercises,

    /// Import a JSON export of workouts
    Import { file: PathBuf },

    /// Fill the database with synthetic workouts
    Seed {
        /// Days back from today to fill
        #[arg(long, default_value = "60")]
        days: u32,

        /// Maximum number of workouts
        #[arg(long, default_value = "100")]
        count: usize,

        /// RNG seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::new(cli.db, cli.utc_offset, cli.weekly_goal)?;
    let db = Database::open(&config.db_path)?;

    match cli.command {
        Some(Commands::Log { name, exercises, duration, notes }) => {
            let clock = config.clock();
            let workout = entry::new_workout(&name, duration, notes, &exercises, clock.now())?;
            db.add_workout(&workout)?;
            println!(
                "Logged: {} - {} exercises, {:.0} lbs volume (id: {})",
                workout.name,
                workout.exercises.len(),
                workout.volume(),
                workout.id
            );
        }

        Some(Commands::List { limit }) => {
            let analytics = Analytics::new(db.get_recent_workouts(limit)?, config.clock());
            let recent = analytics.recent(limit);
            if recent.is_empty() {
                println!("No workouts logged yet. Try `ironlog log`.");
                return Ok(());
            }
            println!("Recent workouts:");
            println!("{:-<80}", "");
            for w in recent {
                println!(
                    "{:12} | {:20} | {:>7} | {:2} exercises | {} | {}",
                    w.when,
                    w.name,
                    w.duration_minutes.map(|m| format!("{m} min")).unwrap_or_else(|| "-".into()),
                    w.exercise_count,
                    w.categories.join(", "),
                    w.id
                );
            }
        }

        Some(Commands::Show { id }) => {
            let Some(workout) = db.get_workout(&id)? else {
                bail!("No workout with id {id}");
            };
            let clock = config.clock();
            println!("{} ({})", workout.name, clock.local(workout.created_at).format("%Y-%m-%d %H:%M"));
            if let Some(minutes) = workout.duration_minutes {
                println!("Duration: {minutes} min");
            }
            if let Some(notes) = &workout.notes {
                println!("Notes: {notes}");
            }
            println!("{:-<60}", "");
            for ex in &workout.exercises {
                let kind = ex.kind();
                print!("{} {:20}", kind.emoji(), ex.exercise_name);
                if kind.is_cardio() {
                    println!(
                        " {:.1} mi in {} min",
                        ex.distance.unwrap_or(0.0),
                        ex.duration_secs.unwrap_or(0) / 60
                    );
                } else {
                    let weights = ex.weight.as_deref().unwrap_or_default();
                    let sets: Vec<String> = ex
                        .reps
                        .as_deref()
                        .unwrap_or_default()
                        .iter()
                        .enumerate()
                        .map(|(i, r)| format!("{}x{}", weights.get(i).copied().unwrap_or(0.0), r))
                        .collect();
                    println!(" {} ({:.0} lbs)", sets.join(", "), ex.volume());
                }
            }
        }

        Some(Commands::Delete { id }) => {
            if db.delete_workout(&id)? {
                println!("Deleted {id}");
            } else {
                bail!("No workout with id {id}");
            }
        }

        Some(Commands::Stats) => {
            let analytics = Analytics::new(db.get_workouts()?, config.clock());
            let summary = analytics.summary();
            let stats = analytics.dashboard(config.weekly_goal);

            println!("Training Statistics");
            println!("{:-<40}", "");
            println!("Total workouts:   {}", stats.total_workouts);
            println!("Total time:       {} hours", stats.total_hours);
            println!("Avg duration:     {} min", stats.avg_duration_minutes);
            println!(
                "This week:        {} workouts, {} min, {:.0} lbs",
                summary.week.workout_count, summary.week.total_minutes, summary.week.total_volume
            );
            println!(
                "Last 30 days:     {} workouts, {} hours, {:.0} lbs",
                summary.month.workout_count,
                summary.month.hours(),
                summary.month.total_volume
            );
            println!(
                "Current streak:   {} days {} {}",
                stats.current_streak,
                stats.streak_badge.emoji(),
                stats.streak_badge.label()
            );
            println!(
                "Weekly goal:      {}/{} ({:.0}%)",
                stats.this_week, stats.weekly_goal, stats.weekly_goal_progress
            );

            let top = analytics.top_muscle_groups();
            if !top.is_empty() {
                println!("\nTop muscle groups:");
                for (i, group) in top.iter().enumerate() {
                    println!("  #{} {} ({} exercises)", i + 1, group.name, group.count);
                }
            }

            let earned = analytics.achievements().earned();
            if !earned.is_empty() {
                println!("\nAchievements:");
                for a in earned {
                    println!("  {} {} - {}", a.emoji(), a.label(), a.description());
                }
            }
        }

        Some(Commands::Trends) => {
            let analytics = Analytics::new(db.get_workouts()?, config.clock());
            let trends = analytics.trends();
            if trends.is_empty() {
                println!("Complete more workouts to see exercise trends");
            }
            for trend in trends {
                println!("{}", trend.format());
            }
        }

        Some(Commands::Breakdown) => {
            let analytics = Analytics::new(db.get_workouts()?, config.clock());
            let breakdown = analytics.breakdown();

            println!("Exercise categories:");
            for share in &breakdown.categories {
                println!("  {:12} {:4} ({}%)", share.category, share.count, share.percentage);
            }
            println!("\nWorkouts by day:");
            for day in &breakdown.weekdays {
                println!("  {} {:3} {}", day.short_name(), day.count, "#".repeat(day.count));
            }
            println!("\nAverage duration by month:");
            for month in &breakdown.monthly {
                println!("  {} {} min", month.label(), month.average_minutes);
            }
        }

        Some(Commands::Progress { exercise }) => {
            let workouts = db.get_workouts()?;
            let clock = config.clock();

            match exercise {
                Some(key) => {
                    let Some(ex) = exercises::lookup(&key) else {
                        bail!("Unknown exercise: {key}");
                    };
                    println!("{} - last sessions", ex.name);
                    for point in progress::exercise_progress(&workouts, ex.id, clock) {
                        let metrics = match point.metrics {
                            SessionMetrics::Cardio { distance, minutes } => {
                                format!("{distance:.1} mi, {minutes} min")
                            }
                            SessionMetrics::Strength { max_weight, total_volume } => {
                                format!("max {max_weight} lbs, volume {total_volume:.0}")
                            }
                        };
                        println!("  {} {:20} {}", progress::short_date(point.date), point.workout, metrics);
                    }
                }
                None => {
                    println!("Workouts per week:");
                    for week in progress::weekly_frequency(&workouts, clock) {
                        println!("  {:7} {}", progress::short_date(week.week_start), "#".repeat(week.workouts));
                    }
                    println!("\nDuration trend:");
                    for point in progress::duration_trend(&workouts, clock) {
                        println!("  {:7} {:3} min  {}", progress::short_date(point.date), point.minutes, point.workout);
                    }
                    println!("\nVolume (weight x reps):");
                    for point in progress::volume_progress(&workouts, clock) {
                        println!("  {:7} {:8.0}  {}", progress::short_date(point.date), point.volume, point.workout);
                    }
                }
            }
        }

        Some(Commands::Exercises) => {
            for ex in get_all_exercises() {
                println!(
                    "{} {:18} {:20} {}",
                    ex.category.emoji(),
                    ex.id,
                    ex.name,
                    ex.muscle_groups.join(", ")
                );
            }
        }

        Some(Commands::Import { file }) => {
            let report = import::import_file(&db, &file)?;
            println!("Imported {} workouts ({} already present)", report.imported, report.skipped);
        }

        Some(Commands::Seed { days, count, seed }) => {
            let options = SeedOptions { days, max_workouts: count, seed };
            let workouts = seed::generate(options, config.clock());
            let report = import::import_workouts(&db, workouts)?;
            println!("Seeded {} workouts into {}", report.imported, config.db_path);
        }

        Some(Commands::Tui) | None => {
            let mut app = App::new(db, config)?;
            app.run()?;
        }
    }

    Ok(())
}
