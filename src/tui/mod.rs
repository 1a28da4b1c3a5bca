//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::analytics::{Analytics, DashboardStats, ExerciseTrend, Trend};
use crate::config::Config;
use crate::db::Database;
use crate::exercises::Category;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const RECENT_ROWS: usize = 8;

/// App state for TUI
pub struct App {
    db: Database,
    config: Config,
    analytics: Analytics,
    should_quit: bool,
}

impl App {
    pub fn new(db: Database, config: Config) -> Result<Self> {
        let analytics = Analytics::new(db.get_workouts()?, config.clock());
        Ok(Self {
            db,
            config,
            analytics,
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        let result = self.event_loop(&mut terminal);
        finish(result, restore_terminal)
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.analytics = Analytics::new(self.db.get_workouts()?, self.config.clock());
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(10),
                Constraint::Length(RECENT_ROWS as u16 + 3),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new("ironlog - Training Dashboard")
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        self.render_cards(frame, chunks[1]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[2]);
        self.render_highlights(frame, middle[0]);
        self.render_trends(frame, middle[1]);

        self.render_recent(frame, chunks[3]);

        // Footer
        let footer = Paragraph::new("q: quit | r: refresh")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[4]);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect) {
        let summary = self.analytics.summary();
        let stats: DashboardStats = self.analytics.dashboard(self.config.weekly_goal);

        let cards = [
            (
                "This Week",
                summary.week.workout_count.to_string(),
                format!("{} minutes", summary.week.total_minutes),
                Color::Blue,
            ),
            (
                "This Month",
                summary.month.workout_count.to_string(),
                format!("{} hours", summary.month.hours()),
                Color::Green,
            ),
            (
                "Current Streak",
                stats.current_streak.to_string(),
                format!(
                    "{} {} {}",
                    if stats.current_streak == 1 { "day" } else { "days" },
                    stats.streak_badge.emoji(),
                    stats.streak_badge.label()
                ),
                Color::LightRed,
            ),
            (
                "Weekly Volume",
                format!("{:.0}", summary.week.total_volume),
                "lbs lifted".to_string(),
                Color::Magenta,
            ),
        ];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for ((title, value, subtitle, color), column) in cards.into_iter().zip(columns.iter()) {
            let text = vec![
                Line::from(value).style(Style::default().fg(color).bold()),
                Line::from(subtitle).style(Style::default().fg(Color::DarkGray)),
            ];
            let card = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(card, *column);
        }
    }

    fn render_highlights(&self, frame: &mut Frame, area: Rect) {
        let mut items: Vec<ListItem> = vec![ListItem::new(Line::from("Top muscle groups").bold())];

        let top = self.analytics.top_muscle_groups();
        if top.is_empty() {
            items.push(ListItem::new("  no exercises logged yet"));
        }
        for (i, group) in top.iter().enumerate() {
            items.push(ListItem::new(format!(
                "  #{} {:14} {} exercises",
                i + 1,
                group.name,
                group.count
            )));
        }

        items.push(ListItem::new(""));
        items.push(ListItem::new(Line::from("Achievements").bold()));
        let earned = self.analytics.achievements().earned();
        if earned.is_empty() {
            items.push(ListItem::new("  complete workouts to unlock achievements"));
        }
        for achievement in earned {
            items.push(ListItem::new(format!(
                "  {} {} - {}",
                achievement.emoji(),
                achievement.label(),
                achievement.description()
            )));
        }

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Highlights"));
        frame.render_widget(list, area);
    }

    fn render_trends(&self, frame: &mut Frame, area: Rect) {
        let trends = self.analytics.trends();
        let rows: Vec<Row> = trends.iter().map(trend_row).collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(20),
                Constraint::Length(9),
                Constraint::Length(14),
            ],
        )
        .header(Row::new(vec!["Category", "Exercise", "Sessions", "Trend"]).style(Style::default().bold()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Exercise Performance Trends"),
        );

        frame.render_widget(table, area);
    }

    fn render_recent(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .analytics
            .recent(RECENT_ROWS)
            .into_iter()
            .map(|w| {
                Row::new(vec![
                    Cell::from(w.when),
                    Cell::from(w.name),
                    Cell::from(
                        w.duration_minutes
                            .map(|m| format!("{m} min"))
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    Cell::from(format!("{} exercises", w.exercise_count)),
                    Cell::from(w.categories.join(", ")),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(20),
                Constraint::Length(8),
                Constraint::Length(13),
                Constraint::Min(20),
            ],
        )
        .header(Row::new(vec!["When", "Workout", "Duration", "Exercises", "Categories"]).style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title("Recent Workouts"));

        frame.render_widget(table, area);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('r') => self.reload()?,
                        _ => {}
                    }
                }
        Ok(())
    }
}

fn category_color(category: &str) -> Color {
    match Category::parse(category) {
        Category::Strength => Color::Blue,
        Category::Cardio => Color::Red,
        Category::Flexibility => Color::Green,
        Category::Other => Color::Gray,
    }
}

fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Improving => Color::Green,
        Trend::Declining => Color::Red,
        Trend::Stable => Color::Gray,
    }
}

fn trend_row(trend: &ExerciseTrend) -> Row<'static> {
    let change = if trend.trend_value > 0 {
        format!("{} {}%", trend.trend.arrow(), trend.trend_value)
    } else {
        trend.trend.arrow().to_string()
    };
    Row::new(vec![
        Cell::from(trend.category.clone()).style(Style::default().fg(category_color(&trend.category))),
        Cell::from(trend.name.clone()),
        Cell::from(trend.sessions.to_string()),
        Cell::from(change).style(Style::default().fg(trend_color(trend.trend))),
    ])
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

/// Restore the terminal after the loop ends, also when it failed.
/// A loop error is reported in preference to a restore error.
fn finish<T>(result: Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_terminal_restored_after_loop_error() {
        let restored = Cell::new(false);
        let result: Result<()> = finish(Err(anyhow::anyhow!("database is locked")), || {
            restored.set(true);
            Ok(())
        });
        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "database is locked");
    }

    #[test]
    fn test_restore_error_reported_after_clean_exit() {
        let result = finish(Ok(()), || Err(anyhow::anyhow!("tty gone")));
        assert!(result.is_err());
        assert_eq!(finish(Ok(5), || Ok(())).unwrap(), 5);
    }

    #[test]
    fn test_unknown_category_color_falls_back() {
        assert_eq!(category_color("strength"), Color::Blue);
        assert_eq!(category_color("pilates"), Color::Gray);
    }

    #[test]
    fn test_trend_colors() {
        assert_eq!(trend_color(Trend::Improving), Color::Green);
        assert_eq!(trend_color(Trend::Declining), Color::Red);
        assert_eq!(trend_color(Trend::Stable), Color::Gray);
    }
}
