//! Runtime configuration

use anyhow::{Result, bail};
use chrono::FixedOffset;

use crate::analytics::dashboard::DEFAULT_WEEKLY_GOAL;
use crate::clock::Clock;

pub const DEFAULT_DB_PATH: &str = "ironlog.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Offset for calendar days; `None` = system local time
    pub utc_offset: Option<FixedOffset>,
    pub weekly_goal: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            utc_offset: None,
            weekly_goal: DEFAULT_WEEKLY_GOAL,
        }
    }
}

impl Config {
    pub fn new(db_path: String, utc_offset_hours: Option<i32>, weekly_goal: u32) -> Result<Self> {
        let utc_offset = utc_offset_hours.map(parse_offset).transpose()?;
        if weekly_goal == 0 {
            bail!("Weekly goal must be at least 1 workout");
        }
        Ok(Self {
            db_path,
            utc_offset,
            weekly_goal,
        })
    }

    /// Reference clock for this run
    pub fn clock(&self) -> Clock {
        let system = Clock::system();
        match self.utc_offset {
            Some(offset) => Clock::new(system.now(), offset),
            None => system,
        }
    }
}

fn parse_offset(hours: i32) -> Result<FixedOffset> {
    if !(-12..=14).contains(&hours) {
        bail!("UTC offset must be between -12 and +14 hours, got {hours}");
    }
    match FixedOffset::east_opt(hours * 3600) {
        Some(offset) => Ok(offset),
        None => bail!("Invalid UTC offset {hours}"),
    }
}
