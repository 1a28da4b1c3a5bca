//! Reference clock for time-dependent analytics
//!
//! Every window, streak and calendar computation takes a `Clock` instead of
//! reading the system time, so results are reproducible.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    now: DateTime<Utc>,
    /// Offset used to turn instants into calendar dates
    offset: FixedOffset,
}

impl Clock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Calendar days in UTC
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    /// Current system time and local offset
    pub fn system() -> Self {
        let now = Local::now();
        Self::new(now.with_timezone(&Utc), *now.offset())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn local(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.offset)
    }

    /// Calendar date of an instant
    pub fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        self.local(at).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(self.now)
    }

    /// `now - days × 24h`
    pub fn days_ago(&self, days: i64) -> DateTime<Utc> {
        self.now - Duration::days(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_of_respects_offset() {
        let at = Utc.with_ymd_and_hms(2025, 3, 20, 22, 30, 0).unwrap();
        let utc = Clock::utc(at);
        let moscow = Clock::new(at, FixedOffset::east_opt(3 * 3600).unwrap());

        assert_eq!(utc.today(), NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(moscow.today(), NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
    }

    #[test]
    fn test_days_ago_is_exact_hours() {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let clock = Clock::utc(now);
        assert_eq!(clock.days_ago(7), Utc.with_ymd_and_hms(2025, 3, 13, 12, 0, 0).unwrap());
    }
}
