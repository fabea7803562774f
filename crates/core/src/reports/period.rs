//! Calendar month boundaries.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::error::ReportError;

/// A calendar month as a half-open UTC instant range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl MonthPeriod {
    /// Builds the period for `year`/`month`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidPeriod` if the month is outside 1..=12
    /// or the year cannot be represented.
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        let invalid = || ReportError::InvalidPeriod { year, month };

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year.checked_add(1).ok_or_else(invalid)?, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            start: Utc.from_utc_datetime(&first.and_time(chrono::NaiveTime::MIN)),
            end: Utc.from_utc_datetime(&next.and_time(chrono::NaiveTime::MIN)),
        })
    }

    /// Year of the period.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month of the period (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month (inclusive).
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// First instant of the following month (exclusive).
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    #[cfg(test)]
    fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}
