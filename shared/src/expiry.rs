use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::{Error, Result};

/// Days added to today when the grant dialog opens.
pub const DEFAULT_GRANT_DAYS: u64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Bounds of the expiry date picker, anchored on the current UTC date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryWindow {
    today: NaiveDate,
}

impl ExpiryWindow {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self::new(now.date_naive())
    }

    pub fn min(&self) -> NaiveDate {
        self.today
    }

    pub fn default_pick(&self) -> NaiveDate {
        self.today
            .checked_add_days(Days::new(DEFAULT_GRANT_DAYS))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Parses a `YYYY-MM-DD` value from the date input and checks it
    /// against the lower bound.
    pub fn parse(&self, input: &str) -> Result<NaiveDate> {
        let input = input.trim();
        let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(input.to_string()))?;
        self.validate(date)
    }

    pub fn validate(&self, date: NaiveDate) -> Result<NaiveDate> {
        if date < self.min() {
            return Err(Error::ExpiryInPast {
                date,
                min: self.min(),
            });
        }
        Ok(date)
    }
}

/// Instant the backend records for a date-only expiry (midnight UTC). The
/// grant still covers the rest of that day, see `AccessStatus::derive`.
pub fn expiry_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
