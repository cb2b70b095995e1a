//! Canonical calendar boundaries.
//!
//! All dates in the application are `NaiveDate` values in a fixed
//! calendar, so a date is its own start-of-day key and cannot drift
//! with the system timezone. Weeks start on Monday everywhere.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Normalize a point in time to its calendar day.
#[must_use]
pub fn start_of_day(date_time: NaiveDateTime) -> NaiveDate {
    date_time.date()
}

#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[must_use]
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    // day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl From<std::ops::RangeInclusive<NaiveDate>> for Interval {
    fn from(value: std::ops::RangeInclusive<NaiveDate>) -> Self {
        Interval {
            first: *value.start(),
            last: *value.end(),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum DefaultInterval {
    All,
    _1Y = 365,
    _6M = 182,
    _3M = 91,
    _1M = 30,
    _1W = 6,
}

/// Determine the chart interval for a series of dates.
///
/// The interval ends at `today`. It begins `default_interval` days
/// earlier if the data reaches into that range, otherwise at the
/// earliest date present.
#[must_use]
pub fn init_interval(
    dates: &[NaiveDate],
    default_interval: DefaultInterval,
    today: NaiveDate,
) -> Interval {
    let mut first = dates.iter().copied().min().unwrap_or(today);
    let last = dates.iter().copied().max().unwrap_or(today);

    if default_interval != DefaultInterval::All
        && last >= today - Duration::days(default_interval as i64)
    {
        first = today - Duration::days(default_interval as i64);
    }

    Interval { first, last: today }
}
