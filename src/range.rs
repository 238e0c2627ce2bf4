use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::arith::{add, subtract};
use crate::business::{business_days_diff, is_business_day};
use crate::calendar::{days_in_month, days_in_year};
use crate::compare::is_weekend;
use crate::{DateTime, Error, Fields, MS_PER_DAY, RANGE_SEPARATOR, Unit, prelude::*};

/// A closed interval between two instants (inclusive).
/// The start must be less than or equal to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: DateTime,
    end:   DateTime,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: DateTime, end: DateTime },

    /// Error building or parsing an endpoint.
    #[error(transparent)]
    Date(#[from] Error),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: DateTime, end: DateTime) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> DateTime {
        self.start
    }

    pub const fn end(&self) -> DateTime {
        self.end
    }

    /// Returns both endpoints as a tuple
    pub const fn dates(&self) -> (DateTime, DateTime) {
        (self.start, self.end)
    }

    /// Milliseconds from start to end
    pub const fn duration_ms(&self) -> i64 {
        self.end.timestamp_millis() - self.start.timestamp_millis()
    }

    /// Checks if the range contains a given instant (both ends inclusive)
    pub fn contains(&self, date: &DateTime) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks if this range shares at least one instant with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Every day from start to end, at the start's time of day.
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` if a step leaves the representable range.
    pub fn days(&self) -> Result<Vec<DateTime>, Error> {
        date_range(self.start, self.end)
    }

    /// The weekdays among [`DateRange::days`].
    ///
    /// # Errors
    /// Same as [`DateRange::days`].
    pub fn business_days(&self) -> Result<Vec<DateTime>, Error> {
        business_days_in_range(self.start, self.end)
    }

    /// Business days in `[start, end)`.
    pub fn business_day_count(&self) -> i64 {
        business_days_diff(self.start, self.end)
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found: {s}"))
                })?;
                let start = start_str.trim().parse::<DateTime>()?;
                let end = end_str.trim().parse::<DateTime>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `n` dates stepping back from `date` by `unit`, oldest first, ending
/// with `date` itself.
fn last_n(date: DateTime, n: usize, unit: Unit) -> Result<Vec<DateTime>, Error> {
    (0..step_count(n)?).rev().map(|i| subtract(date, i, unit)).collect()
}

/// `n` dates stepping forward from `date` by `unit`, starting one step
/// after `date`.
fn next_n(date: DateTime, n: usize, unit: Unit) -> Result<Vec<DateTime>, Error> {
    (1..=step_count(n)?).map(|i| add(date, i, unit)).collect()
}

fn step_count(n: usize) -> Result<i64, Error> {
    i64::try_from(n)
        .map_err(|_| Error::InvalidDate(format!("{n} steps exceed the representable range")))
}

/// # Errors
/// Returns `Error::InvalidDate` if a date falls outside the representable
/// range. The same holds for every generator below.
pub fn last_n_days(date: DateTime, n: usize) -> Result<Vec<DateTime>, Error> {
    last_n(date, n, Unit::Day)
}

pub fn last_n_weeks(date: DateTime, n: usize) -> Result<Vec<DateTime>, Error> {
    last_n(date, n, Unit::Week)
}

/// Month steps follow `add`'s overflow rule, so the 31st of a month can
/// land in the month after the one expected.
pub fn last_n_months(date: DateTime, n: usize) -> Result<Vec<DateTime>, Error> {
    last_n(date, n, Unit::Month)
}

pub fn last_n_years(date: DateTime, n: usize) -> Result<Vec<DateTime>, Error> {
    last_n(date, n, Unit::Year)
}

pub fn next_n_days(date: DateTime, n: usize) -> Result<Vec<DateTime>, Error> {
    next_n(date, n, Unit::Day)
}

pub fn next_n_weeks(date: DateTime, n: usize) -> Result<Vec<DateTime>, Error> {
    next_n(date, n, Unit::Week)
}

pub fn next_n_months(date: DateTime, n: usize) -> Result<Vec<DateTime>, Error> {
    next_n(date, n, Unit::Month)
}

pub fn next_n_years(date: DateTime, n: usize) -> Result<Vec<DateTime>, Error> {
    next_n(date, n, Unit::Year)
}

/// Local midnight of every day in the month holding `date`.
///
/// # Errors
/// Returns `Error::InvalidDate` for the partial months at the ends of the
/// representable range.
pub fn all_days_in_month(date: DateTime) -> Result<Vec<DateTime>, Error> {
    let (year, month) = (date.year(), date.month());
    (1..=i64::from(days_in_month(year, month)))
        .map(|day| DateTime::from_fields(Fields::ymd(year, i64::from(month), day), date.offset()))
        .collect()
}

/// Local midnight of every day in the year holding `date`.
///
/// # Errors
/// Same as [`all_days_in_month`].
pub fn all_days_in_year(date: DateTime) -> Result<Vec<DateTime>, Error> {
    let year = date.year();
    (1..=i64::from(days_in_year(year)))
        .map(|day| DateTime::from_fields(Fields::ymd(year, 1, day), date.offset()))
        .collect()
}

/// Monday to Friday midnights of the month holding `date`.
///
/// # Errors
/// Same as [`all_days_in_month`].
pub fn weekdays_in_month(date: DateTime) -> Result<Vec<DateTime>, Error> {
    Ok(all_days_in_month(date)?.into_iter().filter(|d| !is_weekend(*d)).collect())
}

/// Saturday and Sunday midnights of the month holding `date`.
///
/// # Errors
/// Same as [`all_days_in_month`].
pub fn weekends_in_month(date: DateTime) -> Result<Vec<DateTime>, Error> {
    Ok(all_days_in_month(date)?.into_iter().filter(|d| is_weekend(*d)).collect())
}

/// Every day from the earlier of `start` and `end` to the later, both
/// included, at the earlier one's time of day. Equal inputs give one date.
///
/// # Errors
/// Returns `Error::InvalidDate` if a step leaves the representable range.
pub fn date_range(start: DateTime, end: DateTime) -> Result<Vec<DateTime>, Error> {
    let (from, to) = if start <= end { (start, end) } else { (end, start) };
    let mut dates = Vec::new();
    let mut current = from;
    loop {
        dates.push(current);
        if to.timestamp_millis() - current.timestamp_millis() < MS_PER_DAY {
            break;
        }
        current = add(current, 1, Unit::Day)?;
    }
    tracing::trace!(steps = dates.len(), "date range walk");
    Ok(dates)
}

/// The business days of [`date_range`].
///
/// # Errors
/// Same as [`date_range`].
pub fn business_days_in_range(start: DateTime, end: DateTime) -> Result<Vec<DateTime>, Error> {
    Ok(date_range(start, end)?.into_iter().filter(|d| is_business_day(*d)).collect())
}
