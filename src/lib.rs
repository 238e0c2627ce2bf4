mod arith;
mod boundary;
mod business;
mod calendar;
mod compare;
mod config;
mod consts;
mod convert;
mod diff;
mod error;
mod format;
mod prelude;
mod range;
mod today;
mod types;

pub use arith::{add, subtract};
pub use boundary::{end_of, end_of_week, start_of, start_of_week};
pub use business::{
    add_business_days, business_days_diff, is_business_day, next_business_day,
    previous_business_day, subtract_business_days,
};
pub use calendar::{
    day_of_year, days_in_month, days_in_year, is_leap_year, iso_week_of_year, quarter,
    week_of_month,
};
pub use compare::{
    is_after, is_before, is_between, is_future, is_past, is_same, is_this_month, is_this_week,
    is_this_year, is_today, is_tomorrow, is_weekday, is_weekend, is_yesterday, max, min,
};
pub use config::Config;
pub use consts::*;
pub use convert::{
    LocaleFormatter, LocaleOptions, from_array, from_excel_date, from_fields,
    from_milliseconds_timestamp, from_sql_date, from_sql_datetime, from_unix_timestamp, from_utc,
    timezone_offset_string, to_array, to_date_string, to_excel_date, to_fields, to_iso_string,
    to_json, to_locale_date_string, to_locale_string, to_locale_time_string,
    to_milliseconds_timestamp, to_object, to_rfc2822, to_sql_date, to_sql_datetime,
    to_sql_timestamp, to_time_string, to_unix_timestamp, to_utc, to_utc_string,
};
pub use diff::{
    DifferenceResult, age, calendar_diff, days_between, exact_age, hours_between,
    milliseconds_between, minutes_between, seconds_between, weeks_between,
};
pub use error::Error;
pub use format::{
    calendar, format, format_duration, format_long, format_relative, format_short, from_now,
    get_time,
};
pub use range::{
    DateRange, RangeError, all_days_in_month, all_days_in_year, business_days_in_range,
    date_range, last_n_days, last_n_months, last_n_weeks, last_n_years, next_n_days,
    next_n_months, next_n_weeks, next_n_years, weekdays_in_month, weekends_in_month,
};
pub use today::Today;
pub use types::{DateObject, Fields, Inclusivity, Unit, UtcOffset, Weekday};

use crate::calendar::{civil_from_days, days_from_civil, weekday_from_days};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Largest year magnitude accepted while normalizing fields; anything
/// beyond it is far outside the representable range anyway.
const MAX_FIELD_YEAR: i64 = 1_000_000;

/// A calendar-aware instant: milliseconds since the Unix epoch plus the
/// fixed UTC offset its calendar fields are read in.
///
/// Values are always within `MIN_TIMESTAMP_MS..=MAX_TIMESTAMP_MS`; every
/// constructor and every operation producing a new value checks the range.
/// Equality, ordering and hashing look at the instant only.
#[derive(Debug, Clone, Copy)]
pub struct DateTime {
    timestamp: i64,
    offset: UtcOffset,
}

impl DateTime {
    /// The Unix epoch in UTC
    pub const UNIX_EPOCH: Self = Self {
        timestamp: 0,
        offset: UtcOffset::UTC,
    };

    /// Creates a UTC value from milliseconds since the Unix epoch
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` if the timestamp is outside the
    /// representable range.
    pub fn from_millis(timestamp: i64) -> Result<Self, Error> {
        Self::from_millis_with_offset(timestamp, UtcOffset::UTC)
    }

    /// Creates a value from milliseconds since the Unix epoch, read in
    /// `offset`
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` if the timestamp is outside the
    /// representable range.
    pub fn from_millis_with_offset(timestamp: i64, offset: UtcOffset) -> Result<Self, Error> {
        if !(MIN_TIMESTAMP_MS..=MAX_TIMESTAMP_MS).contains(&timestamp) {
            return Err(Error::InvalidDate(format!(
                "timestamp {timestamp} ms is out of range"
            )));
        }
        Ok(Self { timestamp, offset })
    }

    /// Creates a value from calendar fields, rolling out-of-range fields
    /// into their neighbours (day 0 is the last day of the previous month,
    /// month 13 is January of the next year, and so on).
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` if the normalized instant is outside the
    /// representable range.
    pub fn from_fields(fields: Fields, offset: UtcOffset) -> Result<Self, Error> {
        let local = local_ms_from_fields(&fields)
            .ok_or_else(|| Error::InvalidDate(format!("{fields:?} is out of range")))?;
        Self::from_local_ms(local, offset)
    }

    /// Midnight UTC of `year-month-day`, normalized like [`from_fields`](Self::from_fields)
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` if the date is outside the representable range.
    pub fn from_ymd(year: i64, month: i64, day: i64) -> Result<Self, Error> {
        Self::from_fields(Fields::ymd(year, month, day), UtcOffset::UTC)
    }

    /// `year-month-day hour:minute:second` UTC, normalized like
    /// [`from_fields`](Self::from_fields)
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` if the date is outside the representable range.
    pub fn from_ymd_hms(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
    ) -> Result<Self, Error> {
        Self::from_fields(
            Fields::ymd(year, month, day).with_time(hour, minute, second, 0),
            UtcOffset::UTC,
        )
    }

    /// The current instant read from the system clock, in UTC
    pub fn now() -> Self {
        Self::now_with_offset(UtcOffset::UTC)
    }

    /// The current instant read from the system clock, in `offset`
    pub fn now_with_offset(offset: UtcOffset) -> Self {
        let timestamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(MAX_TIMESTAMP_MS),
            Err(err) => i64::try_from(err.duration().as_millis()).map_or(MIN_TIMESTAMP_MS, |ms| -ms),
        };
        Self {
            timestamp: timestamp.clamp(MIN_TIMESTAMP_MS, MAX_TIMESTAMP_MS),
            offset,
        }
    }

    /// The same instant read in another offset
    pub const fn with_offset(self, offset: UtcOffset) -> Self {
        Self {
            timestamp: self.timestamp,
            offset,
        }
    }

    /// Milliseconds since the Unix epoch
    #[inline]
    pub const fn timestamp_millis(&self) -> i64 {
        self.timestamp
    }

    #[inline]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn year(&self) -> i64 {
        civil_from_days(self.local_days()).0
    }

    /// Month, 1..=12
    pub fn month(&self) -> u8 {
        civil_from_days(self.local_days()).1
    }

    /// Day of the month, 1..=31
    pub fn day(&self) -> u8 {
        civil_from_days(self.local_days()).2
    }

    pub fn hour(&self) -> u8 {
        (self.time_of_day_ms() / MS_PER_HOUR) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.time_of_day_ms() % MS_PER_HOUR / MS_PER_MINUTE) as u8
    }

    pub fn second(&self) -> u8 {
        (self.time_of_day_ms() % MS_PER_MINUTE / MS_PER_SECOND) as u8
    }

    pub fn millisecond(&self) -> u16 {
        (self.time_of_day_ms() % MS_PER_SECOND) as u16
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::ALL[usize::from(weekday_from_days(self.local_days()))]
    }

    /// Normalized calendar fields in this value's offset
    pub fn fields(&self) -> Fields {
        let (year, month, day) = civil_from_days(self.local_days());
        let time = self.time_of_day_ms();
        Fields {
            year,
            month: i64::from(month),
            day: i64::from(day),
            hour: time / MS_PER_HOUR,
            minute: time % MS_PER_HOUR / MS_PER_MINUTE,
            second: time % MS_PER_MINUTE / MS_PER_SECOND,
            millisecond: time % MS_PER_SECOND,
        }
    }

    /// Milliseconds since the epoch shifted into local wall-clock time
    #[inline]
    pub(crate) const fn local_ms(&self) -> i64 {
        self.timestamp + self.offset.as_millis()
    }

    /// Local day number (days since 1970-01-01)
    #[inline]
    pub(crate) const fn local_days(&self) -> i64 {
        self.local_ms().div_euclid(MS_PER_DAY)
    }

    #[inline]
    pub(crate) const fn time_of_day_ms(&self) -> i64 {
        self.local_ms().rem_euclid(MS_PER_DAY)
    }

    /// Creates a value from local wall-clock milliseconds in `offset`
    pub(crate) fn from_local_ms(local: i64, offset: UtcOffset) -> Result<Self, Error> {
        let timestamp = local
            .checked_sub(offset.as_millis())
            .ok_or_else(|| Error::InvalidDate(format!("local time {local} ms is out of range")))?;
        Self::from_millis_with_offset(timestamp, offset)
    }
}

/// Local wall-clock milliseconds of (possibly out-of-range) fields, or
/// `None` on arithmetic overflow.
fn local_ms_from_fields(fields: &Fields) -> Option<i64> {
    let months = fields
        .year
        .checked_mul(12)?
        .checked_add(fields.month.checked_sub(1)?)?;
    let year = months.div_euclid(12);
    if year.abs() > MAX_FIELD_YEAR {
        return None;
    }
    let month = (months.rem_euclid(12) + 1) as u8;
    let days = days_from_civil(year, month, 1).checked_add(fields.day.checked_sub(1)?)?;
    days.checked_mul(MS_PER_DAY)?
        .checked_add(fields.hour.checked_mul(MS_PER_HOUR)?)?
        .checked_add(fields.minute.checked_mul(MS_PER_MINUTE)?)?
        .checked_add(fields.second.checked_mul(MS_PER_SECOND)?)?
        .checked_add(fields.millisecond)
}

/// Four-digit year, or sign plus six digits outside 0..=9999.
pub(crate) fn iso_year(year: i64) -> String {
    if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!("{sign}{:06}", year.unsigned_abs())
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
    }
}

impl Eq for DateTime {}

impl Hash for DateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.timestamp.hash(state);
    }
}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

impl std::fmt::Display for DateTime {
    /// RFC 3339 with milliseconds, in this value's own offset.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self.fields();
        let offset = if self.offset == UtcOffset::UTC {
            "Z".to_owned()
        } else {
            self.offset.render(true)
        };
        write!(
            f,
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}{offset}",
            iso_year(fields.year),
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
            fields.millisecond
        )
    }
}

impl FromStr for DateTime {
    type Err = Error;

    /// Parses `YYYY-MM-DD`, optionally followed by `T` (or a space) and
    /// `HH:MM[:SS[.fff]]`, optionally followed by `Z` or `+HH:MM`.
    /// Without an offset the value is read in UTC.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidDate("Empty date string".to_owned()));
        }
        let invalid = || Error::InvalidDate(trimmed.to_owned());

        let (date_part, time_part) = match trimmed.find(['T', 't', ' ']) {
            Some(pos) => (&trimmed[..pos], Some(trimmed[pos + 1..].trim())),
            None => (trimmed, None),
        };

        let (year, month, day) = parse_date_part(date_part).ok_or_else(invalid)?;
        let mut fields = Fields::ymd(year, month, day);
        let mut offset = UtcOffset::UTC;

        if let Some(time) = time_part {
            let (clock, zone) = match time.find(['Z', 'z', '+', '-']) {
                Some(pos) => (&time[..pos], Some(&time[pos..])),
                None => (time, None),
            };
            let (hour, minute, second, millisecond) = parse_time_part(clock).ok_or_else(invalid)?;
            fields = fields.with_time(hour, minute, second, millisecond);
            if let Some(zone) = zone {
                offset = zone.parse().map_err(|_| invalid())?;
            }
        }

        Self::from_fields(fields, offset)
    }
}

fn parse_digits(s: &str, min_len: usize, max_len: usize) -> Option<i64> {
    if s.len() < min_len || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `[+-]YYYY-MM-DD`, strictly validated.
fn parse_date_part(s: &str) -> Option<(i64, i64, i64)> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => (1, s),
    };
    let parts: Vec<&str> = rest.split(DATE_SEPARATOR).collect();
    if parts.len() != 3 {
        return None;
    }
    let year = sign * parse_digits(parts[0], 4, 6)?;
    let month = parse_digits(parts[1], 2, 2)?;
    let day = parse_digits(parts[2], 2, 2)?;
    if !(1..=i64::from(MAX_MONTH)).contains(&month) {
        return None;
    }
    if day < 1 || day > i64::from(days_in_month(year, month as u8)) {
        return None;
    }
    Some((year, month, day))
}

/// `HH:MM[:SS[.fff]]`, strictly validated; fractions beyond milliseconds
/// are truncated.
fn parse_time_part(s: &str) -> Option<(i64, i64, i64, i64)> {
    let parts: Vec<&str> = s.split(TIME_SEPARATOR).collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    let hour = parse_digits(parts[0], 2, 2)?;
    let minute = parse_digits(parts[1], 2, 2)?;
    let (second, millisecond) = match parts.get(2) {
        None => (0, 0),
        Some(sec) => match sec.split_once('.') {
            None => (parse_digits(sec, 2, 2)?, 0),
            Some((whole, frac)) => {
                parse_digits(frac, 1, 9)?;
                let padded = format!("{frac:0<3}");
                (parse_digits(whole, 2, 2)?, padded[..3].parse().ok()?)
            }
        },
    };
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some((hour, minute, second, millisecond))
}

impl serde::Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
