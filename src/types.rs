use crate::Error;
use crate::consts::{
    MAX_OFFSET_MINUTES, MS_PER_MINUTE, WEEKDAY_MIN_NAMES, WEEKDAY_NAMES, WEEKDAY_SHORT_NAMES,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar unit used for arithmetic, boundaries and comparison granularity.
///
/// Parsing is case-insensitive and accepts singular or plural names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    #[display(fmt = "millisecond")]
    Millisecond,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "quarter")]
    Quarter,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "decade")]
    Decade,
    #[display(fmt = "century")]
    Century,
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "millisecond" | "milliseconds" => Self::Millisecond,
            "second" | "seconds" => Self::Second,
            "minute" | "minutes" => Self::Minute,
            "hour" | "hours" => Self::Hour,
            "day" | "days" => Self::Day,
            "week" | "weeks" => Self::Week,
            "month" | "months" => Self::Month,
            "quarter" | "quarters" => Self::Quarter,
            "year" | "years" => Self::Year,
            "decade" | "decades" => Self::Decade,
            "century" | "centuries" => Self::Century,
            _ => {
                tracing::debug!(unit = %s, "rejected unit name");
                return Err(Error::InvalidUnit(s.to_owned()));
            }
        };
        Ok(unit)
    }
}

impl TryFrom<String> for Unit {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.to_string()
    }
}

/// Day of the week, numbered from Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    #[default]
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    pub(crate) const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Creates a weekday from its index (Sunday = 0)
    ///
    /// # Errors
    /// Returns `Error::InvalidWeekday` if the index is above 6.
    pub fn from_index(index: u8) -> Result<Self, Error> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(Error::InvalidWeekday(index))
    }

    /// Returns the weekday index (Sunday = 0)
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Saturday or Sunday
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    pub const fn name(self) -> &'static str {
        WEEKDAY_NAMES[self as usize]
    }

    pub const fn short_name(self) -> &'static str {
        WEEKDAY_SHORT_NAMES[self as usize]
    }

    pub const fn min_name(self) -> &'static str {
        WEEKDAY_MIN_NAMES[self as usize]
    }
}

impl TryFrom<u8> for Weekday {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value)
    }
}

impl From<Weekday> for u8 {
    fn from(weekday: Weekday) -> Self {
        weekday.index()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed offset from UTC in whole minutes, within +/-23:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UtcOffset(i32);

impl UtcOffset {
    pub const UTC: Self = Self(0);

    /// Creates an offset from signed minutes east of UTC
    ///
    /// # Errors
    /// Returns `Error::InvalidOffset` if the magnitude exceeds 23:59.
    pub fn from_minutes(minutes: i32) -> Result<Self, Error> {
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(Error::InvalidOffset(minutes));
        }
        Ok(Self(minutes))
    }

    /// Signed minutes east of UTC
    #[inline]
    pub const fn minutes(self) -> i32 {
        self.0
    }

    #[inline]
    pub(crate) const fn as_millis(self) -> i64 {
        self.0 as i64 * MS_PER_MINUTE
    }

    /// `+HHMM`, or `+HH:MM` with `colon`.
    pub fn render(self, colon: bool) -> String {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.unsigned_abs();
        let sep = if colon { ":" } else { "" };
        format!("{sign}{:02}{sep}{:02}", abs / 60, abs % 60)
    }
}

impl TryFrom<i32> for UtcOffset {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_minutes(value)
    }
}

impl From<UtcOffset> for i32 {
    fn from(offset: UtcOffset) -> Self {
        offset.0
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

impl FromStr for UtcOffset {
    type Err = Error;

    /// Accepts `Z`, `+HH:MM`, `+HHMM` or `+HH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("z") {
            return Ok(Self::UTC);
        }
        let invalid = || Error::InvalidFormat(format!("offset {s}"));
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        let digits = match rest.split_once(':') {
            Some((hh, mm)) if hh.len() == 2 && mm.len() == 2 => format!("{hh}{mm}"),
            Some(_) => return Err(invalid()),
            None => rest.to_owned(),
        };
        if !digits.bytes().all(|b| b.is_ascii_digit()) || !matches!(digits.len(), 2 | 4) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = if digits.len() == 4 {
            digits[2..].parse().map_err(|_| invalid())?
        } else {
            0
        };
        if minutes >= 60 {
            return Err(invalid());
        }
        Self::from_minutes(sign * (hours * 60 + minutes))
    }
}

/// Bound inclusivity for [`is_between`](crate::is_between), written as a
/// two-character bracket pair like `[]`, `()`, `[)` or `(]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inclusivity {
    pub start: bool,
    pub end: bool,
}

impl Inclusivity {
    /// `[]`
    pub const INCLUSIVE: Self = Self {
        start: true,
        end: true,
    };
    /// `()`
    pub const EXCLUSIVE: Self = Self {
        start: false,
        end: false,
    };

    /// `[` in position 0 includes the start, `]` in position 1 includes the
    /// end; any other character, or a missing one, excludes that bound.
    pub fn from_brackets(brackets: &str) -> Self {
        let mut chars = brackets.chars();
        Self {
            start: chars.next() == Some('['),
            end: chars.next() == Some(']'),
        }
    }
}

impl Default for Inclusivity {
    fn default() -> Self {
        Self::INCLUSIVE
    }
}

impl From<&str> for Inclusivity {
    fn from(brackets: &str) -> Self {
        Self::from_brackets(brackets)
    }
}

impl fmt::Display for Inclusivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.start { '[' } else { '(' };
        let close = if self.end { ']' } else { ')' };
        write!(f, "{open}{close}")
    }
}

/// Calendar fields of a date, month and day 1-based.
///
/// Used as input to the normalizing constructor, so any component may be
/// out of range or negative; it rolls into the adjacent fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub millisecond: i64,
}

impl Default for Fields {
    fn default() -> Self {
        Self {
            year: 1970,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }
}

impl Fields {
    pub const fn ymd(year: i64, month: i64, day: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }

    pub const fn with_time(self, hour: i64, minute: i64, second: i64, millisecond: i64) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
            ..self
        }
    }

    pub const fn to_array(self) -> [i64; 7] {
        [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        ]
    }
}

/// Structured breakdown of a date, as returned by
/// [`to_object`](crate::to_object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateObject {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub milliseconds: u16,
    pub day_of_week: Weekday,
    pub timestamp: i64,
    pub unix_timestamp: i64,
    pub timezone_offset: i32,
}
