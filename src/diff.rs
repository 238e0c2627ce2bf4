//! Differences between two dates.

use crate::calendar::days_in_month;
use crate::{
    DECEMBER, DateTime, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK,
};
use serde::{Deserialize, Serialize};

/// Calendar-aware breakdown of the gap between two dates, plus the gap in
/// flat units.
///
/// Every field is non-negative whichever date comes first. The `total_*`
/// fields are floored from the raw millisecond gap; they are not derived
/// from the calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DifferenceResult {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
    pub total_days: i64,
    pub total_hours: i64,
    pub total_minutes: i64,
    pub total_seconds: i64,
    pub total_milliseconds: i64,
}

/// Decomposes the gap between `a` and `b` into years, months, days, hours,
/// minutes, seconds and milliseconds.
///
/// The later date's fields are subtracted from the earlier's (both read in
/// the earlier date's offset) and each deficit borrows from the next
/// coarser field, finest first. A day deficit borrows the length of the
/// month before the later date's month; when the earlier day does not exist
/// in that month it is clamped to the month's last day, so January 31st to
/// March 1st is one month and one day.
pub fn calendar_diff(a: DateTime, b: DateTime) -> DifferenceResult {
    let (early, late) = if a <= b { (a, b) } else { (b, a) };
    let from = early.fields();
    let to = late.with_offset(early.offset()).fields();

    let mut years = to.year - from.year;
    let mut months = to.month - from.month;
    let mut hours = to.hour - from.hour;
    let mut minutes = to.minute - from.minute;
    let mut seconds = to.second - from.second;
    let mut milliseconds = to.millisecond - from.millisecond;

    if milliseconds < 0 {
        seconds -= 1;
        milliseconds += MS_PER_SECOND;
    }
    if seconds < 0 {
        minutes -= 1;
        seconds += 60;
    }
    if minutes < 0 {
        hours -= 1;
        minutes += 60;
    }
    let mut day_borrow = 0;
    if hours < 0 {
        day_borrow = 1;
        hours += 24;
    }

    let mut days = to.day - from.day - day_borrow;
    if days < 0 {
        months -= 1;
        let (year, month) = if to.month == 1 {
            (to.year - 1, DECEMBER)
        } else {
            (to.year, to.month as u8 - 1)
        };
        let borrowed = i64::from(days_in_month(year, month));
        days = to.day - from.day.min(borrowed) - day_borrow + borrowed;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let total_milliseconds = milliseconds_between(a, b);
    DifferenceResult {
        years,
        months,
        days,
        hours,
        minutes,
        seconds,
        milliseconds,
        total_days: total_milliseconds / MS_PER_DAY,
        total_hours: total_milliseconds / MS_PER_HOUR,
        total_minutes: total_milliseconds / MS_PER_MINUTE,
        total_seconds: total_milliseconds / MS_PER_SECOND,
        total_milliseconds,
    }
}

/// Whole years from `birth` to `reference`, one less when the reference's
/// month and day come before the birthday within its year. Both dates are
/// read in `birth`'s offset.
pub fn age(birth: DateTime, reference: DateTime) -> i64 {
    let born = birth.fields();
    let at = reference.with_offset(birth.offset()).fields();
    let mut years = at.year - born.year;
    if (at.month, at.day) < (born.month, born.day) {
        years -= 1;
    }
    years
}

/// Full calendar breakdown from `birth` to `reference`.
pub fn exact_age(birth: DateTime, reference: DateTime) -> DifferenceResult {
    calendar_diff(birth, reference)
}

pub const fn milliseconds_between(a: DateTime, b: DateTime) -> i64 {
    (a.timestamp_millis() - b.timestamp_millis()).abs()
}

pub const fn seconds_between(a: DateTime, b: DateTime) -> i64 {
    milliseconds_between(a, b) / MS_PER_SECOND
}

pub const fn minutes_between(a: DateTime, b: DateTime) -> i64 {
    milliseconds_between(a, b) / MS_PER_MINUTE
}

pub const fn hours_between(a: DateTime, b: DateTime) -> i64 {
    milliseconds_between(a, b) / MS_PER_HOUR
}

pub const fn days_between(a: DateTime, b: DateTime) -> i64 {
    milliseconds_between(a, b) / MS_PER_DAY
}

pub const fn weeks_between(a: DateTime, b: DateTime) -> i64 {
    milliseconds_between(a, b) / MS_PER_WEEK
}
