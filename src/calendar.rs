//! Proleptic Gregorian calendar math.
//!
//! Day numbers count days since 1970-01-01 (day 0). Conversions use Howard
//! Hinnant's `days_from_civil` / `civil_from_days` algorithms and are exact
//! for every year an `i64` day count can express.

use crate::DateTime;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_ERA, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    JANUARY, LEAP_YEAR_CYCLE, MAX_MONTH, MIN_DAY, MONTHS_PER_QUARTER, UNIX_EPOCH_DAY_OFFSET,
    UNIX_EPOCH_WEEKDAY,
};

pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Last day of `month` (1-based) in `year`.
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Day number of `year-month-day`. `month` must be 1..=12; `day` may be
/// any value and is counted from the first of the month.
pub const fn days_from_civil(year: i64, month: u8, day: i64) -> i64 {
    let y = if month <= FEBRUARY { year - 1 } else { year };
    let era = y.div_euclid(GREGORIAN_CYCLE);
    let yoe = y - era * GREGORIAN_CYCLE;
    let m = month as i64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - UNIX_EPOCH_DAY_OFFSET + (day - 1)
}

/// `(year, month, day)` of a day number.
pub const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + UNIX_EPOCH_DAY_OFFSET;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * GREGORIAN_CYCLE + if month <= 2 { 1 } else { 0 };
    (year, month as u8, day as u8)
}

/// Weekday index (Sunday = 0) of a day number.
pub const fn weekday_from_days(days: i64) -> u8 {
    (days + UNIX_EPOCH_WEEKDAY).rem_euclid(7) as u8
}

/// Day of the year, 1 for January 1st.
pub fn day_of_year(date: DateTime) -> u16 {
    let days = date.local_days();
    let (year, _, _) = civil_from_days(days);
    (days - days_from_civil(year, JANUARY, i64::from(MIN_DAY)) + 1) as u16
}

/// Quarter of the year, 1..=4.
pub fn quarter(date: DateTime) -> u8 {
    (date.month() - 1) / MONTHS_PER_QUARTER + 1
}

/// ISO-8601 week number.
///
/// Week 1 is the week (Monday to Sunday) holding the year's first Thursday,
/// so early January can belong to week 52 or 53 of the previous year.
pub fn iso_week_of_year(date: DateTime) -> u8 {
    let days = date.local_days();
    let iso_weekday = match weekday_from_days(days) {
        0 => 7,
        d => i64::from(d),
    };
    let thursday = days + 4 - iso_weekday;
    let (year, _, _) = civil_from_days(thursday);
    let jan1 = days_from_civil(year, JANUARY, i64::from(MIN_DAY));
    ((thursday - jan1) / 7 + 1) as u8
}

/// Week of the month, counting the partial first week as week 1.
pub fn week_of_month(date: DateTime) -> u8 {
    let first = days_from_civil(date.year(), date.month(), i64::from(MIN_DAY));
    let offset = weekday_from_days(first);
    (date.day() + offset).div_ceil(7)
}
