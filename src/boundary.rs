//! Start and end of calendar periods.
//!
//! Boundaries are computed on local wall-clock milliseconds first (which
//! cannot fail) and only then turned back into a [`DateTime`], which checks
//! the representable range. End values are the last millisecond of the
//! period (`.999` of its last second).

use crate::calendar::{civil_from_days, days_from_civil, days_in_month, weekday_from_days};
use crate::consts::{CENTURY_CYCLE, DECADE_YEARS};
use crate::{
    DateTime, Error, JANUARY, MONTHS_PER_QUARTER, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE,
    MS_PER_SECOND, Unit, Weekday,
};

/// Local day number of the first day of the period holding `date`.
fn period_start_day(date: DateTime, unit: Unit, week_start: Weekday) -> i64 {
    let days = date.local_days();
    let (year, month, _) = civil_from_days(days);
    match unit {
        Unit::Week => {
            let back = (i64::from(weekday_from_days(days)) - i64::from(week_start.index()))
                .rem_euclid(7);
            days - back
        }
        Unit::Month => days_from_civil(year, month, 1),
        Unit::Quarter => days_from_civil(year, quarter_first_month(month), 1),
        Unit::Year => days_from_civil(year, JANUARY, 1),
        Unit::Decade => days_from_civil(floor_to(year, DECADE_YEARS), JANUARY, 1),
        Unit::Century => days_from_civil(floor_to(year, CENTURY_CYCLE), JANUARY, 1),
        Unit::Millisecond | Unit::Second | Unit::Minute | Unit::Hour | Unit::Day => days,
    }
}

/// Local day number of the first day after the period holding `date`.
fn period_next_day(date: DateTime, unit: Unit, week_start: Weekday) -> i64 {
    let (year, month, _) = civil_from_days(date.local_days());
    match unit {
        Unit::Week => period_start_day(date, unit, week_start) + 7,
        Unit::Month => days_from_civil(year, month, i64::from(days_in_month(year, month)) + 1),
        Unit::Quarter => {
            let last = quarter_first_month(month) + MONTHS_PER_QUARTER - 1;
            days_from_civil(year, last, i64::from(days_in_month(year, last)) + 1)
        }
        Unit::Year => days_from_civil(year + 1, JANUARY, 1),
        Unit::Decade => days_from_civil(floor_to(year, DECADE_YEARS) + DECADE_YEARS, JANUARY, 1),
        Unit::Century => {
            days_from_civil(floor_to(year, CENTURY_CYCLE) + CENTURY_CYCLE, JANUARY, 1)
        }
        Unit::Millisecond | Unit::Second | Unit::Minute | Unit::Hour | Unit::Day => {
            date.local_days() + 1
        }
    }
}

const fn quarter_first_month(month: u8) -> u8 {
    (month - 1) / MONTHS_PER_QUARTER * MONTHS_PER_QUARTER + 1
}

const fn floor_to(year: i64, step: i64) -> i64 {
    year.div_euclid(step) * step
}

/// Clock-unit length, for the units that do not depend on the calendar.
const fn clock_span(unit: Unit) -> Option<i64> {
    match unit {
        Unit::Millisecond => Some(1),
        Unit::Second => Some(MS_PER_SECOND),
        Unit::Minute => Some(MS_PER_MINUTE),
        Unit::Hour => Some(MS_PER_HOUR),
        _ => None,
    }
}

/// Local wall-clock milliseconds of the start of the period holding `date`.
pub(crate) fn start_local_ms(date: DateTime, unit: Unit, week_start: Weekday) -> i64 {
    let local = date.local_ms();
    match clock_span(unit) {
        Some(span) => local - local.rem_euclid(span),
        None => period_start_day(date, unit, week_start) * MS_PER_DAY,
    }
}

/// Local wall-clock milliseconds of the last millisecond of the period
/// holding `date`.
pub(crate) fn end_local_ms(date: DateTime, unit: Unit, week_start: Weekday) -> i64 {
    match clock_span(unit) {
        Some(span) => start_local_ms(date, unit, week_start) + span - 1,
        None => period_next_day(date, unit, week_start) * MS_PER_DAY - 1,
    }
}

/// Start of the period holding `date`. Weeks start on Sunday; use
/// [`start_of_week`] for another start day. `Unit::Millisecond` returns
/// `date` unchanged.
///
/// # Errors
/// Returns `Error::InvalidDate` if the boundary falls outside the
/// representable range.
pub fn start_of(date: DateTime, unit: Unit) -> Result<DateTime, Error> {
    start_of_with(date, unit, Weekday::Sunday)
}

/// Last millisecond of the period holding `date`. Weeks start on Sunday;
/// use [`end_of_week`] for another start day.
///
/// # Errors
/// Returns `Error::InvalidDate` if the boundary falls outside the
/// representable range.
pub fn end_of(date: DateTime, unit: Unit) -> Result<DateTime, Error> {
    end_of_with(date, unit, Weekday::Sunday)
}

/// Midnight of the most recent `week_start` day on or before `date`
///
/// # Errors
/// Returns `Error::InvalidDate` if the boundary falls outside the
/// representable range.
pub fn start_of_week(date: DateTime, week_start: Weekday) -> Result<DateTime, Error> {
    start_of_with(date, Unit::Week, week_start)
}

/// Six days after [`start_of_week`], at 23:59:59.999
///
/// # Errors
/// Returns `Error::InvalidDate` if the boundary falls outside the
/// representable range.
pub fn end_of_week(date: DateTime, week_start: Weekday) -> Result<DateTime, Error> {
    end_of_with(date, Unit::Week, week_start)
}

pub(crate) fn start_of_with(
    date: DateTime,
    unit: Unit,
    week_start: Weekday,
) -> Result<DateTime, Error> {
    DateTime::from_local_ms(start_local_ms(date, unit, week_start), date.offset())
}

pub(crate) fn end_of_with(
    date: DateTime,
    unit: Unit,
    week_start: Weekday,
) -> Result<DateTime, Error> {
    DateTime::from_local_ms(end_local_ms(date, unit, week_start), date.offset())
}
