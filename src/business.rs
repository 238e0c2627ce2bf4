//! Weekday (Monday to Friday) arithmetic. Holidays are not considered.

use crate::arith::shift_days;
use crate::calendar::weekday_from_days;
use crate::compare::is_weekday;
use crate::{DateTime, Error, MS_PER_DAY, Weekday};

/// True for Monday through Friday in the date's own offset.
pub fn is_business_day(date: DateTime) -> bool {
    is_weekday(date)
}

/// Moves `n` business days forward (or backward when negative), keeping
/// the time of day. Weekend days are skipped without being counted.
///
/// # Errors
/// Returns `Error::InvalidDate` if a step leaves the representable range.
pub fn add_business_days(date: DateTime, n: i64) -> Result<DateTime, Error> {
    let step = n.signum();
    let mut remaining = n.unsigned_abs();
    let mut current = date;
    let mut steps = 0_u64;
    while remaining > 0 {
        current = shift_days(current, step)?;
        steps += 1;
        if is_business_day(current) {
            remaining -= 1;
        }
    }
    tracing::trace!(n, steps, "business day walk");
    Ok(current)
}

/// # Errors
/// Same as [`add_business_days`].
pub fn subtract_business_days(date: DateTime, n: i64) -> Result<DateTime, Error> {
    let negated = n
        .checked_neg()
        .ok_or_else(|| Error::InvalidDate(format!("{date} - {n} business days overflows")))?;
    add_business_days(date, negated)
}

/// Business days in the half-open span `[min, max)` of the two dates,
/// stepping a day at a time from the earlier one.
///
/// A Monday 00:00 to the next Monday 00:00 counts 5, and so does Monday to
/// the Sunday of the same week.
pub fn business_days_diff(a: DateTime, b: DateTime) -> i64 {
    let (from, to) = if a <= b { (a, b) } else { (b, a) };
    let mut count = 0;
    let mut steps = 0_u64;
    let mut current = from.local_ms();
    let end = to.with_offset(from.offset()).local_ms();
    while current < end {
        let weekday = weekday_from_days(current.div_euclid(MS_PER_DAY));
        if weekday != Weekday::Sunday.index() && weekday != Weekday::Saturday.index() {
            count += 1;
        }
        current += MS_PER_DAY;
        steps += 1;
    }
    tracing::trace!(steps, count, "business day count");
    count
}

/// First business day strictly after `date`.
///
/// # Errors
/// Returns `Error::InvalidDate` at the end of the representable range.
pub fn next_business_day(date: DateTime) -> Result<DateTime, Error> {
    add_business_days(date, 1)
}

/// Last business day strictly before `date`.
///
/// # Errors
/// Returns `Error::InvalidDate` at the start of the representable range.
pub fn previous_business_day(date: DateTime) -> Result<DateTime, Error> {
    add_business_days(date, -1)
}
