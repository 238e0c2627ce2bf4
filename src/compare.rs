//! Granularity-aware comparisons and calendar predicates.
//!
//! When two dates carry different offsets, the second is read in the first
//! one's offset before any calendar field is compared.

use crate::boundary::start_local_ms;
use crate::{DateTime, Inclusivity, Unit, Weekday};

/// Local start of the `unit` period holding `date`, read in the first
/// operand's offset so the two starts are directly comparable.
fn period_start(date: DateTime, unit: Unit, frame: DateTime) -> i64 {
    start_local_ms(date.with_offset(frame.offset()), unit, Weekday::Sunday)
}

fn reference_or_now(date: DateTime, reference: Option<DateTime>) -> DateTime {
    reference
        .unwrap_or_else(|| DateTime::now_with_offset(date.offset()))
        .with_offset(date.offset())
}

/// True when the `granularity` period holding `a` starts before the one
/// holding `b`. `Unit::Millisecond` compares the raw instants.
pub fn is_before(a: DateTime, b: DateTime, granularity: Unit) -> bool {
    period_start(a, granularity, a) < period_start(b, granularity, a)
}

/// True when the `granularity` period holding `a` starts after the one
/// holding `b`.
pub fn is_after(a: DateTime, b: DateTime, granularity: Unit) -> bool {
    period_start(a, granularity, a) > period_start(b, granularity, a)
}

/// True when `a` and `b` fall in the same `granularity` period.
///
/// `Unit::Second` and `Unit::Millisecond` require the exact same instant.
pub fn is_same(a: DateTime, b: DateTime, granularity: Unit) -> bool {
    match granularity {
        Unit::Second | Unit::Millisecond => a == b,
        Unit::Year | Unit::Month | Unit::Day | Unit::Hour | Unit::Minute => {
            let left = a.fields().to_array();
            let right = b.with_offset(a.offset()).fields().to_array();
            let depth = match granularity {
                Unit::Year => 1,
                Unit::Month => 2,
                Unit::Day => 3,
                Unit::Hour => 4,
                _ => 5,
            };
            left[..depth] == right[..depth]
        }
        Unit::Week | Unit::Quarter | Unit::Decade | Unit::Century => {
            period_start(a, granularity, a) == period_start(b, granularity, a)
        }
    }
}

/// Whether `date` lies between `start` and `end`, each bound included or
/// excluded as `inclusivity` says.
pub fn is_between(
    date: DateTime,
    start: DateTime,
    end: DateTime,
    inclusivity: Inclusivity,
) -> bool {
    let after_start = if inclusivity.start {
        date >= start
    } else {
        date > start
    };
    let before_end = if inclusivity.end {
        date <= end
    } else {
        date < end
    };
    after_start && before_end
}

/// Same local day as `reference`, or as the wall clock when `None`.
pub fn is_today(date: DateTime, reference: Option<DateTime>) -> bool {
    date.local_days() == reference_or_now(date, reference).local_days()
}

pub fn is_yesterday(date: DateTime, reference: Option<DateTime>) -> bool {
    date.local_days() == reference_or_now(date, reference).local_days() - 1
}

pub fn is_tomorrow(date: DateTime, reference: Option<DateTime>) -> bool {
    date.local_days() == reference_or_now(date, reference).local_days() + 1
}

/// Same Sunday-started week as the reference.
pub fn is_this_week(date: DateTime, reference: Option<DateTime>) -> bool {
    is_same(date, reference_or_now(date, reference), Unit::Week)
}

pub fn is_this_month(date: DateTime, reference: Option<DateTime>) -> bool {
    is_same(date, reference_or_now(date, reference), Unit::Month)
}

pub fn is_this_year(date: DateTime, reference: Option<DateTime>) -> bool {
    is_same(date, reference_or_now(date, reference), Unit::Year)
}

pub fn is_past(date: DateTime, reference: Option<DateTime>) -> bool {
    date < reference_or_now(date, reference)
}

pub fn is_future(date: DateTime, reference: Option<DateTime>) -> bool {
    date > reference_or_now(date, reference)
}

/// Saturday or Sunday in the date's own offset.
pub fn is_weekend(date: DateTime) -> bool {
    date.weekday().is_weekend()
}

pub fn is_weekday(date: DateTime) -> bool {
    !is_weekend(date)
}

/// Earliest of `dates`, or `None` when empty.
pub fn min(dates: &[DateTime]) -> Option<DateTime> {
    dates.iter().min().copied()
}

/// Latest of `dates`, or `None` when empty.
pub fn max(dates: &[DateTime]) -> Option<DateTime> {
    dates.iter().max().copied()
}
