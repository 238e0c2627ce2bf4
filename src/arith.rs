//! Adding and subtracting calendar units.
//!
//! Each operation rewrites one field of the date's [`Fields`](crate::Fields) and lets the
//! normalizing constructor roll the overflow into the neighbouring fields.
//! Month and year arithmetic therefore overflows instead of clamping:
//! January 31st plus one month is March 2nd (or 3rd in a leap year).

use crate::{DateTime, Error, MONTHS_PER_QUARTER, Unit};

/// Adds `amount` of `unit` to `date`
///
/// # Errors
/// Returns `Error::InvalidUnit` for `Unit::Decade` and `Unit::Century`, and
/// `Error::InvalidDate` if the result is outside the representable range.
pub fn add(date: DateTime, amount: i64, unit: Unit) -> Result<DateTime, Error> {
    let mut fields = date.fields();
    let overflow = || Error::InvalidDate(format!("{date} + {amount} {unit} overflows"));
    let slot = match unit {
        Unit::Millisecond => &mut fields.millisecond,
        Unit::Second => &mut fields.second,
        Unit::Minute => &mut fields.minute,
        Unit::Hour => &mut fields.hour,
        Unit::Day | Unit::Week => &mut fields.day,
        Unit::Month | Unit::Quarter => &mut fields.month,
        Unit::Year => &mut fields.year,
        Unit::Decade | Unit::Century => {
            tracing::debug!(%unit, "unit not supported by add");
            return Err(Error::InvalidUnit(unit.to_string()));
        }
    };
    let scaled = match unit {
        Unit::Week => amount.checked_mul(7),
        Unit::Quarter => amount.checked_mul(i64::from(MONTHS_PER_QUARTER)),
        _ => Some(amount),
    }
    .ok_or_else(overflow)?;
    *slot = slot.checked_add(scaled).ok_or_else(overflow)?;
    DateTime::from_fields(fields, date.offset())
}

/// Subtracts `amount` of `unit` from `date`
///
/// # Errors
/// Same as [`add`].
pub fn subtract(date: DateTime, amount: i64, unit: Unit) -> Result<DateTime, Error> {
    let negated = amount
        .checked_neg()
        .ok_or_else(|| Error::InvalidDate(format!("{date} - {amount} {unit} overflows")))?;
    add(date, negated, unit)
}

/// Moves `date` by whole calendar days.
pub(crate) fn shift_days(date: DateTime, days: i64) -> Result<DateTime, Error> {
    add(date, days, Unit::Day)
}
