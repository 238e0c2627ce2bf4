//! Conversions to and from timestamps, strings, spreadsheet serials and
//! plain data.

use std::collections::BTreeMap;

use crate::consts::EXCEL_EPOCH_DAYS;
use crate::format::format;
use crate::{
    DATE_SEPARATOR, DateObject, DateTime, Error, Fields, MS_PER_DAY, MS_PER_SECOND,
    TIME_SEPARATOR, UtcOffset,
};

/// Whole seconds since the epoch, floored (so pre-epoch instants round
/// toward the past).
pub const fn to_unix_timestamp(date: DateTime) -> i64 {
    date.timestamp_millis().div_euclid(MS_PER_SECOND)
}

pub const fn to_milliseconds_timestamp(date: DateTime) -> i64 {
    date.timestamp_millis()
}

/// # Errors
/// Returns `Error::InvalidDate` if the instant is out of range.
pub fn from_unix_timestamp(seconds: i64) -> Result<DateTime, Error> {
    let millis = seconds
        .checked_mul(MS_PER_SECOND)
        .ok_or_else(|| Error::InvalidDate(format!("unix timestamp {seconds} out of range")))?;
    DateTime::from_millis(millis)
}

/// # Errors
/// Returns `Error::InvalidDate` if the instant is out of range.
pub fn from_milliseconds_timestamp(millis: i64) -> Result<DateTime, Error> {
    DateTime::from_millis(millis)
}

/// `2024-03-05T14:30:00.000Z`, always rendered in UTC.
pub fn to_iso_string(date: DateTime) -> String {
    date.with_offset(UtcOffset::UTC).to_string()
}

/// Same as [`to_iso_string`].
pub fn to_json(date: DateTime) -> String {
    to_iso_string(date)
}

/// `Tue, 05 Mar 2024 14:30:00 GMT`, always rendered in UTC.
pub fn to_utc_string(date: DateTime) -> String {
    format(date.with_offset(UtcOffset::UTC), "ddd, DD MMM YYYY HH:mm:ss [GMT]")
}

/// `Tue Mar 05 2024`
pub fn to_date_string(date: DateTime) -> String {
    format(date, "ddd MMM DD YYYY")
}

/// `14:30:00 GMT+0000`
pub fn to_time_string(date: DateTime) -> String {
    format(date, "HH:mm:ss [GMT]ZZ")
}

/// `Tue, 05 Mar 2024 14:30:00 +0000`
pub fn to_rfc2822(date: DateTime) -> String {
    format(date, "ddd, DD MMM YYYY HH:mm:ss ZZ")
}

/// `2024-03-05`
pub fn to_sql_date(date: DateTime) -> String {
    format(date, "YYYY-MM-DD")
}

/// `2024-03-05 14:30:00`
pub fn to_sql_datetime(date: DateTime) -> String {
    format(date, "YYYY-MM-DD HH:mm:ss")
}

/// Same as [`to_sql_datetime`].
pub fn to_sql_timestamp(date: DateTime) -> String {
    to_sql_datetime(date)
}

/// Splits `s` on `separator` into exactly `N` unsigned decimal numbers.
fn split_numbers<const N: usize>(s: &str, separator: char) -> Option<[i64; N]> {
    let mut values = [0; N];
    let mut parts = s.split(separator);
    for value in &mut values {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *value = part.parse().ok()?;
    }
    parts.next().is_none().then_some(values)
}

/// Reads a `YYYY-MM-DD` value as local midnight in `offset`. Field values
/// roll over like [`DateTime::from_fields`], so `2023-02-29` is March 1st.
///
/// # Errors
/// Returns `Error::InvalidFormat` if `s` is not three dash-separated
/// numbers, and `Error::InvalidDate` if the date is out of range.
pub fn from_sql_date(s: &str, offset: UtcOffset) -> Result<DateTime, Error> {
    let [year, month, day] = split_numbers(s.trim(), DATE_SEPARATOR)
        .ok_or_else(|| Error::InvalidFormat(format!("expected YYYY-MM-DD, got {s:?}")))?;
    DateTime::from_fields(Fields::ymd(year, month, day), offset)
}

/// Reads a `YYYY-MM-DD HH:MM:SS` value as local time in `offset`.
///
/// # Errors
/// Returns `Error::InvalidFormat` on malformed input, and
/// `Error::InvalidDate` if the date is out of range.
pub fn from_sql_datetime(s: &str, offset: UtcOffset) -> Result<DateTime, Error> {
    let malformed = || Error::InvalidFormat(format!("expected YYYY-MM-DD HH:MM:SS, got {s:?}"));
    let (date_part, time_part) = s.trim().split_once(' ').ok_or_else(malformed)?;
    let [year, month, day] = split_numbers(date_part, DATE_SEPARATOR).ok_or_else(malformed)?;
    let [hour, minute, second] =
        split_numbers(time_part.trim(), TIME_SEPARATOR).ok_or_else(malformed)?;
    DateTime::from_fields(
        Fields::ymd(year, month, day).with_time(hour, minute, second, 0),
        offset,
    )
}

/// Spreadsheet serial: fractional days since local midnight of
/// 1899-12-30.
#[allow(clippy::cast_precision_loss, reason = "Serials are fractional by nature")]
pub fn to_excel_date(date: DateTime) -> f64 {
    (date.local_ms() - EXCEL_EPOCH_DAYS * MS_PER_DAY) as f64 / MS_PER_DAY as f64
}

/// Inverse of [`to_excel_date`], rounded to the millisecond and read as
/// local time in `offset`.
///
/// # Errors
/// Returns `Error::InvalidDate` for non-finite or out-of-range serials.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    reason = "The magnitude is checked before the cast back"
)]
pub fn from_excel_date(serial: f64, offset: UtcOffset) -> Result<DateTime, Error> {
    let millis = (serial * MS_PER_DAY as f64).round();
    if !millis.is_finite() || millis.abs() > (i64::MAX / 2) as f64 {
        return Err(Error::InvalidDate(format!("spreadsheet serial {serial} out of range")));
    }
    DateTime::from_local_ms(millis as i64 + EXCEL_EPOCH_DAYS * MS_PER_DAY, offset)
}

pub fn to_fields(date: DateTime) -> Fields {
    date.fields()
}

/// # Errors
/// Same as [`DateTime::from_fields`].
pub fn from_fields(fields: Fields, offset: UtcOffset) -> Result<DateTime, Error> {
    DateTime::from_fields(fields, offset)
}

/// `[year, month, day, hour, minute, second, millisecond]`
pub fn to_array(date: DateTime) -> [i64; 7] {
    date.fields().to_array()
}

/// Builds a date from up to seven leading fields in [`to_array`] order.
/// Missing trailing fields default to 1970-01-01 00:00:00.000; anything
/// past the seventh is ignored.
///
/// # Errors
/// Same as [`DateTime::from_fields`].
pub fn from_array(values: &[i64], offset: UtcOffset) -> Result<DateTime, Error> {
    let mut array = Fields::default().to_array();
    for (slot, value) in array.iter_mut().zip(values) {
        *slot = *value;
    }
    let [year, month, day, hour, minute, second, millisecond] = array;
    DateTime::from_fields(
        Fields::ymd(year, month, day).with_time(hour, minute, second, millisecond),
        offset,
    )
}

pub fn to_object(date: DateTime) -> DateObject {
    DateObject {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hours: date.hour(),
        minutes: date.minute(),
        seconds: date.second(),
        milliseconds: date.millisecond(),
        day_of_week: date.weekday(),
        timestamp: date.timestamp_millis(),
        unix_timestamp: to_unix_timestamp(date),
        timezone_offset: date.offset().minutes(),
    }
}

/// Keeps the wall-clock fields and declares them UTC.
///
/// # Errors
/// Returns `Error::InvalidDate` if the shifted instant is out of range.
pub fn to_utc(date: DateTime) -> Result<DateTime, Error> {
    DateTime::from_local_ms(date.local_ms(), UtcOffset::UTC)
}

/// Takes the UTC fields of `date` and declares them local time in
/// `offset`.
///
/// # Errors
/// Returns `Error::InvalidDate` if the shifted instant is out of range.
pub fn from_utc(date: DateTime, offset: UtcOffset) -> Result<DateTime, Error> {
    DateTime::from_local_ms(date.timestamp_millis(), offset)
}

/// `+05:30`
pub fn timezone_offset_string(date: DateTime) -> String {
    date.offset().render(true)
}

/// Free-form options handed to a [`LocaleFormatter`] untouched.
pub type LocaleOptions = BTreeMap<String, String>;

/// Locale-aware rendering supplied by the caller. This crate ships no
/// locale data; the `to_locale_*` functions only forward to it.
pub trait LocaleFormatter {
    fn format_date(&self, date: DateTime, locale: &str, options: &LocaleOptions) -> String;

    fn format_time(&self, date: DateTime, locale: &str, options: &LocaleOptions) -> String;

    fn format_date_time(&self, date: DateTime, locale: &str, options: &LocaleOptions) -> String {
        format!(
            "{}, {}",
            self.format_date(date, locale, options),
            self.format_time(date, locale, options)
        )
    }
}

pub fn to_locale_string(
    date: DateTime,
    formatter: &impl LocaleFormatter,
    locale: &str,
    options: &LocaleOptions,
) -> String {
    formatter.format_date_time(date, locale, options)
}

pub fn to_locale_date_string(
    date: DateTime,
    formatter: &impl LocaleFormatter,
    locale: &str,
    options: &LocaleOptions,
) -> String {
    formatter.format_date(date, locale, options)
}

pub fn to_locale_time_string(
    date: DateTime,
    formatter: &impl LocaleFormatter,
    locale: &str,
    options: &LocaleOptions,
) -> String {
    formatter.format_time(date, locale, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_TIMESTAMP_MS, Weekday};

    fn at(y: i64, mo: i64, d: i64, h: i64, mi: i64, s: i64) -> DateTime {
        DateTime::from_ymd_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn offset(minutes: i32) -> UtcOffset {
        UtcOffset::from_minutes(minutes).unwrap()
    }

    #[test]
    fn test_timestamps() {
        let date = at(2024, 3, 5, 14, 30, 0);
        assert_eq!(to_milliseconds_timestamp(date), 1_709_649_000_000);
        assert_eq!(to_unix_timestamp(date), 1_709_649_000);
        assert_eq!(from_unix_timestamp(1_709_649_000).unwrap(), date);
        assert_eq!(from_milliseconds_timestamp(1_709_649_000_000).unwrap(), date);

        let before_epoch = DateTime::from_millis(-1).unwrap();
        assert_eq!(to_unix_timestamp(before_epoch), -1);

        assert!(from_unix_timestamp(i64::MAX).is_err());
        assert!(from_milliseconds_timestamp(MAX_TIMESTAMP_MS + 1).is_err());
    }

    #[test]
    fn test_string_renderings() {
        let date = at(2024, 3, 5, 14, 30, 0);
        assert_eq!(to_iso_string(date), "2024-03-05T14:30:00.000Z");
        assert_eq!(to_json(date), "2024-03-05T14:30:00.000Z");
        assert_eq!(to_utc_string(date), "Tue, 05 Mar 2024 14:30:00 GMT");
        assert_eq!(to_date_string(date), "Tue Mar 05 2024");
        assert_eq!(to_time_string(date), "14:30:00 GMT+0000");
        assert_eq!(to_rfc2822(date), "Tue, 05 Mar 2024 14:30:00 +0000");
        assert_eq!(to_sql_date(date), "2024-03-05");
        assert_eq!(to_sql_datetime(date), "2024-03-05 14:30:00");
        assert_eq!(to_sql_timestamp(date), "2024-03-05 14:30:00");
    }

    #[test]
    fn test_local_renderings_follow_offset() {
        let date = at(2024, 3, 5, 22, 30, 0).with_offset(offset(330));
        assert_eq!(to_iso_string(date), "2024-03-05T22:30:00.000Z");
        assert_eq!(to_utc_string(date), "Tue, 05 Mar 2024 22:30:00 GMT");
        assert_eq!(to_rfc2822(date), "Wed, 06 Mar 2024 04:00:00 +0530");
        assert_eq!(to_time_string(date), "04:00:00 GMT+0530");
        assert_eq!(to_sql_date(date), "2024-03-06");
        assert_eq!(timezone_offset_string(date), "+05:30");
    }

    #[test]
    fn test_from_sql() {
        assert_eq!(from_sql_date("2024-03-05", UtcOffset::UTC).unwrap(), at(2024, 3, 5, 0, 0, 0));
        assert_eq!(
            from_sql_datetime("2024-03-05 14:30:00", UtcOffset::UTC).unwrap(),
            at(2024, 3, 5, 14, 30, 0)
        );
        assert_eq!(from_sql_date("2023-02-29", UtcOffset::UTC).unwrap(), at(2023, 3, 1, 0, 0, 0));

        let local = from_sql_datetime("2024-03-05 08:00:00", offset(-300)).unwrap();
        assert_eq!(local, at(2024, 3, 5, 13, 0, 0));
        assert_eq!(to_sql_datetime(local), "2024-03-05 08:00:00");
    }

    #[test]
    fn test_from_sql_malformed() {
        for input in ["", "2024-03", "2024/03/05", "2024-03-05-01", "2024-0x-05", "2024--05"] {
            assert!(
                matches!(from_sql_date(input, UtcOffset::UTC), Err(Error::InvalidFormat(_))),
                "{input:?}"
            );
        }
        for input in ["2024-03-05", "2024-03-05T14:30:00", "2024-03-05 14:30", "2024-03-05 14:30:00:00"] {
            assert!(
                matches!(from_sql_datetime(input, UtcOffset::UTC), Err(Error::InvalidFormat(_))),
                "{input:?}"
            );
        }
        assert!(matches!(
            from_sql_date("9999999-01-01", UtcOffset::UTC),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn test_excel_dates() {
        assert!((to_excel_date(at(1899, 12, 30, 0, 0, 0)) - 0.0).abs() < f64::EPSILON);
        assert!((to_excel_date(at(1970, 1, 1, 0, 0, 0)) - 25_569.0).abs() < f64::EPSILON);
        assert!((to_excel_date(at(2024, 3, 5, 12, 0, 0)) - 45_356.5).abs() < f64::EPSILON);

        assert_eq!(from_excel_date(45_356.5, UtcOffset::UTC).unwrap(), at(2024, 3, 5, 12, 0, 0));
        assert_eq!(from_excel_date(1.0, UtcOffset::UTC).unwrap(), at(1899, 12, 31, 0, 0, 0));

        let local = at(2024, 3, 5, 12, 0, 0).with_offset(offset(60));
        assert_eq!(from_excel_date(to_excel_date(local), offset(60)).unwrap(), local);

        assert!(from_excel_date(f64::NAN, UtcOffset::UTC).is_err());
        assert!(from_excel_date(f64::INFINITY, UtcOffset::UTC).is_err());
        assert!(from_excel_date(1e12, UtcOffset::UTC).is_err());
    }

    #[test]
    fn test_arrays_and_fields() {
        let date = DateTime::from_fields(
            Fields::ymd(2024, 3, 5).with_time(14, 30, 15, 250),
            UtcOffset::UTC,
        )
        .unwrap();
        assert_eq!(to_array(date), [2024, 3, 5, 14, 30, 15, 250]);
        assert_eq!(from_array(&to_array(date), UtcOffset::UTC).unwrap(), date);
        assert_eq!(from_fields(to_fields(date), UtcOffset::UTC).unwrap(), date);

        assert_eq!(from_array(&[2024, 3], UtcOffset::UTC).unwrap(), at(2024, 3, 1, 0, 0, 0));
        assert_eq!(from_array(&[], UtcOffset::UTC).unwrap(), DateTime::UNIX_EPOCH);
        assert_eq!(
            from_array(&[2024, 3, 5, 0, 0, 0, 0, 99], UtcOffset::UTC).unwrap(),
            at(2024, 3, 5, 0, 0, 0)
        );
    }

    #[test]
    fn test_to_object() {
        let date = at(2024, 3, 5, 14, 30, 0).with_offset(offset(-60));
        let object = to_object(date);
        assert_eq!(object.year, 2024);
        assert_eq!((object.month, object.day, object.hours), (3, 5, 13));
        assert_eq!(object.day_of_week, Weekday::Tuesday);
        assert_eq!(object.timestamp, 1_709_649_000_000);
        assert_eq!(object.unix_timestamp, 1_709_649_000);
        assert_eq!(object.timezone_offset, -60);

        let json = serde_json::to_value(object).unwrap();
        assert_eq!(json["dayOfWeek"], 2);
        assert_eq!(json["unixTimestamp"], 1_709_649_000);
        assert_eq!(json["timezoneOffset"], -60);
    }

    #[test]
    fn test_utc_reinterpretation() {
        let plus_two = offset(120);
        let date = at(2024, 3, 5, 12, 0, 0).with_offset(plus_two);
        // local 14:00 becomes 14:00Z
        assert_eq!(to_utc(date).unwrap(), at(2024, 3, 5, 14, 0, 0));

        let moved = from_utc(at(2024, 3, 5, 12, 0, 0), plus_two).unwrap();
        assert_eq!((moved.hour(), moved.offset()), (12, plus_two));
        assert_eq!(moved, at(2024, 3, 5, 10, 0, 0));

        let last = DateTime::from_millis(MAX_TIMESTAMP_MS).unwrap();
        assert!(from_utc(last, offset(-60)).is_err());
    }

    struct Bracketed;

    impl LocaleFormatter for Bracketed {
        fn format_date(&self, date: DateTime, locale: &str, options: &LocaleOptions) -> String {
            format!("{locale}:{}:{}", to_sql_date(date), options.len())
        }

        fn format_time(&self, date: DateTime, locale: &str, _options: &LocaleOptions) -> String {
            format!("{locale}:{}", format(date, "HH:mm"))
        }
    }

    #[test]
    fn test_locale_seam_forwards() {
        let date = at(2024, 3, 5, 14, 30, 0);
        let mut options = LocaleOptions::new();
        options.insert("weekday".to_owned(), "long".to_owned());

        assert_eq!(to_locale_date_string(date, &Bracketed, "de-DE", &options), "de-DE:2024-03-05:1");
        assert_eq!(to_locale_time_string(date, &Bracketed, "de-DE", &options), "de-DE:14:30");
        assert_eq!(
            to_locale_string(date, &Bracketed, "en-US", &LocaleOptions::new()),
            "en-US:2024-03-05:0, en-US:14:30"
        );
    }
}
