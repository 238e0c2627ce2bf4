//! Token-based formatting and human-readable phrases.
//!
//! Patterns are scanned once, left to right. At each position the longest
//! token that matches is rendered; any other character is copied as is, and
//! text inside `[...]` is copied without the brackets. Rendered output is
//! never rescanned, so a month name containing `M` or `D` stays intact.

use std::borrow::Cow;

use crate::convert::to_iso_string;
use crate::{
    DEFAULT_TIME_PATTERN, DateTime, MONTH_NAMES, MONTH_SHORT_NAMES, MS_PER_SECOND,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year,
    YearShort,
    MonthName,
    MonthShortName,
    MonthPadded,
    Month,
    DayPadded,
    Day,
    WeekdayName,
    WeekdayShortName,
    WeekdayMinName,
    Hour24Padded,
    Hour24,
    Hour12Padded,
    Hour12,
    MinutePadded,
    Minute,
    SecondPadded,
    Second,
    Millisecond,
    MeridiemUpper,
    MeridiemLower,
    OffsetCompact,
    Offset,
}

/// Longer tokens come before their prefixes.
const TOKENS: [(&str, Token); 24] = [
    ("YYYY", Token::Year),
    ("YY", Token::YearShort),
    ("MMMM", Token::MonthName),
    ("MMM", Token::MonthShortName),
    ("MM", Token::MonthPadded),
    ("M", Token::Month),
    ("DD", Token::DayPadded),
    ("D", Token::Day),
    ("dddd", Token::WeekdayName),
    ("ddd", Token::WeekdayShortName),
    ("dd", Token::WeekdayMinName),
    ("HH", Token::Hour24Padded),
    ("H", Token::Hour24),
    ("hh", Token::Hour12Padded),
    ("h", Token::Hour12),
    ("mm", Token::MinutePadded),
    ("m", Token::Minute),
    ("ss", Token::SecondPadded),
    ("s", Token::Second),
    ("SSS", Token::Millisecond),
    ("A", Token::MeridiemUpper),
    ("a", Token::MeridiemLower),
    ("ZZ", Token::OffsetCompact),
    ("Z", Token::Offset),
];

fn render(token: Token, date: DateTime) -> Cow<'static, str> {
    let hour = date.hour();
    let hour12 = if hour % 12 == 0 { 12 } else { hour % 12 };
    let month_index = usize::from(date.month() - 1);
    match token {
        Token::Year => pad_year(date.year()).into(),
        Token::YearShort => format!("{:02}", date.year().rem_euclid(100)).into(),
        Token::MonthName => MONTH_NAMES[month_index].into(),
        Token::MonthShortName => MONTH_SHORT_NAMES[month_index].into(),
        Token::MonthPadded => format!("{:02}", date.month()).into(),
        Token::Month => date.month().to_string().into(),
        Token::DayPadded => format!("{:02}", date.day()).into(),
        Token::Day => date.day().to_string().into(),
        Token::WeekdayName => date.weekday().name().into(),
        Token::WeekdayShortName => date.weekday().short_name().into(),
        Token::WeekdayMinName => date.weekday().min_name().into(),
        Token::Hour24Padded => format!("{hour:02}").into(),
        Token::Hour24 => hour.to_string().into(),
        Token::Hour12Padded => format!("{hour12:02}").into(),
        Token::Hour12 => hour12.to_string().into(),
        Token::MinutePadded => format!("{:02}", date.minute()).into(),
        Token::Minute => date.minute().to_string().into(),
        Token::SecondPadded => format!("{:02}", date.second()).into(),
        Token::Second => date.second().to_string().into(),
        Token::Millisecond => format!("{:03}", date.millisecond()).into(),
        Token::MeridiemUpper => (if hour >= 12 { "PM" } else { "AM" }).into(),
        Token::MeridiemLower => (if hour >= 12 { "pm" } else { "am" }).into(),
        Token::OffsetCompact => date.offset().render(false).into(),
        Token::Offset => date.offset().render(true).into(),
    }
}

/// Four-digit year, with a leading `-` before year zero.
fn pad_year(year: i64) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    }
}

/// Renders `date` through `pattern`.
///
/// | Token | Output |
/// |-------|--------|
/// | `YYYY` / `YY` | `2024` / `24` |
/// | `MMMM` / `MMM` / `MM` / `M` | `March` / `Mar` / `03` / `3` |
/// | `DD` / `D` | `05` / `5` |
/// | `dddd` / `ddd` / `dd` | `Tuesday` / `Tue` / `Tu` |
/// | `HH` / `H` / `hh` / `h` | `14` / `14` / `02` / `2` |
/// | `mm` / `m` / `ss` / `s` / `SSS` | minutes, seconds, milliseconds |
/// | `A` / `a` | `PM` / `pm` |
/// | `ZZ` / `Z` | `+0530` / `+05:30` |
///
/// An empty pattern, or one with no token outside brackets, yields the ISO
/// string instead.
pub fn format(date: DateTime, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut matched = false;
    let mut rest = pattern;

    'scan: while let Some(c) = rest.chars().next() {
        if c == '[' {
            match rest[1..].find(']') {
                Some(close) => {
                    out.push_str(&rest[1..=close]);
                    rest = &rest[close + 2..];
                }
                None => {
                    out.push_str(&rest[1..]);
                    rest = "";
                }
            }
            continue;
        }
        for (text, token) in TOKENS {
            if let Some(after) = rest.strip_prefix(text) {
                out.push_str(&render(token, date));
                matched = true;
                rest = after;
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if !matched {
        tracing::debug!(pattern, "no format tokens, falling back to ISO");
        return to_iso_string(date);
    }
    out
}

/// "March 5, 2024"
pub fn format_long(date: DateTime) -> String {
    format(date, "MMMM D, YYYY")
}

/// "03/05/2024"
pub fn format_short(date: DateTime) -> String {
    format(date, "MM/DD/YYYY")
}

/// Time of day through `pattern`, `HH:mm:ss` when `None`.
pub fn get_time(date: DateTime, pattern: Option<&str>) -> String {
    format(date, pattern.unwrap_or(DEFAULT_TIME_PATTERN))
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

fn reference_or_now(date: DateTime, reference: Option<DateTime>) -> DateTime {
    reference.unwrap_or_else(|| DateTime::now_with_offset(date.offset()))
}

/// Phrase such as "in 3 days" or "2 hours ago" for the gap from
/// `reference` (the wall clock when `None`) to `date`.
///
/// Gaps under a minute are "just now". Weeks cover 7 to 29 days, 30-day
/// months cover up to 364 days, then 365-day years.
pub fn format_relative(date: DateTime, reference: Option<DateTime>) -> String {
    let reference = reference_or_now(date, reference);
    let gap = date.timestamp_millis() - reference.timestamp_millis();
    let seconds = gap.abs() / MS_PER_SECOND;
    if seconds < 60 {
        return "just now".to_owned();
    }
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let amount = if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else if days < 30 {
        plural(days / 7, "week")
    } else if days < 365 {
        plural(days / 30, "month")
    } else {
        plural(days / 365, "year")
    };

    if gap > 0 {
        format!("in {amount}")
    } else {
        format!("{amount} ago")
    }
}

/// Phrase such as "5 minutes ago" or "2 days from now".
///
/// Unlike [`format_relative`] there is no "just now" and no week bucket:
/// days run up to 29, then 30-day months up to 11, then 365-day years.
/// A date equal to the reference reads "0 seconds from now".
pub fn from_now(date: DateTime, reference: Option<DateTime>) -> String {
    let reference = reference_or_now(date, reference);
    let gap = reference.timestamp_millis() - date.timestamp_millis();
    let seconds = gap.abs() / MS_PER_SECOND;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let months = days / 30;

    let amount = if seconds < 60 {
        plural(seconds, "second")
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 30 {
        plural(days, "day")
    } else if months < 12 {
        plural(months, "month")
    } else {
        plural(days / 365, "year")
    };
    let suffix = if gap > 0 { "ago" } else { "from now" };
    format!("{amount} {suffix}")
}

/// Breaks a millisecond length into `1d 2h 3m`, `2h 3m 4s`, `3m 4s` or
/// `4s`, using the two or three largest units present.
pub fn format_duration(milliseconds: u64) -> String {
    let seconds = milliseconds / 1_000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{days}d {}h {}m", hours % 24, minutes % 60)
    } else if hours > 0 {
        format!("{hours}h {}m {}s", minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{minutes}m {}s", seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

/// "Today at 2:30 PM", "Yesterday at ...", "Tomorrow at ...", the weekday
/// name for the rest of the coming week, otherwise the full date.
pub fn calendar(date: DateTime, reference: Option<DateTime>) -> String {
    let reference = reference_or_now(date, reference).with_offset(date.offset());
    let delta = date.local_days() - reference.local_days();
    match delta {
        0 => format!("Today at {}", get_time(date, Some("h:mm A"))),
        -1 => format!("Yesterday at {}", get_time(date, Some("h:mm A"))),
        1 => format!("Tomorrow at {}", get_time(date, Some("h:mm A"))),
        2..=6 => format(date, "dddd [at] h:mm A"),
        _ => format(date, "MMM D, YYYY [at] h:mm A"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fields, UtcOffset};

    fn at(y: i64, mo: i64, d: i64, h: i64, mi: i64, s: i64, ms: i64) -> DateTime {
        DateTime::from_fields(Fields::ymd(y, mo, d).with_time(h, mi, s, ms), UtcOffset::UTC)
            .unwrap()
    }

    #[test]
    fn test_tokens() {
        struct TestCase {
            pattern:  &'static str,
            expected: &'static str,
        }

        let date = at(2024, 3, 5, 14, 7, 9, 45);
        let cases = [
            TestCase {
                pattern:  "YYYY-MM-DD HH:mm:ss.SSS",
                expected: "2024-03-05 14:07:09.045",
            },
            TestCase {
                pattern:  "YY M D H m s",
                expected: "24 3 5 14 7 9",
            },
            TestCase {
                pattern:  "MMMM MMM",
                expected: "March Mar",
            },
            TestCase {
                pattern:  "dddd ddd dd",
                expected: "Tuesday Tue Tu",
            },
            TestCase {
                pattern:  "hh:mm A / h a",
                expected: "02:07 PM / 2 pm",
            },
            TestCase {
                pattern:  "Z ZZ",
                expected: "+00:00 +0000",
            },
            TestCase {
                pattern:  "[Today is] dddd",
                expected: "Today is Tuesday",
            },
            TestCase {
                pattern:  "DD/MM [unclosed MM",
                expected: "05/03 unclosed MM",
            },
        ];

        for case in &cases {
            assert_eq!(format(date, case.pattern), case.expected, "{}", case.pattern);
        }
    }

    #[test]
    fn test_every_token_in_one_pattern() {
        let offset = UtcOffset::from_minutes(330).unwrap();
        let date = DateTime::from_fields(Fields::ymd(2009, 8, 3).with_time(9, 4, 6, 7), offset).unwrap();
        assert_eq!(
            format(date, "YYYY YY MMMM MMM MM M DD D dddd ddd dd HH H hh h mm m ss s SSS A a ZZ Z"),
            "2009 09 August Aug 08 8 03 3 Monday Mon Mo 09 9 09 9 04 4 06 6 007 AM am +0530 +05:30"
        );
    }

    #[test]
    fn test_output_is_not_rescanned() {
        // "March" and "May" contain token letters
        let date = at(2024, 5, 1, 0, 0, 0, 0);
        assert_eq!(format(date, "MMMM D"), "May 1");
        assert_eq!(format(at(2024, 3, 1, 0, 0, 0, 0), "MMMM"), "March");
        assert_eq!(format(date, "dddd"), "Wednesday");
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(format(at(2024, 3, 5, 0, 5, 0, 0), "h:mm A"), "12:05 AM");
        assert_eq!(format(at(2024, 3, 5, 12, 0, 0, 0), "h:mm A"), "12:00 PM");
        assert_eq!(format(at(2024, 3, 5, 23, 0, 0, 0), "hh a"), "11 pm");
    }

    #[test]
    fn test_year_padding() {
        assert_eq!(format(at(987, 1, 1, 0, 0, 0, 0), "YYYY YY"), "0987 87");
        assert_eq!(format(at(2005, 1, 1, 0, 0, 0, 0), "YY"), "05");
        assert_eq!(format(at(-44, 3, 15, 0, 0, 0, 0), "YYYY"), "-0044");
    }

    #[test]
    fn test_offset_tokens() {
        let offset = UtcOffset::from_minutes(-(3 * 60 + 30)).unwrap();
        let date = at(2024, 3, 5, 12, 0, 0, 0).with_offset(offset);
        assert_eq!(format(date, "HH:mm Z"), "08:30 -03:30");
        assert_eq!(format(date, "ZZ"), "-0330");
    }

    #[test]
    fn test_iso_fallback() {
        let date = at(2024, 3, 5, 14, 30, 0, 0);
        assert_eq!(format(date, ""), "2024-03-05T14:30:00.000Z");
        assert_eq!(format(date, "[literal only]"), "2024-03-05T14:30:00.000Z");
        assert_eq!(format(date, "---"), "2024-03-05T14:30:00.000Z");
    }

    #[test]
    fn test_derived_formats() {
        let date = at(2024, 3, 5, 14, 30, 15, 0);
        assert_eq!(format_long(date), "March 5, 2024");
        assert_eq!(format_short(date), "03/05/2024");
        assert_eq!(get_time(date, None), "14:30:15");
        assert_eq!(get_time(date, Some("h:mm a")), "2:30 pm");
    }

    #[test]
    fn test_format_relative() {
        struct TestCase {
            date:     DateTime,
            expected: &'static str,
        }

        let reference = at(2024, 3, 15, 12, 0, 0, 0);
        let cases = [
            TestCase {
                date:     at(2024, 3, 15, 12, 0, 30, 0),
                expected: "just now",
            },
            TestCase {
                date:     at(2024, 3, 15, 11, 59, 0, 0),
                expected: "1 minute ago",
            },
            TestCase {
                date:     at(2024, 3, 15, 12, 45, 0, 0),
                expected: "in 45 minutes",
            },
            TestCase {
                date:     at(2024, 3, 15, 9, 0, 0, 0),
                expected: "3 hours ago",
            },
            TestCase {
                date:     at(2024, 3, 17, 12, 0, 0, 0),
                expected: "in 2 days",
            },
            TestCase {
                date:     at(2024, 3, 1, 12, 0, 0, 0),
                expected: "2 weeks ago",
            },
            TestCase {
                date:     at(2024, 5, 15, 12, 0, 0, 0),
                expected: "in 2 months",
            },
            TestCase {
                date:     at(2022, 3, 1, 12, 0, 0, 0),
                expected: "2 years ago",
            },
            TestCase {
                date:     at(2025, 3, 15, 12, 0, 0, 0),
                expected: "in 1 year",
            },
        ];

        for case in &cases {
            assert_eq!(format_relative(case.date, Some(reference)), case.expected, "{}", case.date);
        }
    }

    #[test]
    fn test_from_now() {
        let reference = at(2024, 3, 15, 12, 0, 0, 0);
        assert_eq!(from_now(at(2024, 3, 15, 11, 59, 59, 0), Some(reference)), "1 second ago");
        assert_eq!(from_now(reference, Some(reference)), "0 seconds from now");
        assert_eq!(from_now(at(2024, 3, 15, 12, 5, 0, 0), Some(reference)), "5 minutes from now");
        assert_eq!(from_now(at(2024, 3, 5, 12, 0, 0, 0), Some(reference)), "10 days ago");
        assert_eq!(from_now(at(2024, 7, 15, 12, 0, 0, 0), Some(reference)), "4 months from now");
        assert_eq!(from_now(at(2020, 3, 15, 12, 0, 0, 0), Some(reference)), "4 years ago");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59_999), "59s");
        assert_eq!(format_duration(61_000), "1m 1s");
        assert_eq!(format_duration(3_723_000), "1h 2m 3s");
        assert_eq!(format_duration(90_061_000), "1d 1h 1m");
    }

    #[test]
    fn test_calendar() {
        // Tuesday noon
        let reference = at(2024, 3, 5, 12, 0, 0, 0);
        let now = Some(reference);
        assert_eq!(calendar(at(2024, 3, 5, 8, 5, 0, 0), now), "Today at 8:05 AM");
        assert_eq!(calendar(at(2024, 3, 4, 23, 0, 0, 0), now), "Yesterday at 11:00 PM");
        assert_eq!(calendar(at(2024, 3, 6, 0, 0, 0, 0), now), "Tomorrow at 12:00 AM");
        assert_eq!(calendar(at(2024, 3, 8, 14, 30, 0, 0), now), "Friday at 2:30 PM");
        assert_eq!(calendar(at(2024, 3, 12, 9, 0, 0, 0), now), "Mar 12, 2024 at 9:00 AM");
        assert_eq!(calendar(at(2024, 3, 1, 9, 0, 0, 0), now), "Mar 1, 2024 at 9:00 AM");
    }
}
