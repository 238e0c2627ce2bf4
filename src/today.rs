//! Chainable wrapper over the free functions.
//!
//! [`Today`] pairs a [`DateTime`] with a [`Config`] and dereferences to the
//! date, so the field getters are available directly. Units are taken as
//! strings here and parsed on each call.

use crate::calendar::{days_in_month, is_leap_year};
use crate::{
    Config, DEFAULT_FORMAT_PATTERN, DateObject, DateTime, DifferenceResult, Error, Inclusivity,
    MONTH_NAMES, Unit, Weekday, prelude::*,
};

/// An immutable date with its settings. Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deref, Display)]
#[display(fmt = "{date}")]
pub struct Today {
    #[deref]
    date:   DateTime,
    config: Config,
}

impl Today {
    /// Wraps `date` with the default settings
    pub fn new(date: DateTime) -> Self {
        Self {
            date,
            config: Config::default(),
        }
    }

    /// Same instant with other settings
    pub const fn with_config(self, config: Config) -> Self {
        Self {
            date: self.date,
            config,
        }
    }

    pub const fn date(self) -> DateTime {
        self.date
    }

    pub const fn config(self) -> Config {
        self.config
    }

    const fn wrap(self, date: DateTime) -> Self {
        Self {
            date,
            config: self.config,
        }
    }

    fn wrap_all(self, dates: Vec<DateTime>) -> Vec<Self> {
        dates.into_iter().map(|date| self.wrap(date)).collect()
    }

    /// The wall clock in UTC with default settings
    pub fn now() -> Self {
        Self::now_with(Config::default())
    }

    /// The wall clock read in `config.offset`
    pub fn now_with(config: Config) -> Self {
        Self::new(DateTime::now_with_offset(config.offset)).with_config(config)
    }

    /// Parses an ISO 8601 date or date-time
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` if `s` is not a valid date.
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.parse::<DateTime>().map(Self::new)
    }

    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if the instant is out of range.
    pub fn from_unix_timestamp(seconds: i64) -> Result<Self, Error> {
        crate::from_unix_timestamp(seconds).map(Self::new)
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if the instant is out of range.
    pub fn from_milliseconds(millis: i64) -> Result<Self, Error> {
        crate::from_milliseconds_timestamp(millis).map(Self::new)
    }

    pub fn min(values: &[Self]) -> Option<Self> {
        values.iter().min_by_key(|value| value.date).copied()
    }

    pub fn max(values: &[Self]) -> Option<Self> {
        values.iter().max_by_key(|value| value.date).copied()
    }

    pub const fn days_between(a: Self, b: Self) -> i64 {
        crate::days_between(a.date, b.date)
    }

    pub const fn hours_between(a: Self, b: Self) -> i64 {
        crate::hours_between(a.date, b.date)
    }

    pub const fn minutes_between(a: Self, b: Self) -> i64 {
        crate::minutes_between(a.date, b.date)
    }

    /// # Errors
    /// Returns `Error::InvalidUnit` for an unknown unit, or one `add` does
    /// not accept, and `Error::InvalidDate` if the result is out of range.
    pub fn add(self, amount: i64, unit: &str) -> Result<Self, Error> {
        crate::add(self.date, amount, unit.parse()?).map(|date| self.wrap(date))
    }

    /// # Errors
    /// Same as [`Today::add`].
    pub fn subtract(self, amount: i64, unit: &str) -> Result<Self, Error> {
        crate::subtract(self.date, amount, unit.parse()?).map(|date| self.wrap(date))
    }

    /// Start of the period; weeks begin on the configured day.
    ///
    /// # Errors
    /// Returns `Error::InvalidUnit` for an unknown unit and
    /// `Error::InvalidDate` if the boundary is out of range.
    pub fn start_of(self, unit: &str) -> Result<Self, Error> {
        crate::boundary::start_of_with(self.date, unit.parse()?, self.config.week_start)
            .map(|date| self.wrap(date))
    }

    /// # Errors
    /// Same as [`Today::start_of`].
    pub fn end_of(self, unit: &str) -> Result<Self, Error> {
        crate::boundary::end_of_with(self.date, unit.parse()?, self.config.week_start)
            .map(|date| self.wrap(date))
    }

    /// # Errors
    /// Returns `Error::InvalidUnit` for an unknown unit.
    pub fn is_before(self, other: DateTime, unit: &str) -> Result<bool, Error> {
        Ok(crate::is_before(self.date, other, unit.parse()?))
    }

    /// # Errors
    /// Returns `Error::InvalidUnit` for an unknown unit.
    pub fn is_after(self, other: DateTime, unit: &str) -> Result<bool, Error> {
        Ok(crate::is_after(self.date, other, unit.parse()?))
    }

    /// # Errors
    /// Returns `Error::InvalidUnit` for an unknown unit.
    pub fn is_same(self, other: DateTime, unit: &str) -> Result<bool, Error> {
        Ok(crate::is_same(self.date, other, unit.parse()?))
    }

    /// `inclusivity` is a bracket pair such as `[]` or `(]`.
    pub fn is_between(self, start: DateTime, end: DateTime, inclusivity: &str) -> bool {
        crate::is_between(self.date, start, end, Inclusivity::from_brackets(inclusivity))
    }

    pub fn is_today(self) -> bool {
        crate::is_today(self.date, None)
    }

    pub fn is_yesterday(self) -> bool {
        crate::is_yesterday(self.date, None)
    }

    pub fn is_tomorrow(self) -> bool {
        crate::is_tomorrow(self.date, None)
    }

    pub fn is_weekend(self) -> bool {
        crate::is_weekend(self.date)
    }

    pub fn is_weekday(self) -> bool {
        crate::is_weekday(self.date)
    }

    pub fn is_business_day(self) -> bool {
        crate::is_business_day(self.date)
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if a step leaves the representable range.
    pub fn add_business_days(self, n: i64) -> Result<Self, Error> {
        crate::add_business_days(self.date, n).map(|date| self.wrap(date))
    }

    /// # Errors
    /// Same as [`Today::add_business_days`].
    pub fn next_business_day(self) -> Result<Self, Error> {
        crate::next_business_day(self.date).map(|date| self.wrap(date))
    }

    /// # Errors
    /// Same as [`Today::add_business_days`].
    pub fn previous_business_day(self) -> Result<Self, Error> {
        crate::previous_business_day(self.date).map(|date| self.wrap(date))
    }

    pub fn business_days_diff(self, other: DateTime) -> i64 {
        crate::business_days_diff(self.date, other)
    }

    /// Calendar breakdown of the gap to `other`
    pub fn diff(self, other: DateTime) -> DifferenceResult {
        crate::calendar_diff(self.date, other)
    }

    /// Renders through `pattern`, `YYYY-MM-DD` when `None`.
    pub fn format(self, pattern: Option<&str>) -> String {
        crate::format(self.date, pattern.unwrap_or(DEFAULT_FORMAT_PATTERN))
    }

    pub fn get_time(self, pattern: Option<&str>) -> String {
        crate::get_time(self.date, pattern)
    }

    pub fn format_relative(self) -> String {
        crate::format_relative(self.date, None)
    }

    pub fn from_now(self) -> String {
        crate::from_now(self.date, None)
    }

    pub fn calendar(self) -> String {
        crate::calendar(self.date, None)
    }

    pub fn to_iso_string(self) -> String {
        crate::to_iso_string(self.date)
    }

    pub const fn to_unix_timestamp(self) -> i64 {
        crate::to_unix_timestamp(self.date)
    }

    pub fn to_object(self) -> DateObject {
        crate::to_object(self.date)
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if a date is out of range.
    pub fn last_n_days(self, n: usize) -> Result<Vec<Self>, Error> {
        crate::last_n_days(self.date, n).map(|dates| self.wrap_all(dates))
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if a date is out of range.
    pub fn last_n_weeks(self, n: usize) -> Result<Vec<Self>, Error> {
        crate::last_n_weeks(self.date, n).map(|dates| self.wrap_all(dates))
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if a date is out of range.
    pub fn last_n_months(self, n: usize) -> Result<Vec<Self>, Error> {
        crate::last_n_months(self.date, n).map(|dates| self.wrap_all(dates))
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if a date is out of range.
    pub fn next_n_days(self, n: usize) -> Result<Vec<Self>, Error> {
        crate::next_n_days(self.date, n).map(|dates| self.wrap_all(dates))
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if a date is out of range.
    pub fn all_days_in_month(self) -> Result<Vec<Self>, Error> {
        crate::all_days_in_month(self.date).map(|dates| self.wrap_all(dates))
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if a date is out of range.
    pub fn weekdays_in_month(self) -> Result<Vec<Self>, Error> {
        crate::weekdays_in_month(self.date).map(|dates| self.wrap_all(dates))
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if a date is out of range.
    pub fn weekends_in_month(self) -> Result<Vec<Self>, Error> {
        crate::weekends_in_month(self.date).map(|dates| self.wrap_all(dates))
    }

    pub fn day_of_year(self) -> u16 {
        crate::day_of_year(self.date)
    }

    pub fn quarter(self) -> u8 {
        crate::quarter(self.date)
    }

    /// ISO 8601 week number
    pub fn week_of_year(self) -> u8 {
        crate::iso_week_of_year(self.date)
    }

    pub fn week_of_month(self) -> u8 {
        crate::week_of_month(self.date)
    }

    pub fn days_in_month(self) -> u8 {
        days_in_month(self.date.year(), self.date.month())
    }

    pub fn is_leap_year(self) -> bool {
        is_leap_year(self.date.year())
    }

    pub fn day_name(self) -> &'static str {
        self.date.weekday().name()
    }

    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.date.month() - 1)]
    }

    pub fn is_odd_date(self) -> bool {
        self.date.day() % 2 == 1
    }

    pub fn is_even_date(self) -> bool {
        self.date.day() % 2 == 0
    }

    pub fn is_am(self) -> bool {
        self.date.hour() < 12
    }

    pub fn is_pm(self) -> bool {
        self.date.hour() >= 12
    }

    /// Exactly 00:00:00.000
    pub fn is_midnight(self) -> bool {
        self.date.time_of_day_ms() == 0
    }

    /// 12:00:00, at any millisecond
    pub fn is_noon(self) -> bool {
        (self.date.hour(), self.date.minute(), self.date.second()) == (12, 0, 0)
    }

    /// English ordinal suffix of the day of the month
    pub fn ordinal_suffix(self) -> &'static str {
        match self.date.day() {
            11..=13 => "th",
            day if day % 10 == 1 => "st",
            day if day % 10 == 2 => "nd",
            day if day % 10 == 3 => "rd",
            _ => "th",
        }
    }

    /// "1st", "22nd", "13th"
    pub fn day_with_ordinal(self) -> String {
        format!("{}{}", self.date.day(), self.ordinal_suffix())
    }

    /// "Q1" to "Q4"
    pub fn quarter_name(self) -> String {
        format!("Q{}", self.quarter())
    }

    /// # Errors
    /// Returns `Error::InvalidDate` if the result is out of range. The same
    /// holds for the other `n_*` helpers.
    pub fn n_days_ago(self, n: i64) -> Result<Self, Error> {
        self.shift_back(n, Unit::Day)
    }

    pub fn n_weeks_ago(self, n: i64) -> Result<Self, Error> {
        self.shift_back(n, Unit::Week)
    }

    pub fn n_months_ago(self, n: i64) -> Result<Self, Error> {
        self.shift_back(n, Unit::Month)
    }

    pub fn n_years_ago(self, n: i64) -> Result<Self, Error> {
        self.shift_back(n, Unit::Year)
    }

    pub fn n_days_ahead(self, n: i64) -> Result<Self, Error> {
        self.shift(n, Unit::Day)
    }

    pub fn n_weeks_ahead(self, n: i64) -> Result<Self, Error> {
        self.shift(n, Unit::Week)
    }

    pub fn n_months_ahead(self, n: i64) -> Result<Self, Error> {
        self.shift(n, Unit::Month)
    }

    pub fn n_years_ahead(self, n: i64) -> Result<Self, Error> {
        self.shift(n, Unit::Year)
    }

    fn shift(self, amount: i64, unit: Unit) -> Result<Self, Error> {
        crate::add(self.date, amount, unit).map(|date| self.wrap(date))
    }

    fn shift_back(self, amount: i64, unit: Unit) -> Result<Self, Error> {
        crate::subtract(self.date, amount, unit).map(|date| self.wrap(date))
    }

    /// Same day at the given local time. Values roll over like
    /// [`DateTime::from_fields`].
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` if the result is out of range.
    pub fn set_time(self, hour: i64, minute: i64, second: i64, millisecond: i64) -> Result<Self, Error> {
        let fields = self.date.fields().with_time(hour, minute, second, millisecond);
        DateTime::from_fields(fields, self.date.offset()).map(|date| self.wrap(date))
    }

    pub fn week_start(self) -> Weekday {
        self.config.week_start
    }
}

impl From<DateTime> for Today {
    fn from(date: DateTime) -> Self {
        Self::new(date)
    }
}

impl From<Today> for DateTime {
    fn from(today: Today) -> Self {
        today.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fields, UtcOffset};

    fn today(y: i64, mo: i64, d: i64, h: i64, mi: i64, s: i64) -> Today {
        Today::new(DateTime::from_ymd_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn test_deref_getters() {
        let value = today(2024, 3, 5, 14, 30, 15);
        assert_eq!(value.year(), 2024);
        assert_eq!((value.month(), value.day()), (3, 5));
        assert_eq!(value.weekday(), Weekday::Tuesday);
        assert_eq!(value.to_string(), "2024-03-05T14:30:15.000Z");
    }

    #[test]
    fn test_string_units() {
        let value = today(2024, 1, 31, 0, 0, 0);
        assert_eq!(value.add(1, "months").unwrap().date(), DateTime::from_ymd(2024, 3, 2).unwrap());
        assert_eq!(value.subtract(2, "Days").unwrap().day(), 29);
        assert_eq!(
            value.add(1, "fortnight"),
            Err(Error::InvalidUnit("fortnight".to_owned()))
        );
        assert!(matches!(value.add(1, "decade"), Err(Error::InvalidUnit(_))));
        assert!(matches!(value.start_of("eon"), Err(Error::InvalidUnit(_))));
        assert!(matches!(value.is_same(value.date(), "nope"), Err(Error::InvalidUnit(_))));
    }

    #[test]
    fn test_week_start_from_config() {
        // Tuesday
        let value = today(2024, 3, 5, 12, 0, 0);
        assert_eq!(value.start_of("week").unwrap().day(), 3);

        let monday_weeks = value.with_config(Config::new(Weekday::Monday, UtcOffset::UTC));
        let start = monday_weeks.start_of("week").unwrap();
        assert_eq!((start.day(), start.hour()), (4, 0));
        assert_eq!(start.config(), monday_weeks.config());
        let end = monday_weeks.end_of("week").unwrap();
        assert_eq!((end.day(), end.hour(), end.millisecond()), (10, 23, 999));
    }

    #[test]
    fn test_comparisons() {
        let value = today(2024, 3, 5, 9, 0, 0);
        let later = DateTime::from_ymd_hms(2024, 3, 5, 18, 0, 0).unwrap();
        assert!(value.is_before(later, "hour").unwrap());
        assert!(!value.is_before(later, "day").unwrap());
        assert!(value.is_same(later, "day").unwrap());
        assert!(!value.is_after(later, "millisecond").unwrap());

        let start = DateTime::from_ymd(2024, 3, 1).unwrap();
        assert!(value.is_between(start, later, "[]"));
        assert!(!value.is_between(value.date(), later, "()"));
    }

    #[test]
    fn test_statics() {
        let parsed = Today::parse("2024-03-05T14:30:00Z").unwrap();
        assert_eq!(parsed.hour(), 14);
        assert!(Today::is_valid("2024-02-29"));
        assert!(!Today::is_valid("2023-02-29"));
        assert!(matches!(Today::parse("nope"), Err(Error::InvalidDate(_))));

        assert_eq!(
            Today::from_unix_timestamp(1_709_649_000).unwrap(),
            Today::from_milliseconds(1_709_649_000_000).unwrap()
        );

        let a = today(2024, 3, 5, 0, 0, 0);
        let b = today(2024, 3, 7, 12, 30, 0);
        assert_eq!(Today::min(&[b, a]), Some(a));
        assert_eq!(Today::max(&[b, a]), Some(b));
        assert_eq!(Today::max(&[]), None);
        assert_eq!(Today::days_between(a, b), 2);
        assert_eq!(Today::hours_between(a, b), 60);
        assert_eq!(Today::minutes_between(b, a), 3_630);
    }

    #[test]
    fn test_now_with_config() {
        let config = Config::new(Weekday::Monday, UtcOffset::from_minutes(-300).unwrap());
        let now = Today::now_with(config);
        assert_eq!(now.offset(), config.offset);
        assert_eq!(now.week_start(), Weekday::Monday);
        assert!(now.is_today());
        assert_eq!(Today::now().config(), Config::default());
    }

    #[test]
    fn test_business_and_ranges() {
        // Friday
        let friday = today(2024, 3, 8, 10, 0, 0);
        assert_eq!(friday.next_business_day().unwrap().day(), 11);
        assert_eq!(friday.add_business_days(3).unwrap().day(), 13);
        assert_eq!(friday.previous_business_day().unwrap().day(), 7);
        assert!(friday.is_business_day());
        assert_eq!(friday.business_days_diff(DateTime::from_ymd(2024, 3, 15).unwrap()), 5);

        assert_eq!(friday.last_n_days(3).unwrap().len(), 3);
        assert_eq!(friday.next_n_days(2).unwrap()[1].day(), 10);
        assert_eq!(friday.all_days_in_month().unwrap().len(), 31);
        assert_eq!(friday.weekdays_in_month().unwrap().len(), 21);
        assert_eq!(friday.weekends_in_month().unwrap().len(), 10);
        assert_eq!(friday.last_n_weeks(2).unwrap()[0].day(), 1);
        assert_eq!(friday.last_n_months(2).unwrap()[0].month(), 2);
    }

    #[test]
    fn test_formatting() {
        let value = today(2024, 3, 5, 14, 30, 0);
        assert_eq!(value.format(None), "2024-03-05");
        assert_eq!(value.format(Some("MMMM D")), "March 5");
        assert_eq!(value.get_time(None), "14:30:00");
        assert_eq!(value.to_iso_string(), "2024-03-05T14:30:00.000Z");
        assert_eq!(value.to_unix_timestamp(), 1_709_649_000);
        assert_eq!(value.to_object().minutes, 30);
        assert_eq!(value.diff(DateTime::from_ymd(2024, 4, 6).unwrap()).months, 1);
    }

    #[test]
    fn test_calendar_info() {
        let value = today(2024, 2, 10, 9, 0, 0);
        assert_eq!(value.day_of_year(), 41);
        assert_eq!(value.quarter(), 1);
        assert_eq!(value.quarter_name(), "Q1");
        assert_eq!(value.days_in_month(), 29);
        assert!(value.is_leap_year());
        assert_eq!(value.day_name(), "Saturday");
        assert_eq!(value.month_name(), "February");
        assert!(value.is_weekend());
        assert!(!value.is_weekday());
        assert_eq!(value.week_of_year(), 6);
    }

    #[test]
    fn test_small_predicates() {
        let morning = today(2024, 3, 5, 0, 0, 0);
        assert!(morning.is_odd_date());
        assert!(!morning.is_even_date());
        assert!(morning.is_am());
        assert!(morning.is_midnight());
        assert!(!morning.is_noon());

        let noon = today(2024, 3, 6, 12, 0, 0);
        assert!(noon.is_even_date());
        assert!(noon.is_pm());
        assert!(noon.is_noon());
        assert!(!noon.is_midnight());
    }

    #[test]
    fn test_ordinals() {
        struct TestCase {
            day:      i64,
            expected: &'static str,
        }

        let cases = [
            TestCase { day: 1, expected: "1st" },
            TestCase { day: 2, expected: "2nd" },
            TestCase { day: 3, expected: "3rd" },
            TestCase { day: 4, expected: "4th" },
            TestCase { day: 11, expected: "11th" },
            TestCase { day: 12, expected: "12th" },
            TestCase { day: 13, expected: "13th" },
            TestCase { day: 21, expected: "21st" },
            TestCase { day: 22, expected: "22nd" },
            TestCase { day: 23, expected: "23rd" },
            TestCase { day: 30, expected: "30th" },
            TestCase { day: 31, expected: "31st" },
        ];

        for case in &cases {
            assert_eq!(today(2024, 1, case.day, 0, 0, 0).day_with_ordinal(), case.expected);
        }
    }

    #[test]
    fn test_n_ago_and_ahead() {
        let value = today(2024, 3, 31, 8, 0, 0);
        assert_eq!(value.n_days_ago(31).unwrap().date(), DateTime::from_ymd_hms(2024, 2, 29, 8, 0, 0).unwrap());
        assert_eq!(value.n_weeks_ago(1).unwrap().day(), 24);
        assert_eq!(value.n_months_ago(1).unwrap().date(), DateTime::from_ymd_hms(2024, 3, 2, 8, 0, 0).unwrap());
        assert_eq!(value.n_years_ago(4).unwrap().year(), 2020);
        assert_eq!(value.n_days_ahead(1).unwrap().month(), 4);
        assert_eq!(value.n_weeks_ahead(1).unwrap().day(), 7);
        assert_eq!(value.n_months_ahead(2).unwrap().day(), 31);
        assert_eq!(value.n_years_ahead(1).unwrap().year(), 2025);
        assert!(value.n_years_ahead(1_000_000).is_err());
    }

    #[test]
    fn test_n_ago_extreme_counts() {
        let value = today(2024, 3, 5, 0, 0, 0);
        assert!(matches!(value.n_days_ago(i64::MIN), Err(Error::InvalidDate(_))));
        assert!(matches!(value.n_weeks_ago(i64::MIN), Err(Error::InvalidDate(_))));
        assert!(matches!(value.n_months_ago(i64::MIN), Err(Error::InvalidDate(_))));
        assert!(matches!(value.n_years_ago(i64::MIN), Err(Error::InvalidDate(_))));
        assert!(matches!(value.n_days_ahead(i64::MAX), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn test_set_time() {
        let offset = UtcOffset::from_minutes(60).unwrap();
        let value = Today::new(
            DateTime::from_fields(Fields::ymd(2024, 3, 5).with_time(22, 0, 0, 0), offset).unwrap(),
        );
        let set = value.set_time(7, 15, 0, 0).unwrap();
        assert_eq!((set.day(), set.hour(), set.minute()), (5, 7, 15));
        assert_eq!(set.offset(), offset);
        assert_eq!(value.hour(), 22);

        let rolled = value.set_time(24, 0, 0, 0).unwrap();
        assert_eq!((rolled.day(), rolled.hour()), (6, 0));
    }

    #[test]
    fn test_conversions() {
        let date = DateTime::from_ymd(2024, 3, 5).unwrap();
        let value: Today = date.into();
        assert_eq!(DateTime::from(value), date);
        assert_eq!(*value, date);
    }
}
