/// Milliseconds per second
pub const MS_PER_SECOND: i64 = 1_000;
/// Milliseconds per minute
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds per hour
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds per day
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
/// Milliseconds per week
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Largest representable distance from the Unix epoch, in milliseconds
/// (100,000,000 days either side).
pub const MAX_TIMESTAMP_MS: i64 = 8_640_000_000_000_000;
/// Smallest representable timestamp, in milliseconds
pub const MIN_TIMESTAMP_MS: i64 = -MAX_TIMESTAMP_MS;

/// Largest UTC offset magnitude, in minutes (23:59)
pub const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;
/// Months in a quarter
pub const MONTHS_PER_QUARTER: u8 = 3;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Years in a decade boundary
pub(crate) const DECADE_YEARS: i64 = 10;

/// Days in the 400-year Gregorian cycle
pub(crate) const DAYS_PER_ERA: i64 = 146_097;
/// Day number of 1970-01-01 counted from 0000-03-01
pub(crate) const UNIX_EPOCH_DAY_OFFSET: i64 = 719_468;
/// Weekday index of 1970-01-01 (a Thursday)
pub(crate) const UNIX_EPOCH_WEEKDAY: i64 = 4;

/// Day number of the spreadsheet epoch 1899-12-30 relative to 1970-01-01
pub(crate) const EXCEL_EPOCH_DAYS: i64 = -25_569;

/// Full month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Abbreviated month names, January first
pub const MONTH_SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Full weekday names, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Abbreviated weekday names, Sunday first
pub const WEEKDAY_SHORT_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Two-letter weekday names, Sunday first
pub const WEEKDAY_MIN_NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';

/// Pattern used by `get_time` when none is given
pub const DEFAULT_TIME_PATTERN: &str = "HH:mm:ss";

/// Pattern used by `Today::format` when none is given
pub const DEFAULT_FORMAT_PATTERN: &str = "YYYY-MM-DD";
