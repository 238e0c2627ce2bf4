//! Error types for the today crate.

/// Error type for all fallible operations on [`DateTime`](crate::DateTime).
///
/// Arithmetic and boundary functions fail loudly with one of these variants.
/// Formatting never does; see [`format`](crate::format()).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// A unit name outside the recognized set, or a unit the operation
    /// does not support.
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    /// A timestamp or field combination outside the representable range,
    /// or an unparseable date string.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A UTC offset beyond +/-23:59.
    #[error("Invalid UTC offset: {0} minutes (must be within +/-1439)")]
    InvalidOffset(i32),

    /// A weekday index above 6.
    #[error("Invalid weekday: {0} (must be 0-6)")]
    InvalidWeekday(u8),

    /// A string that does not match the expected layout.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
}
