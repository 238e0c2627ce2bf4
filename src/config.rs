use serde::{Deserialize, Serialize};

use crate::{UtcOffset, Weekday};

/// Settings carried by a [`Today`](crate::Today) value.
///
/// There is no process-wide configuration; callers build one of these (or
/// deserialize it) and hand it to [`Today::now_with`](crate::Today::now_with)
/// or [`Today::with_config`](crate::Today::with_config). Missing keys take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// First day of the week for week boundaries
    pub week_start: Weekday,
    /// Offset used when reading the clock
    pub offset: UtcOffset,
}

impl Config {
    pub const fn new(week_start: Weekday, offset: UtcOffset) -> Self {
        Self { week_start, offset }
    }
}
