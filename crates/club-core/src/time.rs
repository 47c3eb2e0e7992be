//! Minutes-since-midnight time codec.
//!
//! The log format carries times as strict two-digit `HH:MM` fields. Inside
//! the simulator a time is a single bounded scalar so that session math is
//! plain integer arithmetic.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Minutes in a full day; all valid times are strictly below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2})$").expect("valid regex"));

/// A time of day in minutes since midnight, always `< 1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Minutes(u16);

impl Minutes {
    /// Creates a time from a raw minute count, rejecting values past the day.
    pub const fn new(total: u16) -> Option<Self> {
        if total < MINUTES_PER_DAY {
            Some(Self(total))
        } else {
            None
        }
    }

    /// Creates a time from hour and minute components.
    ///
    /// Returns `None` for out-of-range components (`hour > 23` or
    /// `minute > 59`).
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > 23 || minute > 59 {
            None
        } else {
            Some(Self(hour * 60 + minute))
        }
    }

    /// Raw minute count since midnight.
    pub const fn total(self) -> u16 {
        self.0
    }

    /// Whole minutes from `self` to `later`; zero if `later` is earlier.
    pub const fn minutes_until(self, later: Self) -> u32 {
        later.0.saturating_sub(self.0) as u32
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for Minutes {
    type Err = InvalidTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = TIME_RE.captures(s).ok_or_else(|| InvalidTime(s.to_string()))?;
        // Two-digit fields always fit in u16.
        let hour: u16 = caps[1].parse().expect("two digits");
        let minute: u16 = caps[2].parse().expect("two digits");
        Self::from_hm(hour, minute).ok_or_else(|| InvalidTime(s.to_string()))
    }
}

impl Serialize for Minutes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Error type for strings that are not a valid `HH:MM` time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTime(String);

impl fmt::Display for InvalidTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time of day: {}", self.0)
    }
}

impl std::error::Error for InvalidTime {}
