//! Clock-time value types.
//!
//! All times in the system are naive local wall-clock values carried as
//! 24-hour `"HH:MM"` strings at the API and storage boundary; dates are
//! `"YYYY-MM-DD"` (`chrono::NaiveDate`'s serde form). Inside the
//! scheduling core both are converted once at the edge: times become
//! minutes-since-midnight, so the slot math never touches strings.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Weekday index convention, pinned: Monday = 0 .. Sunday = 6.
///
/// This matches Python's `date.weekday()`, which the stored weekly
/// patterns were written against. Do not swap in a Sunday-first
/// convention; it would silently shift every weekly default.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// A time of day as minutes since midnight.
///
/// Half of the scheduling bugs in systems like this come from comparing
/// `"9:00"` with `"10:00"` lexically; `TimeOfDay` makes the comparison a
/// plain integer one. Serializes as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    pub const fn from_hm(hours: u16, minutes: u16) -> Self {
        Self(hours * 60 + minutes)
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub fn from_naive(t: NaiveTime) -> Self {
        Self((t.hour() * 60 + t.minute()) as u16)
    }

    /// Saturating add of a duration in minutes.
    pub fn plus(self, minutes: u16) -> Self {
        Self(self.0.saturating_add(minutes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day: {0:?}")]
pub struct ParseTimeError(String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| ParseTimeError(s.to_string()))?;
        let hours: u16 = h.parse().map_err(|_| ParseTimeError(s.to_string()))?;
        let minutes: u16 = m.parse().map_err(|_| ParseTimeError(s.to_string()))?;
        if hours > 23 || minutes > 59 {
            return Err(ParseTimeError(s.to_string()));
        }
        Ok(Self::from_hm(hours, minutes))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Half-open interval `[start, end)` within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Parse both endpoints, or nothing. Used for stored break columns
    /// where either endpoint may be missing or garbled.
    pub fn parse_opt(start: Option<&str>, end: Option<&str>) -> Option<Self> {
        let start = start?.parse().ok()?;
        let end = end?.parse().ok()?;
        Some(Self { start, end })
    }

    /// A window that can never contain a slot.
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }

    /// Half-open overlap: `max(starts) < min(ends)`.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hhmm() {
        let t: TimeOfDay = "09:05".parse().unwrap();
        assert_eq!(t.minutes(), 9 * 60 + 5);
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn rejects_out_of_range() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("noon".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn window_overlap_is_half_open() {
        let a = TimeWindow::new(TimeOfDay::from_hm(9, 0), TimeOfDay::from_hm(10, 0));
        let b = TimeWindow::new(TimeOfDay::from_hm(10, 0), TimeOfDay::from_hm(11, 0));
        let c = TimeWindow::new(TimeOfDay::from_hm(9, 30), TimeOfDay::from_hm(10, 30));
        assert!(!a.overlaps(&b)); // adjacent, not overlapping
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn parse_opt_requires_both_endpoints() {
        assert!(TimeWindow::parse_opt(Some("12:00"), Some("12:30")).is_some());
        assert!(TimeWindow::parse_opt(Some("12:00"), None).is_none());
        assert!(TimeWindow::parse_opt(None, Some("12:30")).is_none());
        assert!(TimeWindow::parse_opt(Some("garbage"), Some("12:30")).is_none());
    }

    #[test]
    fn monday_is_zero() {
        // 2024-01-01 was a Monday.
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), 0);
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()), 6);
    }
}
