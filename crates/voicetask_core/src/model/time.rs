//! Validated wall-clock time handling.
//!
//! # Responsibility
//! - Parse the stored `H:MM`/`HH:MM` time strings into an integer
//!   minute-of-day wrapper.
//! - Convert slider positions (minutes since midnight) into display strings.
//!
//! # Invariants
//! - All time comparisons in core go through `minute_of_day()`; stored time
//!   strings are never compared lexicographically.
//! - `TimeOfDay` always holds a value in `[0, 1439]`.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minutes in one day; the upper bound (exclusive) for any minute-of-day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Date format used everywhere a task date is stored or compared.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-layer errors for clock/date string validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Value does not parse as `H:MM`/`HH:MM` with hour 0-23, minute 0-59.
    InvalidClockTime(String),
    /// Value does not parse as a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Slider minutes outside `[0, 1439]`; callers must clamp before use.
    SliderOutOfRange(u16),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidClockTime(value) => {
                write!(f, "invalid clock time `{value}` (expected H:MM or HH:MM)")
            }
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}` (expected YYYY-MM-DD)")
            }
            Self::SliderOutOfRange(minutes) => {
                write!(f, "slider minutes {minutes} outside [0, 1439]")
            }
        }
    }
}

impl Error for TimeError {}

/// Minute-of-day wrapper for scheduling comparisons.
///
/// Stored task times stay as strings at the persistence boundary; this type
/// exists so internal comparisons use integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Parses `H:MM` or `HH:MM` with hour in `[0, 23]` and minute in `[0, 59]`.
    pub fn parse(value: &str) -> Result<Self, TimeError> {
        let invalid = || TimeError::InvalidClockTime(value.to_string());

        let (hour_text, minute_text) = value.trim().split_once(':').ok_or_else(invalid)?;
        if hour_text.is_empty()
            || hour_text.len() > 2
            || minute_text.len() != 2
            || !hour_text.chars().all(|c| c.is_ascii_digit())
            || !minute_text.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hour: u16 = hour_text.parse().map_err(|_| invalid())?;
        let minute: u16 = minute_text.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Builds a time-of-day from raw minutes since midnight.
    ///
    /// Used by the edit-screen slider; the UI steps by 15 up to 1425.
    pub fn from_slider_minutes(minutes: u16) -> Result<Self, TimeError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(TimeError::SliderOutOfRange(minutes));
        }
        Ok(Self { minutes })
    }

    /// Total minutes since midnight.
    pub fn minute_of_day(self) -> u16 {
        self.minutes
    }

    pub fn hour(self) -> u16 {
        self.minutes / 60
    }

    pub fn minute(self) -> u16 {
        self.minutes % 60
    }

    /// Formats as `HH:MM` (both fields zero-padded).
    pub fn format_padded(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// Formats as `H:MM` (hour unpadded).
    ///
    /// This is the slider display shape; stored times written by the edit
    /// screen use it, so parsing must keep accepting single-digit hours.
    pub fn format_compact(self) -> String {
        format!("{}:{:02}", self.hour(), self.minute())
    }
}

/// Classification of a stored optional time string.
///
/// Stored data may contain time strings written by older app builds or by
/// AI extraction; views degrade unparsable values to unscheduled instead of
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeParseOutcome {
    /// No time stored.
    Unscheduled,
    /// A valid wall-clock time.
    Valid(TimeOfDay),
    /// Stored string exists but does not parse.
    Unparsable,
}

/// Parses a stored `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| TimeError::InvalidDate(value.to_string()))
}

/// Formats a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_date, TimeError, TimeOfDay};

    #[test]
    fn parses_padded_and_compact_hours() {
        assert_eq!(TimeOfDay::parse("09:00").unwrap().minute_of_day(), 540);
        assert_eq!(TimeOfDay::parse("9:00").unwrap().minute_of_day(), 540);
        assert_eq!(TimeOfDay::parse("23:59").unwrap().minute_of_day(), 1439);
        assert_eq!(TimeOfDay::parse("0:00").unwrap().minute_of_day(), 0);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(TimeOfDay::parse("24:00").is_err());
        assert!(TimeOfDay::parse("12:60").is_err());
        assert!(TimeOfDay::parse("12").is_err());
        assert!(TimeOfDay::parse("12:5").is_err());
        assert!(TimeOfDay::parse("").is_err());
        assert!(TimeOfDay::parse("ab:cd").is_err());
    }

    #[test]
    fn slider_minutes_are_bounded() {
        assert_eq!(
            TimeOfDay::from_slider_minutes(1425).unwrap().format_compact(),
            "23:45"
        );
        assert_eq!(
            TimeOfDay::from_slider_minutes(1440).unwrap_err(),
            TimeError::SliderOutOfRange(1440)
        );
    }

    #[test]
    fn format_compact_keeps_hour_unpadded() {
        let t = TimeOfDay::from_slider_minutes(0).unwrap();
        assert_eq!(t.format_compact(), "0:00");
        assert_eq!(t.format_padded(), "00:00");
    }

    #[test]
    fn parse_date_validates_shape() {
        assert!(parse_date("2024-01-01").is_ok());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("01/01/2024").is_err());
    }
}
