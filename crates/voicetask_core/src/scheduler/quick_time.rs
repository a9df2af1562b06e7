//! Quick-time shortcut resolution for the manual entry sheet.
//!
//! # Responsibility
//! - Translate a named shortcut into a concrete time/date pair plus a
//!   display label, given the current instant.
//!
//! # Invariants
//! - Resolution is a pure function of `(shortcut, now)`.
//! - Fixed shortcuts (`morning` etc.) ignore the current time-of-day.

use crate::model::time::format_date;
use chrono::{Duration, NaiveDateTime};

/// Named shortcut buttons on the manual entry sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickTimeShortcut {
    /// Leave the task unscheduled.
    Unscheduled,
    /// One hour from now.
    PlusOneHour,
    /// Today 09:00.
    Morning,
    /// Today 13:00.
    Afternoon,
    /// Today 18:00.
    Evening,
    /// Tomorrow 09:00.
    TomorrowMorning,
}

impl QuickTimeShortcut {
    /// Parses the wire token used by the UI layer.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "none" => Some(Self::Unscheduled),
            "plus1h" => Some(Self::PlusOneHour),
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            "tomorrow" => Some(Self::TomorrowMorning),
            _ => None,
        }
    }
}

/// Resolved shortcut: what gets written to the task plus the chip label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickTimeSelection {
    /// `HH:MM` time string, `None` for unscheduled.
    pub time: Option<String>,
    /// `YYYY-MM-DD` target date.
    pub date: String,
    /// Human-readable confirmation label.
    pub label: String,
}

/// Resolves a quick-time shortcut against the current instant.
pub fn resolve_quick_time(shortcut: QuickTimeShortcut, now: NaiveDateTime) -> QuickTimeSelection {
    let today = format_date(now.date());
    match shortcut {
        QuickTimeShortcut::Unscheduled => QuickTimeSelection {
            time: None,
            date: today,
            label: "unscheduled".to_string(),
        },
        QuickTimeShortcut::PlusOneHour => {
            // The date follows the shifted instant, so a capture just before
            // midnight lands on the next day instead of earlier today.
            let shifted = now + Duration::hours(1);
            let time = shifted.format("%H:%M").to_string();
            QuickTimeSelection {
                label: format!("today {time}"),
                time: Some(time),
                date: format_date(shifted.date()),
            }
        }
        QuickTimeShortcut::Morning => QuickTimeSelection {
            time: Some("09:00".to_string()),
            date: today,
            label: "this morning (9:00)".to_string(),
        },
        QuickTimeShortcut::Afternoon => QuickTimeSelection {
            time: Some("13:00".to_string()),
            date: today,
            label: "this afternoon (13:00)".to_string(),
        },
        QuickTimeShortcut::Evening => QuickTimeSelection {
            time: Some("18:00".to_string()),
            date: today,
            label: "this evening (18:00)".to_string(),
        },
        QuickTimeShortcut::TomorrowMorning => QuickTimeSelection {
            time: Some("09:00".to_string()),
            date: format_date(now.date() + Duration::days(1)),
            label: "tomorrow morning (9:00)".to_string(),
        },
    }
}
