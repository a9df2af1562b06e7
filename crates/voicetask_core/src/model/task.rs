//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical record created by voice/photo capture and manual
//!   entry, and rendered by the cockpit and schedule screens.
//! - Preserve the stored JSON shape field-for-field across round-trips.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `time`, when present, is an `H:MM`/`HH:MM` wall-clock string.
//! - At most one notification handle is outstanding per task.

use crate::model::time::{TimeOfDay, TimeParseOutcome};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder title substituted when AI extraction returns an empty or
/// missing title.
pub const UNTITLED_PLACEHOLDER: &str = "(untitled)";

/// One captured task.
///
/// Serialized field names match the stored JSON array exactly; legacy
/// records written before the `description`/`notificationId` fields existed
/// deserialize with defaults and are patched by the store on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id. New tasks get a UUIDv4 string; ids imported from
    /// older installs may have other shapes and are kept verbatim.
    pub id: String,
    /// Display text; never empty for tasks created through core APIs.
    pub title: String,
    /// Wall-clock time string, or `None` for unscheduled tasks.
    #[serde(default)]
    pub time: Option<String>,
    /// `YYYY-MM-DD` day the task belongs to.
    #[serde(default)]
    pub date: String,
    /// Free-form detail text.
    #[serde(default)]
    pub description: String,
    /// Handle of the scheduled alert for `date`+`time`, if any.
    #[serde(rename = "notificationId", default)]
    pub notification_id: Option<String>,
}

impl Task {
    /// Creates an unscheduled task dated `date` with a fresh id.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            time: None,
            date: crate::model::time::format_date(date),
            description: String::new(),
            notification_id: None,
        }
    }

    /// Parsed minute-of-day of `time`.
    ///
    /// Returns `None` both for unscheduled tasks and for tasks whose stored
    /// time string does not parse; selection logic treats the latter as
    /// unscheduled rather than failing the whole view.
    pub fn minute_of_day(&self) -> Option<u16> {
        match self.time_of_day() {
            TimeParseOutcome::Valid(t) => Some(t.minute_of_day()),
            _ => None,
        }
    }

    /// Classifies the stored time string.
    pub fn time_of_day(&self) -> TimeParseOutcome {
        match self.time.as_deref() {
            None => TimeParseOutcome::Unscheduled,
            Some(raw) => match TimeOfDay::parse(raw) {
                Ok(t) => TimeParseOutcome::Valid(t),
                Err(_) => TimeParseOutcome::Unparsable,
            },
        }
    }

    /// Whether the task belongs to `date` (string compare on the canonical
    /// `YYYY-MM-DD` shape).
    pub fn is_on_date(&self, date: &str) -> bool {
        self.date == date
    }
}
