//! Edit-screen save rules: slider quantization and notification planning.
//!
//! # Responsibility
//! - Convert the time slider position into the stored time string.
//! - Decide what happens to a task's scheduled alert when its time changes.
//!
//! # Invariants
//! - Planning is decision-only; cancel/schedule calls belong to the
//!   `Notifier` boundary.
//! - A trigger at or before `now` is never scheduled.

use crate::model::time::{parse_date, TimeError, TimeOfDay};
use chrono::NaiveDateTime;

/// Formats a slider position (minutes since midnight, UI steps of 15) as
/// the stored `H:MM` time string.
///
/// # Errors
/// - `TimeError::SliderOutOfRange` for values outside `[0, 1439]`; callers
///   clamp before handing values in.
pub fn quantize_slider_minutes(minutes: u16) -> Result<String, TimeError> {
    Ok(TimeOfDay::from_slider_minutes(minutes)?.format_compact())
}

/// Planned alert transition for a task-time edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationChange {
    /// Time unchanged: the existing handle stays as-is.
    Keep,
    /// Cancel the old alert (when present); no new alert. The task's
    /// resulting handle is `None`.
    Clear { cancel: Option<String> },
    /// Cancel the old alert (when present), then schedule a new one at
    /// `trigger`. The task's resulting handle is whatever the notifier
    /// returns.
    Schedule {
        cancel: Option<String>,
        trigger: NaiveDateTime,
    },
}

/// Decides the alert transition for an edit changing `old_time` to
/// `new_time` on `date`.
///
/// Past or present triggers resolve to [`NotificationChange::Clear`]:
/// editing a task back to a time that has already passed silently drops
/// the alert instead of firing immediately.
///
/// # Errors
/// - `TimeError` when `date` or a present `new_time` does not parse; both
///   come from validated UI state, so this indicates a caller bug.
pub fn plan_notification_change(
    old_time: Option<&str>,
    new_time: Option<&str>,
    date: &str,
    existing_handle: Option<&str>,
    now: NaiveDateTime,
) -> Result<NotificationChange, TimeError> {
    if new_time == old_time {
        return Ok(NotificationChange::Keep);
    }

    let cancel = existing_handle.map(str::to_string);
    let Some(new_time) = new_time else {
        return Ok(NotificationChange::Clear { cancel });
    };

    let time = TimeOfDay::parse(new_time)?;
    let day = parse_date(date)?;
    let trigger = day
        .and_hms_opt(u32::from(time.hour()), u32::from(time.minute()), 0)
        .unwrap_or_else(|| day.and_time(chrono::NaiveTime::MIN));

    if trigger > now {
        Ok(NotificationChange::Schedule { cancel, trigger })
    } else {
        Ok(NotificationChange::Clear { cancel })
    }
}
