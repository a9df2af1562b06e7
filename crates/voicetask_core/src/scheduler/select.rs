//! Current-mission selection for the cockpit dashboard.
//!
//! # Responsibility
//! - Pick the task presented as "current" and order the remaining queue.
//!
//! # Invariants
//! - Selection never mutates the task list; ordering is derived.
//! - A task stays current for up to [`GRACE_MINUTES`] after its time has
//!   passed, even when a later task exists the same day.

use crate::model::task::Task;
use crate::model::time::format_date;
use chrono::{NaiveDateTime, Timelike};

/// How long a scheduled task keeps the cockpit slot after its time passes.
pub const GRACE_MINUTES: i32 = 30;

/// Result of [`select_current`]: the cockpit slot plus the remaining queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSelection<'a> {
    /// The current mission, `None` only for an empty list.
    pub current: Option<&'a Task>,
    /// Every other task, most recently captured first.
    pub queue: Vec<&'a Task>,
}

/// Selects the cockpit's current mission.
///
/// Among today's scheduled tasks (ascending by minute-of-day), the first
/// one not yet past by more than [`GRACE_MINUTES`] wins. When no scheduled
/// task qualifies, the most recently captured task takes the slot, so a
/// fresh unscheduled capture is immediately visible.
///
/// Tasks with unparsable time strings count as unscheduled here.
pub fn select_current(tasks: &[Task], now: NaiveDateTime) -> CurrentSelection<'_> {
    let today = format_date(now.date());
    let now_minutes = (now.hour() * 60 + now.minute()) as i32;
    let threshold = now_minutes - GRACE_MINUTES;

    let mut today_scheduled: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.is_on_date(&today) && task.minute_of_day().is_some())
        .collect();
    today_scheduled.sort_by_key(|task| task.minute_of_day());

    let upcoming = today_scheduled
        .into_iter()
        .find(|task| task.minute_of_day().is_some_and(|m| i32::from(m) >= threshold));

    match upcoming {
        Some(current) => {
            let queue = tasks
                .iter()
                .rev()
                .filter(|task| task.id != current.id)
                .collect();
            CurrentSelection {
                current: Some(current),
                queue,
            }
        }
        None => {
            let mut reversed = tasks.iter().rev();
            let current = reversed.next();
            CurrentSelection {
                current,
                queue: reversed.collect(),
            }
        }
    }
}
