//! Pure scheduling logic.
//!
//! # Responsibility
//! - Decide which task the cockpit presents as the current mission.
//! - Resolve quick-time shortcuts and edit-slider values to concrete times.
//! - Plan notification changes when a task's time is edited.
//! - Derive the day/week/month schedule views.
//!
//! # Invariants
//! - Everything in this module is a deterministic function of its inputs
//!   (task list and `now`); side effects live behind boundary traits.

pub mod edit;
pub mod quick_time;
pub mod select;
pub mod view;

pub use edit::{plan_notification_change, quantize_slider_minutes, NotificationChange};
pub use quick_time::{resolve_quick_time, QuickTimeSelection, QuickTimeShortcut};
pub use select::{select_current, CurrentSelection, GRACE_MINUTES};
pub use view::{
    calendar_marks, day_tasks, digest_order, tasks_for_hour, unscheduled_for_day, week_strip,
    DotColor, WeekDay,
};
