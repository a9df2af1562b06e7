//! Scheduled-alert boundary.
//!
//! # Responsibility
//! - Define the contract the host platform's notification API implements.
//!
//! # Invariants
//! - Fire-and-forget: scheduling returns a handle with no delivery
//!   confirmation, and cancellation is best-effort.

use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Alert title shown when a task's time arrives; the body is the task title.
pub const ALERT_TITLE: &str = "Time's up!";

/// Notification-layer error. Never retried; callers either surface it or
/// log and move on (cancel paths).
#[derive(Debug)]
pub struct NotifyError {
    pub message: String,
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification call failed: {}", self.message)
    }
}

impl Error for NotifyError {}

/// Platform notification boundary.
pub trait Notifier {
    /// Schedules one alert at `trigger` and returns its opaque handle.
    fn schedule(
        &self,
        trigger: NaiveDateTime,
        title: &str,
        body: &str,
    ) -> Result<String, NotifyError>;

    /// Cancels a previously scheduled alert.
    fn cancel(&self, handle: &str) -> Result<(), NotifyError>;
}
