//! Core domain logic for VoiceTask.
//! This crate is the single source of truth for task state, scheduling
//! rules and boundary contracts; the mobile shell stays a thin renderer.

pub mod capture;
pub mod db;
pub mod extract;
pub mod logging;
pub mod model;
pub mod notify;
pub mod scheduler;
pub mod service;
pub mod store;

pub use capture::{AudioRecorder, CaptureDevice, CaptureError, CapturedMedia, PhotoCamera};
pub use extract::{intake_tasks, ExtractionBackend, ExtractionError, ExtractionRequest};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::Task;
pub use model::time::{format_date, parse_date, TimeError, TimeOfDay};
pub use notify::{Notifier, NotifyError, ALERT_TITLE};
pub use scheduler::{
    plan_notification_change, quantize_slider_minutes, resolve_quick_time, select_current,
    NotificationChange, QuickTimeSelection, QuickTimeShortcut,
};
pub use service::capture_service::{capture_photo_tasks, finish_voice_capture};
pub use service::task_service::{CockpitView, TaskEdit, TaskService, COCKPIT_QUEUE_LIMIT};
pub use service::FlowError;
pub use store::{KeyValueStore, SqliteKeyValueStore, StoreError, TaskStore, TASKS_KEY};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
