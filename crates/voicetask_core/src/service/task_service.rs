//! Task use-case service.
//!
//! # Responsibility
//! - Provide the mutation commands behind both screens: manual entry,
//!   extraction intake, edit-save, completion and deletion.
//! - Drive the notification boundary according to edit-time plans.
//!
//! # Invariants
//! - All list mutations go through the store's write-through commands.
//! - Notification cancel failures never block a mutation; schedule
//!   failures surface to the caller.

use crate::model::task::Task;
use crate::model::time::format_date;
use crate::notify::{Notifier, ALERT_TITLE};
use crate::scheduler::{
    plan_notification_change, quantize_slider_minutes, select_current, NotificationChange,
    QuickTimeSelection,
};
use crate::service::FlowError;
use crate::store::{KeyValueStore, TaskStore};
use chrono::{NaiveDate, NaiveDateTime};
use log::{error, info, warn};

/// Queue entries shown under the cockpit's current mission.
pub const COCKPIT_QUEUE_LIMIT: usize = 3;

/// Dashboard projection: the current mission plus the visible queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CockpitView {
    pub current: Option<Task>,
    /// Up to [`COCKPIT_QUEUE_LIMIT`] queued tasks, newest capture first.
    pub queue: Vec<Task>,
    /// Total number of queued tasks (beyond the visible slice).
    pub pending: usize,
}

/// Fields collected by the edit sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    /// Slider position in minutes since midnight; `None` when the time
    /// switch is off.
    pub slider_minutes: Option<u16>,
}

/// Use-case wrapper owning the session's task state.
pub struct TaskService<S: KeyValueStore> {
    store: TaskStore<S>,
}

impl<S: KeyValueStore> TaskService<S> {
    /// Creates a service over the given persistence backend.
    pub fn new(backend: S) -> Self {
        Self {
            store: TaskStore::new(backend),
        }
    }

    /// Loads persisted tasks.
    ///
    /// Persistence read failures are logged and swallowed: the session
    /// starts empty and in-memory state stays authoritative.
    pub fn load(&mut self, today: NaiveDate) -> usize {
        match self.store.load(today) {
            Ok(count) => count,
            Err(err) => {
                error!(
                    "event=tasks_load module=service status=error error_code=load_failed error={err}"
                );
                0
            }
        }
    }

    /// Tasks in insertion order (read-only).
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Looks up one task by id.
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.store.find(id)
    }

    /// Appends a manually entered task.
    ///
    /// # Contract
    /// - `title` is trimmed; blank input is rejected.
    /// - Without a quick-time selection the task is unscheduled today.
    pub fn add_manual_task(
        &mut self,
        title: &str,
        quick_time: Option<QuickTimeSelection>,
        now: NaiveDateTime,
    ) -> Result<Task, FlowError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(FlowError::EmptyTitle);
        }

        let mut task = Task::new(title, now.date());
        if let Some(selection) = quick_time {
            task.time = selection.time;
            task.date = selection.date;
        }

        info!(
            "event=task_add module=service status=ok source=manual scheduled={}",
            task.time.is_some()
        );
        self.store.append(task.clone());
        Ok(task)
    }

    /// Appends already-parsed extraction results in arrival order.
    pub fn append_extracted(&mut self, tasks: Vec<Task>) -> Vec<Task> {
        info!(
            "event=task_add module=service status=ok source=extraction count={}",
            tasks.len()
        );
        self.store.append_all(tasks.clone());
        tasks
    }

    /// Removes a completed task and drops its pending alert.
    pub fn complete_task(&mut self, id: &str, notifier: &dyn Notifier) -> Result<Task, FlowError> {
        self.remove_task(id, notifier, "task_complete")
    }

    /// Removes a deleted task and drops its pending alert.
    pub fn delete_task(&mut self, id: &str, notifier: &dyn Notifier) -> Result<Task, FlowError> {
        self.remove_task(id, notifier, "task_delete")
    }

    /// Removes a task for a host that cancels alerts itself.
    ///
    /// The returned record still carries `notification_id` so the host
    /// can cancel the platform alert after the removal committed.
    pub fn remove_for_host(&mut self, id: &str) -> Result<Task, FlowError> {
        let removed = self
            .store
            .remove(id)
            .ok_or_else(|| FlowError::TaskNotFound(id.to_string()))?;
        info!("event=task_remove module=service status=ok source=host");
        Ok(removed)
    }

    fn remove_task(
        &mut self,
        id: &str,
        notifier: &dyn Notifier,
        event: &'static str,
    ) -> Result<Task, FlowError> {
        let removed = self
            .store
            .remove(id)
            .ok_or_else(|| FlowError::TaskNotFound(id.to_string()))?;

        if let Some(handle) = removed.notification_id.as_deref() {
            cancel_best_effort(notifier, handle);
        }
        info!("event={event} module=service status=ok");
        Ok(removed)
    }

    /// Applies the edit sheet: title, description and slider time.
    ///
    /// The notification plan is computed first, and a replacement alert is
    /// scheduled before the old one is canceled; the stored record only
    /// changes after the notifier accepted the new alert (or none was
    /// needed), so the task never points at a canceled or unscheduled
    /// alert.
    pub fn save_task_edit(
        &mut self,
        id: &str,
        edit: &TaskEdit,
        notifier: &dyn Notifier,
        now: NaiveDateTime,
    ) -> Result<Task, FlowError> {
        let mut task = self
            .store
            .find(id)
            .cloned()
            .ok_or_else(|| FlowError::TaskNotFound(id.to_string()))?;

        let new_time = match edit.slider_minutes {
            Some(minutes) => Some(quantize_slider_minutes(minutes)?),
            None => None,
        };

        let plan = plan_notification_change(
            task.time.as_deref(),
            new_time.as_deref(),
            &task.date,
            task.notification_id.as_deref(),
            now,
        )?;

        task.notification_id = match plan {
            NotificationChange::Keep => task.notification_id,
            NotificationChange::Clear { cancel } => {
                if let Some(handle) = cancel.as_deref() {
                    cancel_best_effort(notifier, handle);
                }
                None
            }
            NotificationChange::Schedule { cancel, trigger } => {
                // Schedule the replacement before touching the old alert;
                // a notifier failure then leaves the existing alert and its
                // stored handle intact.
                let new_handle = notifier.schedule(trigger, ALERT_TITLE, edit.title.trim())?;
                if let Some(handle) = cancel.as_deref() {
                    cancel_best_effort(notifier, handle);
                }
                Some(new_handle)
            }
        };

        task.title = edit.title.trim().to_string();
        task.description = edit.description.clone();
        task.time = new_time;

        if !self.store.update(task.clone()) {
            return Err(FlowError::TaskNotFound(id.to_string()));
        }
        info!(
            "event=task_edit module=service status=ok scheduled={} has_alert={}",
            task.time.is_some(),
            task.notification_id.is_some()
        );
        Ok(task)
    }

    /// Applies already-decided edit fields, including the alert handle.
    ///
    /// Used by hosts that execute the notification plan themselves (the
    /// platform alert API lives outside this process): the host calls
    /// [`plan_notification_change`] via the FFI layer, drives its own
    /// notifier, then commits the final field values here.
    pub fn apply_edit_fields(
        &mut self,
        id: &str,
        title: &str,
        description: &str,
        time: Option<String>,
        notification_id: Option<String>,
    ) -> Result<Task, FlowError> {
        let mut task = self
            .store
            .find(id)
            .cloned()
            .ok_or_else(|| FlowError::TaskNotFound(id.to_string()))?;

        task.title = title.trim().to_string();
        task.description = description.to_string();
        task.time = time;
        task.notification_id = notification_id;

        if !self.store.update(task.clone()) {
            return Err(FlowError::TaskNotFound(id.to_string()));
        }
        info!(
            "event=task_edit module=service status=ok source=host scheduled={} has_alert={}",
            task.time.is_some(),
            task.notification_id.is_some()
        );
        Ok(task)
    }

    /// Builds the cockpit dashboard projection.
    pub fn cockpit_view(&self, now: NaiveDateTime) -> CockpitView {
        let selection = select_current(self.store.tasks(), now);
        let pending = selection.queue.len();
        CockpitView {
            current: selection.current.cloned(),
            queue: selection
                .queue
                .into_iter()
                .take(COCKPIT_QUEUE_LIMIT)
                .cloned()
                .collect(),
            pending,
        }
    }

    /// Today's canonical `YYYY-MM-DD` string for callers mapping instants
    /// to task dates.
    pub fn today_string(now: NaiveDateTime) -> String {
        format_date(now.date())
    }
}

// An orphaned cancel only risks a spurious alert; the edit itself must not
// fail because of it.
fn cancel_best_effort(notifier: &dyn Notifier, handle: &str) {
    if let Err(err) = notifier.cancel(handle) {
        warn!(
            "event=alert_cancel module=service status=error error_code=cancel_failed error={err}"
        );
    }
}
