//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for the UI: envelope structs with an
//!   `ok` flag and a diagnostic message, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Platform side effects (alerts, microphone, camera, the model call)
//!   stay in the host; core returns decisions and parses results.

use chrono::{Local, NaiveDateTime};
use log::info;
use std::path::PathBuf;
use std::sync::OnceLock;
use voicetask_core::db::open_db;
use voicetask_core::extract::{PHOTO_INSTRUCTION, PHOTO_MIME_TYPE, VOICE_INSTRUCTION, VOICE_MIME_TYPE};
use voicetask_core::scheduler::{
    calendar_marks, day_tasks, digest_order, unscheduled_for_day, week_strip, DotColor,
};
use voicetask_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, intake_tasks,
    parse_date, ping as ping_inner, plan_notification_change, quantize_slider_minutes,
    resolve_quick_time, FlowError, NotificationChange, QuickTimeShortcut, SqliteKeyValueStore,
    Task, TaskService,
};

const ENTRY_DB_FILE_NAME: &str = "voicetask_entry.sqlite3";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task record crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    /// Clock time string (`H:MM` or `HH:MM`), absent for unscheduled tasks.
    pub time: Option<String>,
    /// Task date in `YYYY-MM-DD` form.
    pub date: String,
    pub description: String,
    pub has_alert: bool,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    pub ok: bool,
    pub task_id: Option<String>,
    /// Alert handle the host must cancel, when a removed task had one.
    pub cancel_notification_id: Option<String>,
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, task_id: String) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            cancel_notification_id: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            cancel_notification_id: None,
            message: message.into(),
        }
    }
}

/// Cockpit dashboard snapshot: current mission plus the visible queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CockpitSnapshot {
    pub current: Option<TaskItem>,
    pub queue: Vec<TaskItem>,
    /// Total queued tasks, including those beyond the visible slice.
    pub pending: u32,
    pub message: String,
}

/// Builds the cockpit view as of the current local instant.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; an empty snapshot with a message signals failure.
#[flutter_rust_bridge::frb(sync)]
pub fn cockpit_snapshot() -> CockpitSnapshot {
    let now = Local::now().naive_local();
    match with_task_service(now, |service| Ok(service.cockpit_view(now))) {
        Ok(view) => CockpitSnapshot {
            current: view.current.as_ref().map(to_task_item),
            queue: view.queue.iter().map(to_task_item).collect(),
            pending: view.pending as u32,
            message: String::new(),
        },
        Err(err) => CockpitSnapshot {
            current: None,
            queue: Vec::new(),
            pending: 0,
            message: format!("cockpit_snapshot failed: {err}"),
        },
    }
}

/// Resolved quick-time response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickTimeResponse {
    pub ok: bool,
    pub time: Option<String>,
    pub date: String,
    pub label: String,
    pub message: String,
}

/// Resolves a quick-time shortcut token against the current instant.
///
/// Input semantics:
/// - `token`: one of `none|plus1h|morning|afternoon|evening|tomorrow`.
///
/// # FFI contract
/// - Sync, pure; unknown tokens return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_quick_time(token: String) -> QuickTimeResponse {
    let Some(shortcut) = QuickTimeShortcut::from_token(token.as_str()) else {
        return QuickTimeResponse {
            ok: false,
            time: None,
            date: String::new(),
            label: String::new(),
            message: format!("unknown quick-time token `{token}`"),
        };
    };
    let selection = resolve_quick_time(shortcut, Local::now().naive_local());
    QuickTimeResponse {
        ok: true,
        time: selection.time,
        date: selection.date,
        label: selection.label,
        message: String::new(),
    }
}

/// Adds a manually entered task, optionally with a quick-time token.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - Blank titles are rejected with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_task(title: String, quick_time: Option<String>) -> EntryActionResponse {
    let now = Local::now().naive_local();
    let selection = match quick_time {
        Some(token) => match QuickTimeShortcut::from_token(token.as_str()) {
            Some(shortcut) => Some(resolve_quick_time(shortcut, now)),
            None => {
                return EntryActionResponse::failure(format!("unknown quick-time token `{token}`"));
            }
        },
        None => None,
    };

    match with_task_service(now, |service| {
        service.add_manual_task(title.as_str(), selection, now)
    }) {
        Ok(task) => EntryActionResponse::success("Task added.", task.id),
        Err(err) => EntryActionResponse::failure(format!("entry_add_task failed: {err}")),
    }
}

/// Intake response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIntakeResponse {
    pub ok: bool,
    pub tasks: Vec<TaskItem>,
    pub message: String,
}

/// Parses a model response and appends the extracted tasks.
///
/// The host performs the model request (network access lives there) and
/// hands the raw response text to core for strict intake.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Nothing is committed when the response holds no task array.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_intake_response(response_text: String) -> EntryIntakeResponse {
    let now = Local::now().naive_local();
    let result = with_task_service(now, |service| {
        let tasks =
            intake_tasks(response_text.as_str(), now.date()).map_err(FlowError::Extraction)?;
        Ok(service.append_extracted(tasks))
    });

    match result {
        Ok(tasks) => EntryIntakeResponse {
            ok: true,
            tasks: tasks.iter().map(to_task_item).collect(),
            message: format!("Extracted {} task(s).", tasks.len()),
        },
        Err(err) => EntryIntakeResponse {
            ok: false,
            tasks: Vec::new(),
            message: format!("entry_intake_response failed: {err}"),
        },
    }
}

/// Extraction prompt metadata for one capture kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResponse {
    pub ok: bool,
    pub instruction: String,
    pub mime_type: String,
    pub message: String,
}

/// Returns the model instruction and MIME type for `kind` (`voice|photo`).
///
/// # FFI contract
/// - Sync, pure; unknown kinds return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn extraction_prompt(kind: String) -> PromptResponse {
    let (instruction, mime_type) = match kind.as_str() {
        "voice" => (VOICE_INSTRUCTION, VOICE_MIME_TYPE),
        "photo" => (PHOTO_INSTRUCTION, PHOTO_MIME_TYPE),
        other => {
            return PromptResponse {
                ok: false,
                instruction: String::new(),
                mime_type: String::new(),
                message: format!("unknown capture kind `{other}`"),
            };
        }
    };
    PromptResponse {
        ok: true,
        instruction: instruction.to_string(),
        mime_type: mime_type.to_string(),
        message: String::new(),
    }
}

/// Removes a completed task.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - Returns the alert handle the host must cancel, when one existed.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_complete_task(id: String) -> EntryActionResponse {
    remove_task(id, "Task completed.")
}

/// Removes a deleted task; same alert semantics as completion.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_task(id: String) -> EntryActionResponse {
    remove_task(id, "Task deleted.")
}

fn remove_task(id: String, message: &str) -> EntryActionResponse {
    let now = Local::now().naive_local();
    match with_task_service(now, |service| service.remove_for_host(id.as_str())) {
        Ok(removed) => EntryActionResponse {
            ok: true,
            task_id: Some(removed.id),
            cancel_notification_id: removed.notification_id,
            message: message.to_string(),
        },
        Err(err) => EntryActionResponse::failure(format!("remove failed: {err}")),
    }
}

/// Quantized slider time response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizeResponse {
    pub ok: bool,
    pub time: String,
    pub message: String,
}

/// Formats a slider position (minutes since midnight, 15-minute steps)
/// as the stored clock time.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_quantize_time(minutes: u16) -> QuantizeResponse {
    match quantize_slider_minutes(minutes) {
        Ok(time) => QuantizeResponse {
            ok: true,
            time,
            message: String::new(),
        },
        Err(err) => QuantizeResponse {
            ok: false,
            time: String::new(),
            message: format!("entry_quantize_time failed: {err}"),
        },
    }
}

/// Alert transition plan for a pending edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPlanResponse {
    pub ok: bool,
    /// True when the existing alert handle stays untouched.
    pub keep: bool,
    /// Handle the host must cancel before anything else.
    pub cancel_id: Option<String>,
    /// Local wall-clock trigger (`YYYY-MM-DDTHH:MM:SS`) for the new
    /// alert, absent when none must be scheduled.
    pub schedule_at: Option<String>,
    pub message: String,
}

/// Plans the alert change for editing task `id` to `new_time`.
///
/// The host executes the plan against the platform notification API and
/// then commits via [`entry_apply_edit`] with the resulting handle.
///
/// # FFI contract
/// - Sync call, read-only; the task record does not change here.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_plan_alert(id: String, new_time: Option<String>) -> AlertPlanResponse {
    let now = Local::now().naive_local();
    let planned = with_task_service(now, |service| {
        let task = service
            .find(id.as_str())
            .cloned()
            .ok_or_else(|| FlowError::TaskNotFound(id.clone()))?;
        plan_notification_change(
            task.time.as_deref(),
            new_time.as_deref(),
            task.date.as_str(),
            task.notification_id.as_deref(),
            now,
        )
        .map_err(FlowError::Time)
    });

    match planned {
        Ok(NotificationChange::Keep) => AlertPlanResponse {
            ok: true,
            keep: true,
            cancel_id: None,
            schedule_at: None,
            message: String::new(),
        },
        Ok(NotificationChange::Clear { cancel }) => AlertPlanResponse {
            ok: true,
            keep: false,
            cancel_id: cancel,
            schedule_at: None,
            message: String::new(),
        },
        Ok(NotificationChange::Schedule { cancel, trigger }) => AlertPlanResponse {
            ok: true,
            keep: false,
            cancel_id: cancel,
            schedule_at: Some(trigger.format("%Y-%m-%dT%H:%M:%S").to_string()),
            message: String::new(),
        },
        Err(err) => AlertPlanResponse {
            ok: false,
            keep: false,
            cancel_id: None,
            schedule_at: None,
            message: format!("entry_plan_alert failed: {err}"),
        },
    }
}

/// Commits edit-sheet fields after the host executed the alert plan.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_apply_edit(
    id: String,
    title: String,
    description: String,
    time: Option<String>,
    notification_id: Option<String>,
) -> EntryActionResponse {
    let now = Local::now().naive_local();
    match with_task_service(now, |service| {
        service.apply_edit_fields(
            id.as_str(),
            title.as_str(),
            description.as_str(),
            time,
            notification_id,
        )
    }) {
        Ok(task) => EntryActionResponse::success("Task updated.", task.id),
        Err(err) => EntryActionResponse::failure(format!("entry_apply_edit failed: {err}")),
    }
}

/// One cell of the week strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDayItem {
    pub date: String,
    pub day_of_month: u32,
    pub is_selected: bool,
    pub is_today: bool,
    pub has_task: bool,
}

/// Calendar dot mark for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMarkItem {
    pub date: String,
    /// True when the date holds at least one unscheduled task.
    pub attention: bool,
}

/// Schedule screen snapshot for one selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDaySnapshot {
    pub ok: bool,
    pub date: String,
    /// Unscheduled chip row for the date.
    pub unscheduled: Vec<TaskItem>,
    /// Timeline tasks of the date in insertion order.
    pub day: Vec<TaskItem>,
    /// Digest order: unscheduled first, then ascending by time.
    pub digest: Vec<TaskItem>,
    /// Monday-first week strip around the selected date.
    pub week: Vec<WeekDayItem>,
    /// Calendar dot marks across all dates with tasks.
    pub marks: Vec<CalendarMarkItem>,
    pub message: String,
}

/// Builds the schedule screen snapshot for one selected date.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - Malformed dates return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_day(date: String) -> ScheduleDaySnapshot {
    let now = Local::now().naive_local();
    let selected = match parse_date(date.as_str()) {
        Ok(selected) => selected,
        Err(err) => return schedule_day_failure(date, format!("schedule_day failed: {err}")),
    };

    let snapshot = with_task_service(now, |service| {
        let tasks = service.tasks();
        Ok(ScheduleDaySnapshot {
            ok: true,
            unscheduled: collect_items(unscheduled_for_day(tasks, date.as_str())),
            day: collect_items(day_tasks(tasks, date.as_str())),
            digest: collect_items(digest_order(tasks, date.as_str())),
            week: week_strip(tasks, selected, now.date())
                .into_iter()
                .map(|day| WeekDayItem {
                    date: day.date,
                    day_of_month: day.day_of_month,
                    is_selected: day.is_selected,
                    is_today: day.is_today,
                    has_task: day.has_task,
                })
                .collect(),
            marks: calendar_marks(tasks)
                .into_iter()
                .map(|(date, color)| CalendarMarkItem {
                    date,
                    attention: color == DotColor::Attention,
                })
                .collect(),
            date: date.clone(),
            message: String::new(),
        })
    });

    match snapshot {
        Ok(snapshot) => snapshot,
        Err(err) => schedule_day_failure(date, format!("schedule_day failed: {err}")),
    }
}

fn schedule_day_failure(date: String, message: String) -> ScheduleDaySnapshot {
    ScheduleDaySnapshot {
        ok: false,
        date,
        unscheduled: Vec::new(),
        day: Vec::new(),
        digest: Vec::new(),
        week: Vec::new(),
        marks: Vec::new(),
        message,
    }
}

fn collect_items(tasks: Vec<&Task>) -> Vec<TaskItem> {
    tasks.into_iter().map(to_task_item).collect()
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.clone(),
        title: task.title.clone(),
        time: task.time.clone(),
        date: task.date.clone(),
        description: task.description.clone(),
        has_alert: task.notification_id.is_some(),
    }
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            let path = match std::env::var("VOICETASK_DB_PATH") {
                Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
                _ => std::env::temp_dir().join(ENTRY_DB_FILE_NAME),
            };
            info!("event=db_path module=ffi status=ok path={}", path.display());
            path
        })
        .clone()
}

fn with_task_service<T>(
    now: NaiveDateTime,
    f: impl FnOnce(&mut TaskService<SqliteKeyValueStore<'_>>) -> Result<T, FlowError>,
) -> Result<T, String> {
    let db_path = resolve_entry_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("entry DB open failed: {err}"))?;
    let mut service = TaskService::new(SqliteKeyValueStore::new(&conn));
    service.load(now.date());
    f(&mut service).map_err(|err| err.to_string())
}
