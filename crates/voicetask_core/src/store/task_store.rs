//! In-memory task list with write-through persistence.
//!
//! # Responsibility
//! - Own the session's task list in insertion order.
//! - Serialize the whole list to the key-value boundary after every
//!   successful mutation.
//!
//! # Invariants
//! - Stored order is insertion order; display orders are derived by views
//!   and never written back.
//! - A failed save is logged (`event=tasks_save`) and does not undo the
//!   in-memory mutation.

use crate::model::task::Task;
use crate::model::time::format_date;
use crate::store::kv::{KeyValueStore, StoreError, StoreResult};
use chrono::NaiveDate;
use log::{error, info, warn};

/// Storage key holding the serialized task array.
///
/// Kept identical to the key written by earlier app versions so existing
/// installs keep their data.
pub const TASKS_KEY: &str = "my-voice-tasks";

/// Session-lifetime task state container.
///
/// The UI event loop is the only mutation path, so no interior locking is
/// needed; the container is plain `&mut` state.
pub struct TaskStore<S: KeyValueStore> {
    backend: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Creates an empty store over the given persistence backend.
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            tasks: Vec::new(),
        }
    }

    /// Loads the persisted task list, replacing in-memory state.
    ///
    /// Records written by older builds may lack `date` or `description`;
    /// they are patched on load (`date` defaults to `today`, `description`
    /// to empty), matching what the schedule screen has always done.
    ///
    /// # Errors
    /// - `StoreError::Db` when the backend read fails.
    /// - `StoreError::InvalidData` when the stored JSON does not decode.
    ///   Callers log and continue with an empty list; storage stays intact
    ///   until the next successful mutation.
    pub fn load(&mut self, today: NaiveDate) -> StoreResult<usize> {
        let Some(raw) = self.backend.get(TASKS_KEY)? else {
            self.tasks.clear();
            info!("event=tasks_load module=store status=ok count=0 source=empty");
            return Ok(0);
        };

        let mut tasks: Vec<Task> = serde_json::from_str(&raw).map_err(|err| {
            StoreError::InvalidData(format!("stored task array does not parse: {err}"))
        })?;

        let today_str = format_date(today);
        let mut patched = 0usize;
        for task in &mut tasks {
            if task.date.trim().is_empty() {
                task.date = today_str.clone();
                patched += 1;
            }
        }
        if patched > 0 {
            warn!("event=tasks_load module=store status=ok patched_dates={patched}");
        }

        let count = tasks.len();
        self.tasks = tasks;
        info!("event=tasks_load module=store status=ok count={count}");
        Ok(count)
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Looks up one task by id.
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends one task and persists.
    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
        self.persist();
    }

    /// Appends extracted tasks in their arrival order and persists once.
    pub fn append_all(&mut self, tasks: Vec<Task>) {
        if tasks.is_empty() {
            return;
        }
        self.tasks.extend(tasks);
        self.persist();
    }

    /// Replaces the task with the same id. Returns `false` when absent.
    pub fn update(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(slot) => {
                *slot = task;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Removes a task by id (completion and deletion both end here).
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks.remove(index);
        self.persist();
        Some(removed)
    }

    // Fire-and-forget whole-list save. A crash between the mutation and this
    // write loses at most the latest change.
    fn persist(&self) {
        let payload = match serde_json::to_string(&self.tasks) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event=tasks_save module=store status=error error_code=serialize_failed error={err}"
                );
                return;
            }
        };

        match self.backend.set(TASKS_KEY, &payload) {
            Ok(()) => {
                info!(
                    "event=tasks_save module=store status=ok count={}",
                    self.tasks.len()
                );
            }
            Err(err) => {
                error!(
                    "event=tasks_save module=store status=error error_code=backend_write_failed error={err}"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskStore, TASKS_KEY};
    use crate::model::task::Task;
    use crate::store::kv::{KeyValueStore, StoreError, StoreResult};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryKv {
        values: RefCell<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl KeyValueStore for MemoryKv {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            Ok(self.values.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail_writes {
                return Err(StoreError::InvalidData("write refused".to_string()));
            }
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn load_patches_missing_dates() {
        let kv = MemoryKv::default();
        kv.set(
            TASKS_KEY,
            r#"[{"id":"legacy","title":"old","time":null,"date":""}]"#,
        )
        .unwrap();

        let mut store = TaskStore::new(kv);
        assert_eq!(store.load(today()).unwrap(), 1);
        assert_eq!(store.tasks()[0].date, "2024-01-01");
        assert_eq!(store.tasks()[0].description, "");
    }

    #[test]
    fn load_rejects_undecodable_payload() {
        let kv = MemoryKv::default();
        kv.set(TASKS_KEY, "not json").unwrap();

        let mut store = TaskStore::new(kv);
        assert!(matches!(
            store.load(today()),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn mutations_write_through() {
        let mut store = TaskStore::new(MemoryKv::default());
        let task = Task::new("buy milk", today());
        let id = task.id.clone();
        store.append(task);

        let stored = store.backend.get(TASKS_KEY).unwrap().unwrap();
        assert!(stored.contains("buy milk"));

        store.remove(&id).unwrap();
        let stored = store.backend.get(TASKS_KEY).unwrap().unwrap();
        assert_eq!(stored, "[]");
    }

    #[test]
    fn failed_save_keeps_in_memory_mutation() {
        let kv = MemoryKv {
            fail_writes: true,
            ..MemoryKv::default()
        };
        let mut store = TaskStore::new(kv);
        store.append(Task::new("kept", today()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_replaces_matching_id_only() {
        let mut store = TaskStore::new(MemoryKv::default());
        let mut task = Task::new("draft", today());
        store.append(task.clone());

        task.title = "final".to_string();
        assert!(store.update(task.clone()));
        assert_eq!(store.tasks()[0].title, "final");

        task.id = "missing".to_string();
        assert!(!store.update(task));
    }
}
