//! Persistence boundary and in-memory task state container.
//!
//! # Responsibility
//! - Define the whole-value key-value persistence contract.
//! - Own the session's task list and mirror every mutation to storage.
//!
//! # Invariants
//! - Values are read and written whole; there are no partial updates.
//! - In-memory state is authoritative for the session; a failed save is
//!   logged and the mutation stands.

pub mod kv;
pub mod task_store;

pub use kv::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};
pub use task_store::{TaskStore, TASKS_KEY};
