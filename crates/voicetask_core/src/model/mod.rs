//! Domain model for captured tasks.
//!
//! # Responsibility
//! - Define the canonical task record shared by cockpit and schedule views.
//! - Provide validated wall-clock time parsing for scheduling arithmetic.
//!
//! # Invariants
//! - Every task is identified by a stable opaque `id` string.
//! - Task removal is a hard delete; there is no archive or tombstone state.

pub mod task;
pub mod time;
