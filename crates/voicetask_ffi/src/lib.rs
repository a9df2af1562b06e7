//! FFI crate exposing `voicetask_core` to the Flutter shell.

pub mod api;
