//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `voicetask_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::Local;
use voicetask_core::{resolve_quick_time, QuickTimeShortcut};

fn main() {
    println!("voicetask_core ping={}", voicetask_core::ping());
    println!("voicetask_core version={}", voicetask_core::core_version());

    // Exercise one scheduling path end to end so the probe catches a broken
    // core crate before the Flutter shell does.
    let now = Local::now().naive_local();
    let morning = resolve_quick_time(QuickTimeShortcut::Morning, now);
    println!(
        "quick_time morning date={} time={} label={:?}",
        morning.date,
        morning.time.as_deref().unwrap_or("-"),
        morning.label
    );
}
