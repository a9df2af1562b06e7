//! Strict parse-and-validate intake for AI responses.
//!
//! # Responsibility
//! - Locate the single JSON task array inside free-form response text.
//! - Coerce untyped fields into validated `Task` records.
//!
//! # Invariants
//! - Field presence and type are never trusted; missing/empty titles get
//!   the placeholder, any non-string scalar is stringified.
//! - Array order is preserved; there is no de-duplication.

use crate::extract::ExtractionError;
use crate::model::task::{Task, UNTITLED_PLACEHOLDER};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// First bracketed array of objects, tolerating prose around it.
static TASK_ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[\s*\{.+?\}\s*\]").expect("valid task array regex"));

/// Parses an AI response into task records dated `today`.
///
/// # Errors
/// - `ExtractionError::NoTaskArray` when no bracketed object array exists
///   in the text.
/// - `ExtractionError::InvalidJson` when the located array fails to parse.
pub fn intake_tasks(response_text: &str, today: NaiveDate) -> Result<Vec<Task>, ExtractionError> {
    let matched = TASK_ARRAY_RE
        .find(response_text)
        .ok_or(ExtractionError::NoTaskArray)?;

    let parsed: Value =
        serde_json::from_str(matched.as_str()).map_err(ExtractionError::InvalidJson)?;
    let Value::Array(elements) = parsed else {
        // The regex shape guarantees an array; kept as a guard against
        // regex drift.
        return Err(ExtractionError::NoTaskArray);
    };

    Ok(elements
        .iter()
        .map(|element| task_from_element(element, today))
        .collect())
}

fn task_from_element(element: &Value, today: NaiveDate) -> Task {
    let mut task = Task::new(
        coerce_text(element.get("title")).unwrap_or_else(|| UNTITLED_PLACEHOLDER.to_string()),
        today,
    );
    task.time = coerce_text(element.get("time"));
    task
}

// String as-is, numbers/bools stringified, null/missing/empty -> None.
fn coerce_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::Null => return None,
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(_) | Value::Object(_) => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
