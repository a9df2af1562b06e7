//! Derived orderings for the day/week/month schedule screen.
//!
//! # Responsibility
//! - Slice the task list into the shapes the schedule screen renders:
//!   per-day lists, per-hour timeline rows, the unscheduled chip row, the
//!   month digest, week strip metadata and calendar dot marks.
//!
//! # Invariants
//! - All functions are read-only over the task list.
//! - Ordering inside a derivation is stable with respect to insertion order.

use crate::model::task::Task;
use crate::model::time::{format_date, TimeParseOutcome};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Tasks belonging to one date, insertion order.
pub fn day_tasks<'a>(tasks: &'a [Task], date: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.is_on_date(date)).collect()
}

/// Unscheduled tasks of one date (the chip row above the timeline).
pub fn unscheduled_for_day<'a>(tasks: &'a [Task], date: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| task.is_on_date(date) && task.minute_of_day().is_none())
        .collect()
}

/// Scheduled tasks of one date whose hour matches a timeline row.
pub fn tasks_for_hour<'a>(tasks: &'a [Task], date: &str, hour: u16) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| {
            task.is_on_date(date)
                && matches!(task.time_of_day(), TimeParseOutcome::Valid(t) if t.hour() == hour)
        })
        .collect()
}

/// Month-view digest: unscheduled tasks first, then ascending by
/// minute-of-day.
pub fn digest_order<'a>(tasks: &'a [Task], date: &str) -> Vec<&'a Task> {
    let mut digest = day_tasks(tasks, date);
    // Unscheduled (and unparsable) sort as "before midnight"; stable sort
    // keeps insertion order within each group.
    digest.sort_by_key(|task| task.minute_of_day().map_or(-1, i32::from));
    digest
}

/// One cell of the Monday-start week strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    /// `YYYY-MM-DD` date of the cell.
    pub date: String,
    /// Day-of-month number for display.
    pub day_of_month: u32,
    pub is_selected: bool,
    pub is_today: bool,
    /// Whether any task exists on this date.
    pub has_task: bool,
}

/// Builds the seven-cell week strip containing `selected`.
pub fn week_strip(tasks: &[Task], selected: NaiveDate, today: NaiveDate) -> Vec<WeekDay> {
    let start = selected.week(Weekday::Mon).first_day();
    (0..7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let date_str = format_date(date);
            WeekDay {
                day_of_month: date.day(),
                is_selected: date == selected,
                is_today: date == today,
                has_task: tasks.iter().any(|task| task.is_on_date(&date_str)),
                date: date_str,
            }
        })
        .collect()
}

/// Dot color for a calendar date mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotColor {
    /// All tasks on the date carry a time.
    Scheduled,
    /// At least one task on the date is unscheduled.
    Attention,
}

/// Per-date calendar marks; a date with any unscheduled task is marked
/// [`DotColor::Attention`].
pub fn calendar_marks(tasks: &[Task]) -> BTreeMap<String, DotColor> {
    let mut marks = BTreeMap::new();
    for task in tasks {
        if task.date.is_empty() {
            continue;
        }
        let color = if task.minute_of_day().is_some() {
            DotColor::Scheduled
        } else {
            DotColor::Attention
        };
        marks
            .entry(task.date.clone())
            .and_modify(|existing| {
                if color == DotColor::Attention {
                    *existing = DotColor::Attention;
                }
            })
            .or_insert(color);
    }
    marks
}

#[cfg(test)]
mod tests {
    use super::{
        calendar_marks, digest_order, tasks_for_hour, unscheduled_for_day, week_strip, DotColor,
    };
    use crate::model::task::Task;
    use chrono::NaiveDate;

    fn task(id: &str, time: Option<&str>, date: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            time: time.map(str::to_string),
            date: date.to_string(),
            description: String::new(),
            notification_id: None,
        }
    }

    #[test]
    fn digest_puts_unscheduled_first_then_by_time() {
        let tasks = vec![
            task("a", Some("14:00"), "2024-03-05"),
            task("b", None, "2024-03-05"),
            task("c", Some("9:15"), "2024-03-05"),
            task("d", Some("9:00"), "2024-03-06"),
        ];
        let ids: Vec<&str> = digest_order(&tasks, "2024-03-05")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn hour_rows_match_parsed_hour() {
        let tasks = vec![
            task("a", Some("9:00"), "2024-03-05"),
            task("b", Some("09:45"), "2024-03-05"),
            task("c", Some("10:00"), "2024-03-05"),
            task("d", None, "2024-03-05"),
        ];
        let ids: Vec<&str> = tasks_for_hour(&tasks, "2024-03-05", 9)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(unscheduled_for_day(&tasks, "2024-03-05").len(), 1);
    }

    #[test]
    fn week_strip_starts_monday_and_flags_cells() {
        let tasks = vec![task("a", None, "2024-03-06")];
        let selected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let strip = week_strip(&tasks, selected, today);

        assert_eq!(strip.len(), 7);
        assert_eq!(strip[0].date, "2024-03-04");
        assert!(strip[1].is_today);
        assert!(strip[2].has_task);
        assert!(strip[3].is_selected);
        assert_eq!(strip[6].date, "2024-03-10");
    }

    #[test]
    fn calendar_marks_prefer_attention() {
        let tasks = vec![
            task("a", Some("9:00"), "2024-03-05"),
            task("b", None, "2024-03-05"),
            task("c", Some("12:00"), "2024-03-06"),
        ];
        let marks = calendar_marks(&tasks);
        assert_eq!(marks.get("2024-03-05"), Some(&DotColor::Attention));
        assert_eq!(marks.get("2024-03-06"), Some(&DotColor::Scheduled));
    }
}
