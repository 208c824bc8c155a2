//! Render-ready view model for the navbar, stats bar, list and items.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::store::Stats;
use crate::types::Todo;

pub const INVALID_DATE: &str = "Invalid date";
pub const EMPTY_LIST_MESSAGE: &str = "No todos yet. Add one above!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navbar {
    pub title: &'static str,
    pub tagline: &'static str,
}

pub const NAVBAR: Navbar = Navbar {
    title: "Todo App",
    tagline: "Simple CRUD Todo Application",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_label: String,
    /// Completed records cannot be edited.
    pub can_edit: bool,
    pub toggle_label: String,
}

impl From<&Todo> for ItemView {
    fn from(todo: &Todo) -> Self {
        let target = if todo.completed { "incomplete" } else { "complete" };
        Self {
            id: todo.id,
            text: todo.text.clone(),
            completed: todo.completed,
            created_label: format_created_at(&todo.created_at),
            can_edit: !todo.completed,
            toggle_label: format!("Mark {} as {target}", todo.text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty { message: &'static str },
    Items(Vec<ItemView>),
}

impl ListView {
    pub fn of(todos: &[Todo]) -> Self {
        if todos.is_empty() {
            return ListView::Empty {
                message: EMPTY_LIST_MESSAGE,
            };
        }
        ListView::Items(todos.iter().map(ItemView::from).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsView {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub show_clear_completed: bool,
}

impl From<Stats> for StatsView {
    fn from(stats: Stats) -> Self {
        Self {
            total: stats.total,
            completed: stats.completed,
            remaining: stats.remaining,
            show_clear_completed: stats.completed > 0,
        }
    }
}

/// Calendar date (`M/D/YYYY`, local time) of a creation timestamp.
///
/// Accepts RFC 3339 and offset-less ISO-8601 date-times or plain dates.
/// Anything else renders as [`INVALID_DATE`].
///
/// Only values carrying an offset are shifted into local time. A plain date
/// such as `2024-12-25` names a calendar day and is shown as that day in
/// every timezone, rather than as UTC midnight converted to local time.
pub fn format_created_at(raw: &str) -> String {
    parse_date(raw.trim())
        .map(|date| date.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(completed: bool, created_at: &str) -> Todo {
        Todo {
            id: Uuid::nil(),
            text: "Buy milk".to_string(),
            completed,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn naive_iso_timestamp_formats_as_calendar_date() {
        assert_eq!(format_created_at("2024-03-09T14:30:00.123456"), "3/9/2024");
    }

    #[test]
    fn date_only_value_keeps_its_calendar_day() {
        assert_eq!(format_created_at("2024-12-25"), "12/25/2024");
        assert_eq!(format_created_at(" 2024-01-01 "), "1/1/2024");
    }

    #[test]
    fn rfc3339_uses_local_calendar_date() {
        let raw = "2024-07-04T12:00:00.000Z";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .format("%-m/%-d/%Y")
            .to_string();
        assert_eq!(format_created_at(raw), expected);
    }

    #[test]
    fn unparseable_timestamp_falls_back() {
        assert_eq!(format_created_at(""), INVALID_DATE);
        assert_eq!(format_created_at("yesterday"), INVALID_DATE);
        assert_eq!(format_created_at("2024-13-45T00:00:00"), INVALID_DATE);
    }

    #[test]
    fn completed_item_cannot_be_edited() {
        let item = ItemView::from(&todo(true, "2024-01-01"));
        assert!(!item.can_edit);
        assert_eq!(item.toggle_label, "Mark Buy milk as incomplete");

        let item = ItemView::from(&todo(false, "nonsense"));
        assert!(item.can_edit);
        assert_eq!(item.toggle_label, "Mark Buy milk as complete");
        assert_eq!(item.created_label, INVALID_DATE);
    }

    #[test]
    fn empty_collection_renders_placeholder() {
        assert_eq!(
            ListView::of(&[]),
            ListView::Empty {
                message: EMPTY_LIST_MESSAGE
            }
        );
        match ListView::of(&[todo(false, "")]) {
            ListView::Items(items) => assert_eq!(items.len(), 1),
            other => panic!("expected items, got {other:?}"),
        }
    }

    #[test]
    fn clear_button_only_with_completed_records() {
        let view = StatsView::from(Stats {
            total: 2,
            completed: 0,
            remaining: 2,
        });
        assert!(!view.show_clear_completed);
        let view = StatsView::from(Stats {
            total: 2,
            completed: 1,
            remaining: 1,
        });
        assert!(view.show_clear_completed);
    }
}
