//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! `created_at` stays a raw string: the collaborator owns its format and the
//! view layer decides how to render a value it cannot parse.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// ISO-8601 creation timestamp. Older backends send `created_at`.
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: String,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }
}

/// Trim `raw` and reject it if nothing is left.
pub fn normalize_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_created_at_in_camel_case() {
        let todo = Todo {
            id: Uuid::nil(),
            text: "Test".to_string(),
            completed: false,
            created_at: "2024-05-01T10:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["text"], "Test");
        assert_eq!(json["createdAt"], "2024-05-01T10:00:00.000Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn todo_accepts_snake_case_timestamp() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000001","text":"Old","completed":true,"created_at":"2024-05-01T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(todo.created_at, "2024-05-01T10:00:00");
        assert!(todo.completed);
    }

    #[test]
    fn todo_missing_timestamp_defaults_to_empty() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":"00000000-0000-0000-0000-000000000001","text":"x"}"#)
                .unwrap();
        assert!(todo.created_at.is_empty());
        assert!(!todo.completed);
    }

    #[test]
    fn update_todo_skips_absent_fields() {
        let json = serde_json::to_value(UpdateTodo::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({"completed": true}));
        let json = serde_json::to_value(UpdateTodo::text("new")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "new"}));
    }

    #[test]
    fn normalize_text_trims_and_rejects_blank() {
        assert_eq!(normalize_text("  buy milk \n"), Some("buy milk"));
        assert_eq!(normalize_text("   "), None);
        assert_eq!(normalize_text(""), None);
    }
}
