//! To-do entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todolist_core::todo::MAX_ITEM_LEN;
use todolist_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `todos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Todo {
    pub id: DbId,
    pub item: String,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a to-do. `id` and timestamps are assigned server-side;
/// if a client sends them they are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodo {
    #[validate(length(max = MAX_ITEM_LEN))]
    pub item: String,
    #[serde(default)]
    pub is_completed: bool,
}

/// DTO for updating a to-do. All fields optional; absent fields keep their
/// stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTodo {
    #[validate(length(max = MAX_ITEM_LEN))]
    pub item: Option<String>,
    pub is_completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_LEN: usize = MAX_ITEM_LEN as usize;

    fn create(item: String) -> CreateTodo {
        CreateTodo {
            item,
            is_completed: false,
        }
    }

    #[test]
    fn create_defaults_is_completed_to_false() {
        let input: CreateTodo = serde_json::from_str(r#"{"item":"buy milk"}"#).unwrap();
        assert_eq!(input.item, "buy milk");
        assert!(!input.is_completed);
    }

    #[test]
    fn create_ignores_server_assigned_fields() {
        let input: CreateTodo = serde_json::from_str(
            r#"{"id":"not-a-uuid","item":"x","created_at":"yesterday"}"#,
        )
        .unwrap();
        assert_eq!(input.item, "x");
    }

    #[test]
    fn create_requires_item() {
        assert!(serde_json::from_str::<CreateTodo>(r#"{"is_completed":true}"#).is_err());
    }

    #[test]
    fn item_at_max_length_is_valid() {
        assert!(create("a".repeat(MAX_LEN)).validate().is_ok());
    }

    #[test]
    fn item_over_max_length_is_rejected() {
        let errors = create("a".repeat(MAX_LEN + 1)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("item"));
    }

    #[test]
    fn item_length_counts_characters_not_bytes() {
        assert!(create("é".repeat(MAX_LEN)).validate().is_ok());
    }

    #[test]
    fn empty_update_is_valid() {
        let input: UpdateTodo = serde_json::from_str("{}").unwrap();
        assert!(input.item.is_none());
        assert!(input.is_completed.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_checks_item_length_when_present() {
        let input = UpdateTodo {
            item: Some("a".repeat(MAX_LEN + 1)),
            is_completed: None,
        };
        assert!(input.validate().is_err());
    }
}
