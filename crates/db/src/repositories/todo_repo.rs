//! Repository for the `todos` table.

use chrono::Utc;
use sqlx::SqliteConnection;
use todolist_core::todo::Page;
use todolist_core::types::{new_id, DbId};

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, item, is_completed, created_at, updated_at";

/// Provides CRUD operations for to-do items.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new to-do, returning the created row.
    ///
    /// The id is generated here and both timestamps come from a single
    /// clock reading, so `created_at == updated_at` on the returned row.
    pub async fn create(
        conn: &mut SqliteConnection,
        input: &CreateTodo,
    ) -> Result<Todo, sqlx::Error> {
        let id = new_id();
        let now = Utc::now();
        let query = format!(
            "INSERT INTO todos (id, item, is_completed, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.item)
            .bind(input.is_completed)
            .bind(now)
            .fetch_one(conn)
            .await
    }

    /// Find a to-do by its ID.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = ?1");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List to-dos in creation order.
    ///
    /// `rowid` only grows for new rows, so it preserves insertion order
    /// even when timestamps tie.
    pub async fn list(
        conn: &mut SqliteConnection,
        page: Page,
    ) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos ORDER BY rowid LIMIT ?1 OFFSET ?2");
        sqlx::query_as::<_, Todo>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(conn)
            .await
    }

    /// Update a to-do. Only non-`None` fields are applied; `updated_at` is
    /// always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET \
                item = COALESCE(?2, item), \
                is_completed = COALESCE(?3, is_completed), \
                updated_at = ?4 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(input.item.as_deref())
            .bind(input.is_completed)
            .bind(Utc::now())
            .fetch_optional(conn)
            .await
    }

    /// Delete a to-do. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of stored to-dos.
    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(conn)
            .await?;
        Ok(count)
    }
}
