//! Todo repository for hotelier.

use chrono::Utc;

use super::types::{Todo, MAX_TODO_LENGTH};
use crate::db::DbPool;
use crate::{HotelError, Result};

fn check_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(HotelError::Validation("todo is required".to_string()));
    }
    if text.chars().count() > MAX_TODO_LENGTH {
        return Err(HotelError::Validation(format!(
            "todo must be at most {MAX_TODO_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Repository for todo entries.
pub struct TodoRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> TodoRepository<'a> {
    /// Create a new TodoRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a todo stamped with the current time.
    pub async fn create(&self, text: &str) -> Result<Todo> {
        check_text(text)?;

        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (todo, date) VALUES (?, ?) RETURNING id, todo, date",
        )
        .bind(text)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(todo)
    }

    /// List todos, newest first.
    pub async fn list(&self) -> Result<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>("SELECT id, todo, date FROM todos ORDER BY id DESC")
            .fetch_all(self.pool)
            .await?;

        Ok(todos)
    }

    /// Replace the text of a todo and refresh its date.
    ///
    /// Returns None if the todo does not exist.
    pub async fn update(&self, id: i64, text: &str) -> Result<Option<Todo>> {
        check_text(text)?;

        let todo = sqlx::query_as::<_, Todo>(
            "UPDATE todos SET todo = ?, date = ? WHERE id = ? RETURNING id, todo, date",
        )
        .bind(text)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(todo)
    }

    /// Delete a todo. Returns false when no entry matched.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
