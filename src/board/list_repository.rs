//! List repository for Corkboard.

use super::list::{BoardList, NewList};
use crate::db::DbPool;
use crate::id::EntityId;
use crate::{CorkboardError, Result};

const LIST_COLUMNS: &str = "id, board_id, title, position, is_archived, created_at";

/// Repository for list CRUD operations.
pub struct ListRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ListRepository<'a> {
    /// Create a new ListRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a list at the end of its board.
    pub async fn create(&self, new_list: &NewList) -> Result<BoardList> {
        let id = EntityId::new();
        sqlx::query(
            "INSERT INTO lists (id, board_id, title, position)
             VALUES (?, ?, ?,
                     (SELECT COALESCE(MAX(position), -1) + 1 FROM lists WHERE board_id = ?))",
        )
        .bind(&id)
        .bind(&new_list.board_id)
        .bind(&new_list.title)
        .bind(&new_list.board_id)
        .execute(self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("list".to_string()))
    }

    /// Get a list by ID.
    pub async fn get_by_id(&self, id: &EntityId) -> Result<Option<BoardList>> {
        let query = format!("SELECT {LIST_COLUMNS} FROM lists WHERE id = ?");
        let list = sqlx::query_as::<_, BoardList>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(list)
    }

    /// Rename a list. Returns the updated list, or None if not found.
    pub async fn rename(&self, id: &EntityId, title: &str) -> Result<Option<BoardList>> {
        let result = sqlx::query("UPDATE lists SET title = ? WHERE id = ?")
            .bind(title)
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Archive or restore a list.
    pub async fn set_archived(&self, id: &EntityId, archived: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE lists SET is_archived = ? WHERE id = ?")
            .bind(archived)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the ordering key of a list.
    pub async fn move_to(&self, id: &EntityId, position: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE lists SET position = ? WHERE id = ?")
            .bind(position)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a list and its cards.
    pub async fn delete(&self, id: &EntityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the lists of a board in position order.
    pub async fn list_by_board(
        &self,
        board_id: &EntityId,
        include_archived: bool,
    ) -> Result<Vec<BoardList>> {
        let archived_filter = if include_archived {
            ""
        } else {
            " AND is_archived = 0"
        };
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE board_id = ?{archived_filter}
             ORDER BY position ASC, created_at ASC, id ASC"
        );
        let lists = sqlx::query_as::<_, BoardList>(&query)
            .bind(board_id)
            .fetch_all(self.pool)
            .await?;
        Ok(lists)
    }
}
