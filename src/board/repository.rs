//! Board repository for Corkboard.
//!
//! This module provides CRUD operations for boards and the four
//! membership-aware listing queries.

use sqlx::QueryBuilder;
use tracing::debug;

use super::member::PARTICIPATING_SQL;
use super::types::{Board, BoardListing, BoardUpdate, NewBoard};
use crate::db::DbPool;
use crate::id::EntityId;
use crate::{CorkboardError, Result};

const BOARD_COLUMNS: &str = "b.id AS id, b.title AS title, b.is_closed AS is_closed,
     b.is_public AS is_public, b.creator_id AS creator_id,
     b.created_at AS created_at, b.updated_at AS updated_at";

const BOARD_ORDER: &str = "ORDER BY b.updated_at DESC, b.id ASC";

/// Repository for board CRUD operations.
pub struct BoardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new board owned by `creator_id`.
    ///
    /// The title is stored as given; title policy lives in the handler.
    pub async fn create(&self, creator_id: &EntityId, new_board: &NewBoard) -> Result<Board> {
        let id = EntityId::new();
        sqlx::query(
            "INSERT INTO boards (id, title, is_closed, is_public, creator_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new_board.title)
        .bind(new_board.is_closed)
        .bind(new_board.is_public)
        .bind(creator_id)
        .execute(self.pool)
        .await?;
        debug!(board_id = %id, creator_id = %creator_id, "created board");

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("board".to_string()))
    }

    /// Get a board by ID.
    pub async fn get_by_id(&self, id: &EntityId) -> Result<Option<Board>> {
        let query = format!("SELECT {BOARD_COLUMNS} FROM boards b WHERE b.id = ?");
        let board = sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(board)
    }

    /// Update a board by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated board, or None if not found.
    pub async fn update(&self, id: &EntityId, update: &BoardUpdate) -> Result<Option<Board>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("UPDATE boards SET updated_at = datetime('now')");

        if let Some(ref title) = update.title {
            query.push(", title = ");
            query.push_bind(title.clone());
        }
        if let Some(is_closed) = update.is_closed {
            query.push(", is_closed = ");
            query.push_bind(is_closed);
        }
        if let Some(is_public) = update.is_public {
            query.push(", is_public = ");
            query.push_bind(is_public);
        }

        query.push(" WHERE id = ");
        query.push_bind(id.clone());

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a board by ID.
    ///
    /// Memberships, lists and cards of the board are removed with it.
    /// Returns true if a board was deleted, false if not found.
    pub async fn delete(&self, id: &EntityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List every board created by `creator_id`, whatever its visibility.
    pub async fn list_created_by(&self, creator_id: &EntityId) -> Result<Vec<Board>> {
        let query =
            format!("SELECT {BOARD_COLUMNS} FROM boards b WHERE b.creator_id = ? {BOARD_ORDER}");
        let boards = sqlx::query_as::<_, Board>(&query)
            .bind(creator_id)
            .fetch_all(self.pool)
            .await?;
        Ok(boards)
    }

    /// Run one of the listing queries for `user_id`.
    ///
    /// Membership is tested with `EXISTS`, so a board is returned at most
    /// once however many relations point at it.
    pub async fn list_by_listing(
        &self,
        user_id: &EntityId,
        listing: BoardListing,
    ) -> Result<Vec<Board>> {
        let participates = format!(
            "EXISTS (SELECT 1 FROM board_members m
                     WHERE m.board_id = b.id AND m.user_id = ?
                       AND m.status IN {PARTICIPATING_SQL})"
        );

        let (filter, binds) = match listing {
            BoardListing::Mine => (
                format!(
                    "b.is_closed = 0 AND (b.creator_id = ? OR (b.is_public = 0 AND {participates}))"
                ),
                2,
            ),
            BoardListing::Invited => (
                format!(
                    "b.is_closed = 0 AND b.is_public = 0 AND b.creator_id <> ? AND {participates}"
                ),
                2,
            ),
            BoardListing::Public => ("b.is_closed = 0 AND b.is_public = 1".to_string(), 0),
            BoardListing::Closed => (
                format!("b.is_closed = 1 AND (b.creator_id = ? OR {participates})"),
                2,
            ),
        };

        let query = format!("SELECT {BOARD_COLUMNS} FROM boards b WHERE {filter} {BOARD_ORDER}");
        let mut q = sqlx::query_as::<_, Board>(&query);
        for _ in 0..binds {
            q = q.bind(user_id);
        }

        let boards = q.fetch_all(self.pool).await?;
        debug!(
            user_id = %user_id,
            listing = %listing,
            count = boards.len(),
            "listed boards"
        );
        Ok(boards)
    }

    /// Count all boards.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
