//! Card repository for Corkboard.

use sqlx::QueryBuilder;

use super::card::{Card, CardUpdate, NewCard};
use crate::db::DbPool;
use crate::id::EntityId;
use crate::{CorkboardError, Result};

const CARD_COLUMNS: &str = "id, list_id, title, description, position, created_at";

/// Repository for card CRUD operations.
pub struct CardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CardRepository<'a> {
    /// Create a new CardRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a card at the end of its list.
    pub async fn create(&self, new_card: &NewCard) -> Result<Card> {
        let id = EntityId::new();
        sqlx::query(
            "INSERT INTO cards (id, list_id, title, description, position)
             VALUES (?, ?, ?, ?,
                     (SELECT COALESCE(MAX(position), -1) + 1 FROM cards WHERE list_id = ?))",
        )
        .bind(&id)
        .bind(&new_card.list_id)
        .bind(&new_card.title)
        .bind(&new_card.description)
        .bind(&new_card.list_id)
        .execute(self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("card".to_string()))
    }

    /// Get a card by ID.
    pub async fn get_by_id(&self, id: &EntityId) -> Result<Option<Card>> {
        let query = format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?");
        let card = sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(card)
    }

    /// Update a card by ID.
    ///
    /// Returns the updated card, or None if not found.
    pub async fn update(&self, id: &EntityId, update: &CardUpdate) -> Result<Option<Card>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE cards SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title.clone());
        }
        if let Some(ref description) = update.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description.clone());
        }

        query.push(" WHERE id = ");
        query.push_bind(id.clone());

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Move a card to the end of another list (or the same one).
    pub async fn move_to_list(&self, id: &EntityId, list_id: &EntityId) -> Result<Option<Card>> {
        let result = sqlx::query(
            "UPDATE cards
             SET list_id = ?,
                 position = (SELECT COALESCE(MAX(position), -1) + 1 FROM cards WHERE list_id = ?)
             WHERE id = ?",
        )
        .bind(list_id)
        .bind(list_id)
        .bind(id)
        .execute(self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a card by ID.
    pub async fn delete(&self, id: &EntityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the cards of a list in position order.
    pub async fn list_by_list(&self, list_id: &EntityId) -> Result<Vec<Card>> {
        let query = format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE list_id = ?
             ORDER BY position ASC, created_at ASC, id ASC"
        );
        let cards = sqlx::query_as::<_, Card>(&query)
            .bind(list_id)
            .fetch_all(self.pool)
            .await?;
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardRepository, ListRepository, NewBoard, NewList};
    use crate::Database;

    async fn setup() -> (Database, EntityId, EntityId, EntityId) {
        let db = Database::open_in_memory().await.unwrap();
        let board = BoardRepository::new(db.pool())
            .create(&EntityId::new(), &NewBoard::new("sprint"))
            .await
            .unwrap()
            .id;
        let lists = ListRepository::new(db.pool());
        let todo = lists
            .create(&NewList::new(board.clone(), "Todo"))
            .await
            .unwrap()
            .id;
        let done = lists
            .create(&NewList::new(board.clone(), "Done"))
            .await
            .unwrap()
            .id;
        (db, board, todo, done)
    }

    #[tokio::test]
    async fn test_create_appends() {
        let (db, _, todo, _) = setup().await;
        let repo = CardRepository::new(db.pool());

        let a = repo.create(&NewCard::new(todo.clone(), "a")).await.unwrap();
        let b = repo
            .create(&NewCard::new(todo.clone(), "b").with_description("details"))
            .await
            .unwrap();

        assert_eq!(a.position, 0);
        assert_eq!(b.position, 1);
        assert_eq!(b.description.as_deref(), Some("details"));
    }

    #[tokio::test]
    async fn test_update_card() {
        let (db, _, todo, _) = setup().await;
        let repo = CardRepository::new(db.pool());
        let card = repo
            .create(&NewCard::new(todo, "draft").with_description("x"))
            .await
            .unwrap();

        let updated = repo
            .update(&card.id, &CardUpdate::new().title("final").description(None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "final");
        assert!(updated.description.is_none());
    }

    #[tokio::test]
    async fn test_move_to_list() {
        let (db, _, todo, done) = setup().await;
        let repo = CardRepository::new(db.pool());
        repo.create(&NewCard::new(done.clone(), "already done"))
            .await
            .unwrap();
        let card = repo.create(&NewCard::new(todo.clone(), "task")).await.unwrap();

        let moved = repo.move_to_list(&card.id, &done).await.unwrap().unwrap();
        assert_eq!(moved.list_id, done);
        assert_eq!(moved.position, 1);
        assert!(repo.list_by_list(&todo).await.unwrap().is_empty());
        assert_eq!(repo.list_by_list(&done).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_board_delete_removes_cards() {
        let (db, board, todo, _) = setup().await;
        let repo = CardRepository::new(db.pool());
        let card = repo.create(&NewCard::new(todo, "task")).await.unwrap();

        BoardRepository::new(db.pool()).delete(&board).await.unwrap();
        assert!(repo.get_by_id(&card.id).await.unwrap().is_none());
        assert!(!repo.delete(&card.id).await.unwrap());
    }
}
