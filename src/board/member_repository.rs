//! Board membership repository for Corkboard.

use tracing::debug;

use super::member::{BoardMember, MemberStatus, NewBoardMember, PARTICIPATING_SQL};
use crate::db::DbPool;
use crate::id::EntityId;
use crate::{CorkboardError, Result};

const MEMBER_COLUMNS: &str = "id, board_id, user_id, status, created_at";

/// Repository for board membership relations.
pub struct BoardMemberRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardMemberRepository<'a> {
    /// Create a new BoardMemberRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a membership relation.
    ///
    /// Fails with a database error if the pair already has a relation.
    pub async fn create(&self, new_member: &NewBoardMember) -> Result<BoardMember> {
        let id = EntityId::new();
        sqlx::query("INSERT INTO board_members (id, board_id, user_id, status) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&new_member.board_id)
            .bind(&new_member.user_id)
            .bind(new_member.status.as_str())
            .execute(self.pool)
            .await?;
        debug!(
            board_id = %new_member.board_id,
            user_id = %new_member.user_id,
            status = %new_member.status,
            "created membership"
        );

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("board member".to_string()))
    }

    /// Get a relation by its own ID.
    pub async fn get_by_id(&self, id: &EntityId) -> Result<Option<BoardMember>> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM board_members WHERE id = ?");
        let row: Option<MemberRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(MemberRow::into_member))
    }

    /// Get the relation between a board and a user, whatever its status.
    pub async fn get(&self, board_id: &EntityId, user_id: &EntityId) -> Result<Option<BoardMember>> {
        let query =
            format!("SELECT {MEMBER_COLUMNS} FROM board_members WHERE board_id = ? AND user_id = ?");
        let row: Option<MemberRow> = sqlx::query_as(&query)
            .bind(board_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(MemberRow::into_member))
    }

    /// Change the status of a relation.
    ///
    /// Returns the updated relation, or None if not found.
    pub async fn update_status(
        &self,
        id: &EntityId,
        status: MemberStatus,
    ) -> Result<Option<BoardMember>> {
        let result = sqlx::query("UPDATE board_members SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        debug!(member_id = %id, status = %status, "updated membership status");
        self.get_by_id(id).await
    }

    /// Delete a relation by ID.
    ///
    /// Returns true if a relation was deleted, false if not found.
    pub async fn delete(&self, id: &EntityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM board_members WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the participating members of a board, oldest first.
    pub async fn list_by_board(&self, board_id: &EntityId) -> Result<Vec<BoardMember>> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM board_members
             WHERE board_id = ? AND status IN {PARTICIPATING_SQL}
             ORDER BY created_at ASC, id ASC"
        );
        let rows: Vec<MemberRow> = sqlx::query_as(&query)
            .bind(board_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(MemberRow::into_member).collect())
    }

    /// List every relation of a user, including removed ones.
    pub async fn list_by_user(&self, user_id: &EntityId) -> Result<Vec<BoardMember>> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM board_members
             WHERE user_id = ? ORDER BY created_at ASC, id ASC"
        );
        let rows: Vec<MemberRow> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(MemberRow::into_member).collect())
    }
}

/// Internal struct for mapping database rows to BoardMember.
#[derive(sqlx::FromRow)]
struct MemberRow {
    id: EntityId,
    board_id: EntityId,
    user_id: EntityId,
    status: String,
    created_at: String,
}

impl MemberRow {
    fn into_member(self) -> BoardMember {
        BoardMember {
            id: self.id,
            board_id: self.board_id,
            user_id: self.user_id,
            status: self.status.parse().unwrap_or(MemberStatus::Removed),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardRepository, NewBoard};
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    struct Fixture {
        db: Database,
        user: EntityId,
        board: EntityId,
    }

    async fn setup() -> Fixture {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("member"))
            .await
            .unwrap()
            .id;
        let owner: EntityId = "4eea50bc91e31d174600016d".parse().unwrap();
        let board = BoardRepository::new(db.pool())
            .create(&owner, &NewBoard::new("team"))
            .await
            .unwrap()
            .id;
        Fixture { db, user, board }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let f = setup().await;
        let repo = BoardMemberRepository::new(f.db.pool());

        let created = repo
            .create(&NewBoardMember::new(f.board.clone(), f.user.clone()))
            .await
            .unwrap();
        assert_eq!(created.status, MemberStatus::Invited);

        let found = repo.get(&f.board, &f.user).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.get(&f.board, &EntityId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_pair_rejected() {
        let f = setup().await;
        let repo = BoardMemberRepository::new(f.db.pool());

        repo.create(&NewBoardMember::new(f.board.clone(), f.user.clone()))
            .await
            .unwrap();
        let result = repo
            .create(&NewBoardMember::new(f.board.clone(), f.user.clone()))
            .await;
        assert!(matches!(result, Err(CorkboardError::Database(_))));
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let f = setup().await;
        let repo = BoardMemberRepository::new(f.db.pool());

        let result = repo
            .create(&NewBoardMember::new(f.board.clone(), EntityId::new()))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_status() {
        let f = setup().await;
        let repo = BoardMemberRepository::new(f.db.pool());
        let member = repo
            .create(&NewBoardMember::new(f.board.clone(), f.user.clone()))
            .await
            .unwrap();

        let updated = repo
            .update_status(&member.id, MemberStatus::Available)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, MemberStatus::Available);

        let missing = repo
            .update_status(&EntityId::new(), MemberStatus::Available)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_by_board_skips_removed() {
        let f = setup().await;
        let repo = BoardMemberRepository::new(f.db.pool());
        let member = repo
            .create(&NewBoardMember::new(f.board.clone(), f.user.clone()))
            .await
            .unwrap();

        assert_eq!(repo.list_by_board(&f.board).await.unwrap().len(), 1);

        repo.update_status(&member.id, MemberStatus::Removed)
            .await
            .unwrap();
        assert!(repo.list_by_board(&f.board).await.unwrap().is_empty());
        assert_eq!(repo.list_by_user(&f.user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_relations_follow_deletes() {
        let f = setup().await;
        let repo = BoardMemberRepository::new(f.db.pool());
        let member = repo
            .create(&NewBoardMember::new(f.board.clone(), f.user.clone()))
            .await
            .unwrap();

        BoardRepository::new(f.db.pool())
            .delete(&f.board)
            .await
            .unwrap();
        assert!(repo.get_by_id(&member.id).await.unwrap().is_none());
        assert!(!repo.delete(&member.id).await.unwrap());
    }
}
