//! Board handler for Corkboard.
//!
//! This module provides the user-facing board operations: creating boards,
//! the four board listings and membership management. Each listing is a
//! single query; storage errors are returned to the caller untouched.

use tracing::{debug, info, warn};

use crate::config::BoardConfig;
use crate::db::{Database, UserRepository};
use crate::id::EntityId;
use crate::{CorkboardError, Result};

use super::card::{Card, NewCard};
use super::card_repository::CardRepository;
use super::list::{BoardList, NewList};
use super::list_repository::ListRepository;
use super::member::{BoardMember, MemberStatus, NewBoardMember};
use super::member_repository::BoardMemberRepository;
use super::repository::BoardRepository;
use super::types::{Board, BoardListing, BoardUpdate, NewBoard, Visibility};

/// Board operations for a single database.
pub struct BoardHandler<'a> {
    db: &'a Database,
    config: &'a BoardConfig,
}

impl<'a> BoardHandler<'a> {
    /// Create a new BoardHandler.
    pub fn new(db: &'a Database, config: &'a BoardConfig) -> Self {
        Self { db, config }
    }

    /// Create a board owned by the user with the given id.
    ///
    /// Returns `Ok(None)` without creating anything when `user_id` is not a
    /// well-formed id or names no stored user. Otherwise returns the id of
    /// the new board.
    pub async fn create_board(
        &self,
        user_id: &str,
        new_board: &NewBoard,
    ) -> Result<Option<EntityId>> {
        let users = UserRepository::new(self.db.pool());
        let Some(user) = users.resolve(user_id).await? else {
            warn!(user_id, "refusing to create board for unknown user");
            return Ok(None);
        };

        let new_board = NewBoard {
            title: self.normalize_title(&new_board.title)?,
            ..new_board.clone()
        };

        let board = BoardRepository::new(self.db.pool())
            .create(&user.id, &new_board)
            .await?;
        info!(board_id = %board.id, creator_id = %user.id, "board created");
        Ok(Some(board.id))
    }

    /// List the boards in one of the four collections.
    pub async fn list_boards(
        &self,
        user_id: &EntityId,
        listing: BoardListing,
    ) -> Result<Vec<Board>> {
        BoardRepository::new(self.db.pool())
            .list_by_listing(user_id, listing)
            .await
    }

    /// Open boards the user created plus private boards the user participates in.
    pub async fn list_my_boards(&self, user_id: &EntityId) -> Result<Vec<Board>> {
        self.list_boards(user_id, BoardListing::Mine).await
    }

    /// Private boards the user participates in but did not create.
    pub async fn list_invited_boards(&self, user_id: &EntityId) -> Result<Vec<Board>> {
        self.list_boards(user_id, BoardListing::Invited).await
    }

    /// Every open public board, regardless of membership.
    pub async fn list_public_boards(&self, user_id: &EntityId) -> Result<Vec<Board>> {
        self.list_boards(user_id, BoardListing::Public).await
    }

    /// Closed boards the user created or participates in.
    pub async fn list_closed_boards(&self, user_id: &EntityId) -> Result<Vec<Board>> {
        self.list_boards(user_id, BoardListing::Closed).await
    }

    /// Get a board, failing with NotFound if it does not exist.
    pub async fn get_board(&self, board_id: &EntityId) -> Result<Board> {
        BoardRepository::new(self.db.pool())
            .get_by_id(board_id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("board".to_string()))
    }

    /// Check whether the user may see the board's content.
    pub async fn can_access(&self, board: &Board, user_id: &EntityId) -> Result<bool> {
        if board.is_creator(user_id) {
            return Ok(true);
        }
        let relation = BoardMemberRepository::new(self.db.pool())
            .get(&board.id, user_id)
            .await?;
        let participates = relation.is_some_and(|m| m.status.is_participating());
        Ok(participates || board.visibility() == Visibility::Public)
    }

    /// Invite a user to a board. Only the creator may invite.
    ///
    /// A previously removed member is invited again; an active relation is
    /// rejected.
    pub async fn invite_member(
        &self,
        board_id: &EntityId,
        inviter_id: &EntityId,
        user_id: &EntityId,
    ) -> Result<BoardMember> {
        let board = self.get_board(board_id).await?;
        if !board.is_creator(inviter_id) {
            return Err(CorkboardError::Permission(
                "only the board creator may invite members".to_string(),
            ));
        }
        self.add_member(&board, user_id, MemberStatus::Invited)
            .await
    }

    /// Join an open public board as an active member.
    pub async fn join_board(&self, board_id: &EntityId, user_id: &EntityId) -> Result<BoardMember> {
        let board = self.get_board(board_id).await?;
        if board.visibility() != Visibility::Public {
            return Err(CorkboardError::Permission(format!(
                "cannot join a {} board without an invitation",
                board.visibility()
            )));
        }
        self.add_member(&board, user_id, MemberStatus::Available)
            .await
    }

    async fn add_member(
        &self,
        board: &Board,
        user_id: &EntityId,
        status: MemberStatus,
    ) -> Result<BoardMember> {
        let board_id = &board.id;
        if !UserRepository::new(self.db.pool()).exists(user_id).await? {
            return Err(CorkboardError::NotFound("user".to_string()));
        }
        if board.is_creator(user_id) {
            return Err(CorkboardError::Validation(
                "the creator already owns this board".to_string(),
            ));
        }

        let members = BoardMemberRepository::new(self.db.pool());
        let member = match members.get(board_id, user_id).await? {
            Some(existing) if existing.status.is_participating() => {
                return Err(CorkboardError::Validation(format!(
                    "user is already {} on this board",
                    existing.status
                )));
            }
            Some(existing) => members
                .update_status(&existing.id, status)
                .await?
                .ok_or_else(|| CorkboardError::NotFound("board member".to_string()))?,
            None => {
                members
                    .create(
                        &NewBoardMember::new(board_id.clone(), user_id.clone())
                            .with_status(status),
                    )
                    .await?
            }
        };

        info!(board_id = %board_id, user_id = %user_id, status = %status, "member added");
        Ok(member)
    }

    /// Accept a pending invitation.
    pub async fn accept_invitation(
        &self,
        board_id: &EntityId,
        user_id: &EntityId,
    ) -> Result<BoardMember> {
        let members = BoardMemberRepository::new(self.db.pool());
        let member = members
            .get(board_id, user_id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("invitation".to_string()))?;

        if member.status != MemberStatus::Invited {
            return Err(CorkboardError::Validation(format!(
                "no pending invitation (status is {})",
                member.status
            )));
        }

        let accepted = members
            .update_status(&member.id, MemberStatus::Available)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("invitation".to_string()))?;
        debug!(board_id = %board_id, user_id = %user_id, "invitation accepted");
        Ok(accepted)
    }

    /// Remove a user from a board.
    ///
    /// Returns false if the user had no active relation to the board.
    pub async fn remove_member(&self, board_id: &EntityId, user_id: &EntityId) -> Result<bool> {
        let members = BoardMemberRepository::new(self.db.pool());
        match members.get(board_id, user_id).await? {
            Some(member) if member.status.is_participating() => {
                members
                    .update_status(&member.id, MemberStatus::Removed)
                    .await?;
                info!(board_id = %board_id, user_id = %user_id, "member removed");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Participating members of a board.
    pub async fn members(&self, board_id: &EntityId) -> Result<Vec<BoardMember>> {
        BoardMemberRepository::new(self.db.pool())
            .list_by_board(board_id)
            .await
    }

    /// Close a board. Only the creator may do this.
    pub async fn close_board(&self, board_id: &EntityId, user_id: &EntityId) -> Result<Board> {
        self.update_as_creator(board_id, user_id, BoardUpdate::new().is_closed(true))
            .await
    }

    /// Reopen a closed board. Only the creator may do this.
    pub async fn reopen_board(&self, board_id: &EntityId, user_id: &EntityId) -> Result<Board> {
        self.update_as_creator(board_id, user_id, BoardUpdate::new().is_closed(false))
            .await
    }

    /// Make a board public or private. Only the creator may do this.
    pub async fn set_public(
        &self,
        board_id: &EntityId,
        user_id: &EntityId,
        is_public: bool,
    ) -> Result<Board> {
        self.update_as_creator(board_id, user_id, BoardUpdate::new().is_public(is_public))
            .await
    }

    /// Rename a board. Only the creator may do this.
    pub async fn rename_board(
        &self,
        board_id: &EntityId,
        user_id: &EntityId,
        title: &str,
    ) -> Result<Board> {
        let title = self.normalize_title(title)?;
        self.update_as_creator(board_id, user_id, BoardUpdate::new().title(title))
            .await
    }

    async fn update_as_creator(
        &self,
        board_id: &EntityId,
        user_id: &EntityId,
        update: BoardUpdate,
    ) -> Result<Board> {
        let board = self.get_board(board_id).await?;
        if !board.is_creator(user_id) {
            return Err(CorkboardError::Permission(
                "only the board creator may change it".to_string(),
            ));
        }
        BoardRepository::new(self.db.pool())
            .update(board_id, &update)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("board".to_string()))
    }

    /// Add a list to a board the user can access.
    pub async fn add_list(
        &self,
        board_id: &EntityId,
        user_id: &EntityId,
        title: &str,
    ) -> Result<BoardList> {
        let board = self.get_board(board_id).await?;
        self.require_write(&board, user_id).await?;
        let title = self.normalize_title(title)?;
        ListRepository::new(self.db.pool())
            .create(&NewList::new(board.id, title))
            .await
    }

    /// Lists of a board the user can access, in position order.
    pub async fn lists(&self, board_id: &EntityId, user_id: &EntityId) -> Result<Vec<BoardList>> {
        let board = self.get_board(board_id).await?;
        if !self.can_access(&board, user_id).await? {
            return Err(CorkboardError::Permission(
                "board is not visible to this user".to_string(),
            ));
        }
        ListRepository::new(self.db.pool())
            .list_by_board(board_id, false)
            .await
    }

    /// Add a card to a list on a board the user can access.
    pub async fn add_card(&self, new_card: &NewCard, user_id: &EntityId) -> Result<Card> {
        let list = ListRepository::new(self.db.pool())
            .get_by_id(&new_card.list_id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("list".to_string()))?;
        let board = self.get_board(&list.board_id).await?;
        self.require_write(&board, user_id).await?;
        if new_card.title.trim().is_empty() {
            return Err(CorkboardError::Validation(
                "card title must not be empty".to_string(),
            ));
        }
        CardRepository::new(self.db.pool()).create(new_card).await
    }

    /// Writing needs an open board and the creator or an active member.
    /// Pending invitees may read but not write.
    async fn require_write(&self, board: &Board, user_id: &EntityId) -> Result<()> {
        if board.is_closed {
            return Err(CorkboardError::Validation("board is closed".to_string()));
        }
        if board.is_creator(user_id) {
            return Ok(());
        }
        let relation = BoardMemberRepository::new(self.db.pool())
            .get(&board.id, user_id)
            .await?;
        if relation.is_some_and(|m| m.status == MemberStatus::Available) {
            Ok(())
        } else {
            Err(CorkboardError::Permission(
                "only board members may change its content".to_string(),
            ))
        }
    }

    fn normalize_title(&self, title: &str) -> Result<String> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(self.config.default_title.clone());
        }
        if title.chars().count() > self.config.max_title_length {
            return Err(CorkboardError::Validation(format!(
                "title must be at most {} characters",
                self.config.max_title_length
            )));
        }
        Ok(title.to_string())
    }
}
