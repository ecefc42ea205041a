//! List model for Corkboard.
//!
//! A list is an ordered column of cards on a board.

use serde::Serialize;

use crate::id::EntityId;

/// List entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BoardList {
    /// Unique list ID.
    pub id: EntityId,
    /// Board this list belongs to.
    pub board_id: EntityId,
    /// List title.
    pub title: String,
    /// Ordering key within the board (ascending).
    pub position: i64,
    /// Whether the list is archived.
    pub is_archived: bool,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating a new list.
#[derive(Debug, Clone)]
pub struct NewList {
    /// Board to add the list to.
    pub board_id: EntityId,
    /// List title.
    pub title: String,
}

impl NewList {
    /// Create a list appended to the end of the board.
    pub fn new(board_id: EntityId, title: impl Into<String>) -> Self {
        Self {
            board_id,
            title: title.into(),
        }
    }
}
