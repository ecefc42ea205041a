//! Board membership model for Corkboard.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::id::EntityId;

/// SQL list of the statuses that grant access to a board.
pub(crate) const PARTICIPATING_SQL: &str = "('available', 'invited')";

/// Membership status of a user on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Active member.
    Available,
    /// Invitation sent and not yet accepted.
    #[default]
    Invited,
    /// Former member. Kept for history, grants nothing.
    Removed,
}

impl MemberStatus {
    /// Convert status to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Available => "available",
            MemberStatus::Invited => "invited",
            MemberStatus::Removed => "removed",
        }
    }

    /// Whether this status lets the user see the board.
    pub fn is_participating(&self) -> bool {
        matches!(self, MemberStatus::Available | MemberStatus::Invited)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(MemberStatus::Available),
            "invited" => Ok(MemberStatus::Invited),
            "removed" => Ok(MemberStatus::Removed),
            _ => Err(format!("unknown member status: {s}")),
        }
    }
}

/// Relation between a user and a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardMember {
    /// Relation ID.
    pub id: EntityId,
    /// Board the user belongs to.
    pub board_id: EntityId,
    /// Member user.
    pub user_id: EntityId,
    /// Membership status.
    pub status: MemberStatus,
    /// When the relation was created.
    pub created_at: String,
}

/// Data for creating a membership relation.
#[derive(Debug, Clone)]
pub struct NewBoardMember {
    /// Board to join.
    pub board_id: EntityId,
    /// User joining.
    pub user_id: EntityId,
    /// Initial status (defaults to Invited).
    pub status: MemberStatus,
}

impl NewBoardMember {
    /// Create an invitation relation.
    pub fn new(board_id: EntityId, user_id: EntityId) -> Self {
        Self {
            board_id,
            user_id,
            status: MemberStatus::Invited,
        }
    }

    /// Set the initial status.
    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }
}
