//! Board model for Corkboard.
//!
//! A board carries two stored flags, `is_closed` and `is_public`. Callers
//! reason about them through [`Visibility`], and listing requests are named
//! by [`BoardListing`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::id::EntityId;

/// How a board can be discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Open board visible to its creator and members.
    Private,
    /// Open board visible to everyone.
    Public,
    /// Closed board, visible only to its creator and members. Closure
    /// overrides the public flag.
    Closed,
}

impl Visibility {
    /// Derive the visibility from the stored flag pair.
    pub fn from_flags(is_closed: bool, is_public: bool) -> Self {
        match (is_closed, is_public) {
            (true, _) => Visibility::Closed,
            (false, true) => Visibility::Public,
            (false, false) => Visibility::Private,
        }
    }

    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
            Visibility::Closed => "closed",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The board collections a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardListing {
    /// Open boards the user created plus private boards the user participates in.
    Mine,
    /// Private boards the user participates in but did not create.
    Invited,
    /// Every open public board.
    Public,
    /// Closed boards the user created or participates in.
    Closed,
}

impl BoardListing {
    /// All listings, in display order.
    pub const ALL: [BoardListing; 4] = [
        BoardListing::Mine,
        BoardListing::Invited,
        BoardListing::Public,
        BoardListing::Closed,
    ];

    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardListing::Mine => "mine",
            BoardListing::Invited => "invited",
            BoardListing::Public => "public",
            BoardListing::Closed => "closed",
        }
    }
}

impl fmt::Display for BoardListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoardListing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mine" | "my" => Ok(BoardListing::Mine),
            "invited" => Ok(BoardListing::Invited),
            "public" => Ok(BoardListing::Public),
            "closed" => Ok(BoardListing::Closed),
            _ => Err(format!("unknown board listing: {s}")),
        }
    }
}

/// Board entity representing a collaboration space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID.
    pub id: EntityId,
    /// Board title.
    pub title: String,
    /// Whether the board is closed.
    pub is_closed: bool,
    /// Whether the board is discoverable by everyone.
    pub is_public: bool,
    /// Identity of the user who created the board.
    pub creator_id: EntityId,
    /// Creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
}

impl Board {
    /// The board's visibility.
    pub fn visibility(&self) -> Visibility {
        Visibility::from_flags(self.is_closed, self.is_public)
    }

    /// Check whether `user_id` created this board.
    pub fn is_creator(&self, user_id: &EntityId) -> bool {
        &self.creator_id == user_id
    }
}

/// Data for creating a new board.
#[derive(Debug, Clone, Default)]
pub struct NewBoard {
    /// Board title. Blank titles are replaced by the configured default.
    pub title: String,
    /// Whether the board starts closed.
    pub is_closed: bool,
    /// Whether the board starts public.
    pub is_public: bool,
}

impl NewBoard {
    /// Create a private, open board.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_closed: false,
            is_public: false,
        }
    }

    /// Set the public flag.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Set the closed flag.
    pub fn with_closed(mut self, is_closed: bool) -> Self {
        self.is_closed = is_closed;
        self
    }
}

/// Data for updating an existing board.
#[derive(Debug, Clone, Default)]
pub struct BoardUpdate {
    /// New title.
    pub title: Option<String>,
    /// New closed flag.
    pub is_closed: Option<bool>,
    /// New public flag.
    pub is_public: Option<bool>,
}

impl BoardUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set closed flag.
    pub fn is_closed(mut self, is_closed: bool) -> Self {
        self.is_closed = Some(is_closed);
        self
    }

    /// Set public flag.
    pub fn is_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.is_closed.is_none() && self.is_public.is_none()
    }
}
