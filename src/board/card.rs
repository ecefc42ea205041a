//! Card model for Corkboard.

use serde::Serialize;

use crate::id::EntityId;

/// Card entity, an item within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Card {
    /// Unique card ID.
    pub id: EntityId,
    /// List holding the card.
    pub list_id: EntityId,
    /// Card title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Ordering key within the list (ascending).
    pub position: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating a new card.
#[derive(Debug, Clone)]
pub struct NewCard {
    /// List to add the card to.
    pub list_id: EntityId,
    /// Card title.
    pub title: String,
    /// Description (optional).
    pub description: Option<String>,
}

impl NewCard {
    /// Create a card appended to the end of the list.
    pub fn new(list_id: EntityId, title: impl Into<String>) -> Self {
        Self {
            list_id,
            title: title.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Data for updating an existing card.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
}

impl CardUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set new description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}
