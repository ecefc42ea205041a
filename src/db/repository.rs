//! User repository for Corkboard.
//!
//! This module provides CRUD operations for users in the database.

use sqlx::QueryBuilder;
use tracing::debug;

use super::user::{NewUser, User, UserUpdate};
use super::DbPool;
use crate::id::{is_valid_id, EntityId};
use crate::{CorkboardError, Result};

const USER_COLUMNS: &str = "id, display_name, email, created_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        if new_user.display_name.trim().is_empty() {
            return Err(CorkboardError::Validation(
                "display name must not be empty".to_string(),
            ));
        }

        let id = EntityId::new();
        sqlx::query("INSERT INTO users (id, display_name, email) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&new_user.display_name)
            .bind(&new_user.email)
            .execute(self.pool)
            .await?;
        debug!(user_id = %id, "created user");

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: &EntityId) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ? COLLATE NOCASE");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Resolve an untrusted id string to a stored user.
    ///
    /// Malformed ids resolve to `None` rather than an error.
    pub async fn resolve(&self, id: &str) -> Result<Option<User>> {
        if !is_valid_id(id) {
            return Ok(None);
        }
        self.get_by_id(&EntityId::parse(id)?).await
    }

    /// Check whether a user with the given ID exists.
    pub async fn exists(&self, id: &EntityId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    /// Update a user by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated user, or None if not found.
    pub async fn update(&self, id: &EntityId, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = query.separated(", ");

        if let Some(ref display_name) = update.display_name {
            separated.push("display_name = ");
            separated.push_bind_unseparated(display_name.clone());
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email.clone());
        }

        query.push(" WHERE id = ");
        query.push_bind(id.clone());

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a user by ID.
    ///
    /// Membership relations of the user are removed with it.
    /// Returns true if a user was deleted, false if not found.
    pub async fn delete(&self, id: &EntityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all users ordered by display name.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY display_name, id");
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
