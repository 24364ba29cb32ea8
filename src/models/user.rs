// src/models/user.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,

    pub name: String,

    /// Unique login address.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}
