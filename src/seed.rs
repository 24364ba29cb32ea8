// src/seed.rs

use sqlx::PgPool;

use crate::{error::AppError, models::user::User, utils::hash::hash_password};

/// Makes sure the account that owns every created function exists.
///
/// Fails when the row could not be inserted, e.g. because another user
/// already holds `email`; later inserts into `functions` would otherwise all
/// violate the foreign key.
pub async fn seed_owner_user(
    pool: &PgPool,
    owner_id: i64,
    email: &str,
    password: &str,
) -> Result<(), AppError> {
    let owner = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password, created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    if let Some(owner) = owner {
        tracing::info!("Owner user present: {} <{}>", owner.name, owner.email);
        return Ok(());
    }

    tracing::info!("Seeding owner user {} <{}>", owner_id, email);
    let hashed_password = hash_password(password)?;

    let inserted = sqlx::query(
        "INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
    )
    .bind(owner_id)
    .bind("admin")
    .bind(email)
    .bind(hashed_password)
    .execute(pool)
    .await?
    .rows_affected();

    if inserted == 0 {
        return Err(AppError::InternalServerError(format!(
            "owner user {} was not created: email {} is already taken",
            owner_id, email
        )));
    }

    // Keep the sequence ahead of the explicitly chosen id.
    sqlx::query("SELECT setval(pg_get_serial_sequence('users', 'id'), GREATEST((SELECT MAX(id) FROM users), 1))")
        .execute(pool)
        .await?;

    tracing::info!("Owner user created successfully.");
    Ok(())
}
