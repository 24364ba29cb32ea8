// src/repository/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

use super::QuizRepository;
use crate::{
    error::AppError,
    models::quiz_item::{NewQuizItem, QuizItem, QuizItemRow},
};

#[derive(Clone)]
pub struct PgQuizRepository {
    pool: PgPool,
    owner_id: i64,
}

impl PgQuizRepository {
    /// `owner_id` is stamped on every row this repository creates.
    pub fn new(pool: PgPool, owner_id: i64) -> Self {
        Self { pool, owner_id }
    }
}

#[async_trait]
impl QuizRepository for PgQuizRepository {
    async fn create(&self, item: &NewQuizItem) -> Result<i64, AppError> {
        let options = item.options_json()?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO functions (title, description, code, options, answer, user_id, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.code)
        .bind(options)
        .bind(&item.answer)
        .bind(self.owner_id)
        .bind(item.is_public)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert function: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> Result<QuizItem, AppError> {
        let row = sqlx::query_as::<_, QuizItemRow>(
            r#"
            SELECT id, title, description, code, options, answer, is_public, user_id, created_at, updated_at
            FROM functions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound(format!("Function {} not found", id)))?;

        QuizItem::try_from(row)
    }

    async fn list_all(&self) -> Result<Vec<QuizItem>, AppError> {
        let rows = sqlx::query_as::<_, QuizItemRow>(
            r#"
            SELECT id, title, description, code, options, answer, is_public, user_id, created_at, updated_at
            FROM functions
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list functions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        // One undecodable row fails the whole listing.
        rows.into_iter().map(QuizItem::try_from).collect()
    }
}
