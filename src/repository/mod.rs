// src/repository/mod.rs

//! Data access for quiz items.
//!
//! Handlers only see the [`QuizRepository`] trait. The Postgres-backed
//! implementation is used in production; the fixture implementation serves
//! two fixed items and needs no database.

mod fixture;
mod postgres;

pub use fixture::FixtureQuizRepository;
pub use postgres::PgQuizRepository;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::quiz_item::{NewQuizItem, QuizItem},
};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Inserts a new item and returns its generated id.
    async fn create(&self, item: &NewQuizItem) -> Result<i64, AppError>;

    /// Fails with `AppError::NotFound` when no row matches.
    async fn get_by_id(&self, id: i64) -> Result<QuizItem, AppError>;

    /// Returns every item. Order is unspecified.
    async fn list_all(&self) -> Result<Vec<QuizItem>, AppError>;
}
