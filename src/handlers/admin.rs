// src/handlers/admin.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::Html};
use tera::{Context, Tera};

use crate::{error::AppError, generator::QuizGenerator, models::quiz_item::GeneratedQuiz, views};

/// Renders the creation form.
/// Admin only.
pub async fn new_function_form(State(tera): State<Arc<Tera>>) -> Result<Html<String>, AppError> {
    views::render(&tera, views::ADMIN_NEW, &Context::new())
}

/// Asks the generative model for a new quiz item and returns it as JSON.
/// The item is not persisted.
/// Admin only.
pub async fn generate_function(
    State(generator): State<Arc<dyn QuizGenerator>>,
) -> Result<Json<GeneratedQuiz>, AppError> {
    let quiz = generator.generate().await?;
    tracing::info!("Generated function quiz: {}", quiz.title);
    Ok(Json(quiz))
}
