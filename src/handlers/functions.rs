// src/handlers/functions.rs

use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
};
use tera::{Context, Tera};
use validator::Validate;

use crate::{
    error::AppError,
    models::quiz_item::CreateQuizForm,
    repository::QuizRepository,
    views,
};

/// Static landing page.
pub async fn index(State(tera): State<Arc<Tera>>) -> Result<Html<String>, AppError> {
    views::render(&tera, views::INDEX, &Context::new())
}

/// Lists every quiz item.
pub async fn list_functions(
    State(repo): State<Arc<dyn QuizRepository>>,
    State(tera): State<Arc<Tera>>,
) -> Result<impl IntoResponse, AppError> {
    let functions = repo.list_all().await?;

    let mut context = Context::new();
    context.insert("functions", &functions);
    views::render(&tera, views::FUNCTIONS, &context)
}

/// Shows one quiz item.
///
/// An id that is not an integer cannot match any row, so it is a 404 as well.
pub async fn get_function(
    State(repo): State<Arc<dyn QuizRepository>>,
    State(tera): State<Arc<Tera>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("Function {} not found", id)))?;

    let function = repo.get_by_id(id).await?;

    let mut context = Context::new();
    context.insert("function", &function);
    views::render(&tera, views::FUNCTION, &context)
}

/// Creates a quiz item from the admin form and redirects to the list.
///
/// Option slots with an empty value are dropped, and the answer has to be
/// one of the remaining option values.
pub async fn create_function(
    State(repo): State<Arc<dyn QuizRepository>>,
    Form(form): Form<CreateQuizForm>,
) -> Result<impl IntoResponse, AppError> {
    let item = form.into_new_item();

    if let Err(validation_errors) = item.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = repo.create(&item).await?;
    tracing::info!("Created function {} ({})", id, item.title);

    Ok(Redirect::to("/functions"))
}
