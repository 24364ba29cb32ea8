use std::sync::Arc;

use axum::extract::FromRef;
use tera::Tera;

use crate::{config::Config, generator::QuizGenerator, repository::QuizRepository};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn QuizRepository>,
    pub generator: Arc<dyn QuizGenerator>,
    pub views: Arc<Tera>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn QuizRepository>,
        generator: Arc<dyn QuizGenerator>,
        views: Tera,
        config: Config,
    ) -> Self {
        Self {
            repo,
            generator,
            views: Arc::new(views),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<dyn QuizRepository> {
    fn from_ref(state: &AppState) -> Self {
        state.repo.clone()
    }
}

impl FromRef<AppState> for Arc<dyn QuizGenerator> {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}

impl FromRef<AppState> for Arc<Tera> {
    fn from_ref(state: &AppState) -> Self {
        state.views.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
