// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{admin, functions},
    state::AppState,
    utils::basic_auth::basic_auth_middleware,
};

/// Assembles the main application router.
///
/// * Public pages: landing page, list, detail, and the form submission target.
/// * `/admin` routes sit behind HTTP Basic authentication.
/// * Applies request tracing globally.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/functions/new", get(admin::new_function_form))
        .route("/functions/generate", post(admin::generate_function))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_middleware,
        ));

    // POST /functions is reachable without credentials, unlike the admin form
    // that posts to it.
    let function_routes = Router::new()
        .route("/", get(functions::index))
        .route("/function/{id}", get(functions::get_function))
        .route(
            "/functions",
            get(functions::list_functions).post(functions::create_function),
        );

    Router::new()
        .merge(function_routes)
        .nest("/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
