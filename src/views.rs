// src/views.rs

//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary so the server does not depend on
//! its working directory.

use axum::response::Html;
use tera::{Context, Tera};

use crate::error::AppError;

pub const INDEX: &str = "index.html";
pub const FUNCTIONS: &str = "functions.html";
pub const FUNCTION: &str = "function.html";
pub const ADMIN_NEW: &str = "admin/new.html";

const BASE: &str = "base.html";

/// Builds the template set. Names ending in `.html` are autoescaped.
pub fn load() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (BASE, include_str!("../templates/base.html")),
        (INDEX, include_str!("../templates/index.html")),
        (FUNCTIONS, include_str!("../templates/functions.html")),
        (FUNCTION, include_str!("../templates/function.html")),
        (ADMIN_NEW, include_str!("../templates/admin/new.html")),
    ])?;
    Ok(tera)
}

pub fn render(tera: &Tera, name: &str, context: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(tera.render(name, context)?))
}
