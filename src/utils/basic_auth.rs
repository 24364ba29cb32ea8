// src/utils/basic_auth.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use subtle::ConstantTimeEq;

use crate::{config::Config, error::AppError};

/// Decodes an `Authorization: Basic <base64(user:password)>` header value.
pub fn parse_basic_credentials(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// Constant-time string comparison.
fn ct_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Axum Middleware: Basic authentication for the admin area.
///
/// Checks the credentials against the configured admin account.
/// Missing or wrong credentials get `AppError::AuthError`, a 401 with a
/// `WWW-Authenticate` challenge.
pub async fn basic_auth_middleware(
    State(config): State<Config>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic_credentials);

    let authorized = match credentials {
        Some((username, password)) => {
            // Evaluate both so a wrong username takes as long as a wrong password.
            let user_ok = ct_eq(&username, &config.admin_username);
            let pass_ok = ct_eq(&password, &config.admin_password);
            user_ok & pass_ok
        }
        None => false,
    };

    if !authorized {
        tracing::warn!("Rejected admin request to {}", req.uri().path());
        return Err(AppError::AuthError("Unauthorized".to_string()));
    }

    Ok(next.run(req).await)
}
