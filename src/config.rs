// src/config.rs

use dotenvy::dotenv;
use std::env;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Every item created through the app belongs to this account until
/// multi-user support exists.
pub const DEFAULT_OWNER_ID: i64 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` only in test mode, where the fixture repository is used.
    pub database_url: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub admin_username: String,
    pub admin_password: String,
    pub owner_id: i64,
    pub owner_email: String,
    pub owner_password: String,
    pub test_mode: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let test_mode = env::var("ENV").map(|v| v == "test").unwrap_or(false);

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        if database_url.is_none() && !test_mode {
            panic!("DATABASE_URL must be set");
        }

        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|v| !v.is_empty());

        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let gemini_base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());

        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "password".to_string());

        let owner_id = env::var("OWNER_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_OWNER_ID);

        let owner_email =
            env::var("OWNER_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
        let owner_password = env::var("OWNER_PASSWORD").unwrap_or_else(|_| "password".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            admin_username,
            admin_password,
            owner_id,
            owner_email,
            owner_password,
            test_mode,
            port,
            rust_log,
        }
    }
}

impl Default for Config {
    /// Settings for running without a database, used by tests.
    fn default() -> Self {
        Self {
            database_url: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            admin_username: "admin".to_string(),
            admin_password: "password".to_string(),
            owner_id: DEFAULT_OWNER_ID,
            owner_email: "admin@example.com".to_string(),
            owner_password: "password".to_string(),
            test_mode: true,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}
