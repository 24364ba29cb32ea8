// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use naming_quiz::config::Config;
use naming_quiz::generator::GeminiGenerator;
use naming_quiz::repository::{FixtureQuizRepository, PgQuizRepository, QuizRepository};
use naming_quiz::routes;
use naming_quiz::state::AppState;
use naming_quiz::seed::seed_owner_user;
use naming_quiz::views;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let repo: Arc<dyn QuizRepository> = match &config.database_url {
        Some(database_url) if !config.test_mode => {
            let pool = connect_with_retry(database_url).await;

            tracing::info!("Running migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Migrations applied successfully.");

            if let Err(e) = seed_owner_user(
                &pool,
                config.owner_id,
                &config.owner_email,
                &config.owner_password,
            )
            .await
            {
                tracing::error!("Failed to seed owner user, creating functions will fail: {:?}", e);
            }

            Arc::new(PgQuizRepository::new(pool, config.owner_id))
        }
        _ => {
            tracing::info!("Test environment detected, serving built-in functions without a database");
            Arc::new(FixtureQuizRepository::new())
        }
    };

    let generator = Arc::new(GeminiGenerator::from_config(&config));
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; AI generation will fail");
    }

    let templates = views::load().expect("Failed to load templates");

    let state = AppState::new(repo, generator, templates, config.clone());

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}

async fn connect_with_retry(database_url: &str) -> PgPool {
    let mut retry_count = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(25)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(300))
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to connect to database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");
    pool
}
