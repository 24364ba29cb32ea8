// src/lib.rs

pub mod config;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;
pub mod views;

// Re-export specific items for convenience if needed
pub use routes::create_router;
