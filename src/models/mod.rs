// src/models/mod.rs

pub mod quiz_item;
pub mod user;
