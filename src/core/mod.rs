//! Configuration, shared data model and settings persistence

pub mod config;
pub mod models;
pub mod settings;
