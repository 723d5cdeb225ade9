/// Database configuration and connection management
pub mod database;

/// Shop configuration loading from config.toml
pub mod shop;
