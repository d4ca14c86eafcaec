/// Database connection and table management
pub mod database;

/// Application settings from config.toml and the environment
pub mod settings;

pub use settings::{AppConfig, ProductConfig, load_app_config};
