//! Application settings loaded from `config.toml` and the environment.
//!
//! Every section is optional in the file; missing values fall back to defaults.
//! `DATABASE_URL` and `BIND_ADDR` from the environment (or `.env`) take precedence
//! over the file. The `[[products]]` list seeds the product catalogue on startup.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Products to seed into the catalogue
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

/// HTTP server settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `0.0.0.0:8080`
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Database settings
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    super::database::DEFAULT_DATABASE_URL.to_string()
}

/// Configuration for a single seeded product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Display name of the product
    pub name: String,
    /// Barcode, used to skip products that are already present
    pub barcode: String,
    /// Unit price
    pub price: f64,
    /// Initial inventory count
    #[serde(default)]
    pub quantity: i32,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required product fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {}", path_ref.display());
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the application configuration.
///
/// Reads the file named by `INFOBAR_CONFIG` (default `./config.toml`), falling back to
/// defaults when it does not exist, then applies environment overrides.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var("INFOBAR_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

    let mut config = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        warn!("Config file {path} not found, using defaults");
        AppConfig::default()
    };

    if let Some(url) = super::database::database_url_from_env() {
        config.database.url = url;
    }
    if let Ok(bind_addr) = std::env::var("BIND_ADDR") {
        config.server.bind_addr = bind_addr;
    }

    info!(
        "Configuration loaded: bind_addr={}, {} seed products",
        config.server.bind_addr,
        config.products.len()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            bind_addr = "127.0.0.1:3000"

            [database]
            url = "sqlite::memory:"

            [[products]]
            name = "Coca-Cola Lata"
            barcode = "7894900011517"
            price = 5.5
            quantity = 24

            [[products]]
            name = "Trident Menta"
            barcode = "7895800304228"
            price = 3.0
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].name, "Coca-Cola Lata");
        assert_eq!(config.products[0].price, 5.5);
        assert_eq!(config.products[0].quantity, 24);
        assert_eq!(config.products[1].quantity, 0);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(
            config.database.url,
            crate::config::database::DEFAULT_DATABASE_URL
        );
        assert!(config.products.is_empty());
    }

    #[test]
    fn test_missing_product_field_is_rejected() {
        let toml_str = r#"
            [[products]]
            name = "No barcode"
            price = 1.0
        "#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
