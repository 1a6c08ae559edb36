//! Server configuration.
//!
//! Layered with the `config` crate, later sources overriding earlier ones:
//!
//! ```text
//! ServerConfig::default()  ──►  sindean.toml (optional)  ──►  SINDEAN_* env
//! ```
//!
//! `.env` is loaded by `main` before this runs, so `SINDEAN_JWT_SECRET=...`
//! in `.env` behaves like a real environment variable.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use sindean_core::Money;

/// Development-only signing secret. Rejected in production.
pub const DEV_JWT_SECRET: &str = "sindean-dev-secret-change-in-production";

/// Development-only admin password. Rejected in production.
pub const DEV_ADMIN_PASSWORD: &str = "admin_password_123";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Storefront API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: SocketAddr,

    /// SQLite database file
    pub database_path: String,

    pub max_connections: u32,

    /// HS256 secret for admin session tokens
    pub jwt_secret: String,

    /// Admin session lifetime in seconds (24h)
    pub jwt_lifetime_secs: i64,

    pub admin_email: String,

    /// Plaintext admin password, hashed at startup
    pub admin_password: Option<String>,

    /// Pre-computed argon2 PHC string; wins over `admin_password`
    pub admin_password_hash: Option<String>,

    pub environment: Environment,

    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub log_level: String,

    /// Cash-on-delivery fee in halalas
    pub cod_fee_halalas: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_path: "./sindean.db".to_string(),
            max_connections: 5,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_lifetime_secs: 60 * 60 * 24,
            admin_email: "admin@sindean.com".to_string(),
            admin_password: Some(DEV_ADMIN_PASSWORD.to_string()),
            admin_password_hash: None,
            environment: Environment::Development,
            log_level: "info,sindean_api=debug".to_string(),
            cod_fee_halalas: 1500,
        }
    }
}

impl ServerConfig {
    /// Loads defaults, then `sindean.toml`, then `SINDEAN_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&ServerConfig::default())?)
            .add_source(config::File::with_name("sindean").required(false))
            .add_source(config::Environment::with_prefix("SINDEAN").try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects development credentials outside development.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cod_fee_halalas < 0 {
            return Err(ConfigError::InvalidValue("cod_fee_halalas".to_string()));
        }
        if self.jwt_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("jwt_lifetime_secs".to_string()));
        }

        if self.is_production() {
            if self.jwt_secret == DEV_JWT_SECRET || self.jwt_secret.trim().is_empty() {
                return Err(ConfigError::MissingRequired("jwt_secret".to_string()));
            }
            let has_hash = self.admin_password_hash.is_some();
            let has_password = self
                .admin_password
                .as_deref()
                .is_some_and(|p| !p.is_empty() && p != DEV_ADMIN_PASSWORD);
            if !has_hash && !has_password {
                return Err(ConfigError::MissingRequired("admin_password".to_string()));
            }
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn cod_fee(&self) -> Money {
        Money::from_halalas(self.cod_fee_halalas)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid admin password hash: {0}")]
    InvalidPasswordHash(String),
}
