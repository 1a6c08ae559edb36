//! Shared application state.

use std::sync::Arc;

use sindean_db::Database;

use crate::auth::{AdminCredentials, JwtManager};
use crate::config::{ConfigError, ServerConfig};

/// Cloned into every handler; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub admin: Arc<AdminCredentials>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Result<Self, ConfigError> {
        let admin = AdminCredentials::from_config(&config)?;
        let jwt = JwtManager::new(&config.jwt_secret, config.jwt_lifetime_secs);

        Ok(AppState {
            db,
            jwt: Arc::new(jwt),
            admin: Arc::new(admin),
            config: Arc::new(config),
        })
    }
}
