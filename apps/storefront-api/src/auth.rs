//! Admin authentication.
//!
//! Handles admin password verification (argon2) and HS256 session tokens.
//!
//! ```text
//! POST /api/admin/login {email, password}
//!        │
//!        ▼
//! AdminCredentials::verify ──► JwtManager::issue_admin_token
//!                                      │
//!                                      ▼
//!                     Set-Cookie: admin_token=<jwt>; HttpOnly; SameSite=Strict
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ConfigError, ServerConfig};
use crate::error::{ApiError, ApiResult};

/// The only role the back-office knows.
pub const ADMIN_ROLE: &str = "admin";

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin email)
    pub sub: String,

    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT token manager.
pub struct JwtManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_secs: i64,
}

impl JwtManager {
    pub fn new(secret: &str, lifetime_secs: i64) -> Self {
        JwtManager {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs,
        }
    }

    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Issues an admin session token for `email`.
    pub fn issue_admin_token(&self, email: &str) -> ApiResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: email.to_string(),
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("Failed to generate token: {e}")))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected admin token");
                ApiError::unauthorized("Invalid or expired session")
            })
    }

    /// Validates a token and requires the admin role.
    pub fn validate_admin_token(&self, token: &str) -> ApiResult<Claims> {
        let claims = self.validate_token(token)?;

        if claims.role != ADMIN_ROLE {
            return Err(ApiError::unauthorized("Admin access required"));
        }

        Ok(claims)
    }
}

/// Configured back-office login.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    email: String,
    password_hash: String,
}

impl AdminCredentials {
    /// Uses `admin_password_hash` when set, else hashes `admin_password`.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        let password_hash = match (&config.admin_password_hash, &config.admin_password) {
            (Some(hash), _) => {
                PasswordHash::new(hash)
                    .map_err(|e| ConfigError::InvalidPasswordHash(e.to_string()))?;
                hash.clone()
            }
            (None, Some(password)) if !password.is_empty() => hash_password(password)?,
            _ => return Err(ConfigError::MissingRequired("admin_password".to_string())),
        };

        Ok(AdminCredentials {
            email: config.admin_email.trim().to_lowercase(),
            password_hash,
        })
    }

    /// Email is compared case-insensitively; the password with argon2.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        if email.trim().to_lowercase() != self.email {
            return false;
        }

        let parsed_hash = match PasswordHash::new(&self.password_hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, ConfigError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ConfigError::InvalidPasswordHash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret", 3600);

        let token = manager.issue_admin_token("admin@sindean.com").unwrap();
        let claims = manager.validate_admin_token(&token).unwrap();

        assert_eq!(claims.sub, "admin@sindean.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtManager::new("secret-a", 3600);
        let verifier = JwtManager::new("secret-b", 3600);

        let token = issuer.issue_admin_token("admin@sindean.com").unwrap();
        assert!(verifier.validate_admin_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s leeway
        let manager = JwtManager::new("test-secret", -120);
        let token = manager.issue_admin_token("admin@sindean.com").unwrap();
        assert!(manager.validate_admin_token(&token).is_err());
    }

    #[test]
    fn test_non_admin_role_rejected() {
        let manager = JwtManager::new("test-secret", 3600);
        let claims = Claims {
            sub: "someone".into(),
            role: "viewer".into(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
            jti: "t".into(),
        };
        let token = encode(&Header::default(), &claims, &manager.encoding).unwrap();

        assert!(manager.validate_token(&token).is_ok());
        assert!(manager.validate_admin_token(&token).is_err());
    }

    #[test]
    fn test_admin_credentials() {
        let config = ServerConfig {
            admin_email: "Admin@Sindean.com".into(),
            admin_password: Some("hunter22".into()),
            ..Default::default()
        };
        let admin = AdminCredentials::from_config(&config).unwrap();

        assert!(admin.verify("admin@sindean.com", "hunter22"));
        assert!(admin.verify("  ADMIN@sindean.com ", "hunter22"));
        assert!(!admin.verify("admin@sindean.com", "hunter23"));
        assert!(!admin.verify("other@sindean.com", "hunter22"));
    }

    #[test]
    fn test_precomputed_hash_wins() {
        let hash = hash_password("from-hash").unwrap();
        let config = ServerConfig {
            admin_password: Some("from-plain".into()),
            admin_password_hash: Some(hash),
            ..Default::default()
        };
        let admin = AdminCredentials::from_config(&config).unwrap();

        assert!(admin.verify(&config.admin_email, "from-hash"));
        assert!(!admin.verify(&config.admin_email, "from-plain"));
    }

    #[test]
    fn test_garbage_hash_rejected_at_startup() {
        let config = ServerConfig {
            admin_password_hash: Some("not-a-phc-string".into()),
            ..Default::default()
        };
        assert!(matches!(
            AdminCredentials::from_config(&config),
            Err(ConfigError::InvalidPasswordHash(_))
        ));
    }
}
