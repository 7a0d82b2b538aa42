//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_OUTBOX_BATCH_SIZE,
    DEFAULT_OUTBOX_POLL_INTERVAL_MS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};
use crate::domain::RetentionPolicy;

const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// What happens to a contact request once it leaves the pending state
    pub retention: RetentionPolicy,
    /// Push endpoint for client notifications; unset means log-only delivery
    pub notify_webhook_url: Option<String>,
    pub outbox_batch_size: u64,
    pub outbox_poll_interval_ms: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("retention", &self.retention)
            .field(
                "notify_webhook_url",
                &self.notify_webhook_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("outbox_batch_size", &self.outbox_batch_size)
            .field("outbox_poll_interval_ms", &self.outbox_poll_interval_ms)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement),
    /// or if REQUEST_RETENTION holds an unknown policy.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let retention = match env::var("REQUEST_RETENTION") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|e| panic!("Invalid REQUEST_RETENTION: {}", e)),
            Err(_) => RetentionPolicy::default(),
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            retention,
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            outbox_batch_size: env::var("OUTBOX_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_OUTBOX_BATCH_SIZE),
            outbox_poll_interval_ms: env::var("OUTBOX_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_OUTBOX_POLL_INTERVAL_MS),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Replace the signing secret (used by tests and embedded setups).
    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Development defaults, no environment lookups.
impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            retention: RetentionPolicy::default(),
            notify_webhook_url: None,
            outbox_batch_size: DEFAULT_OUTBOX_BATCH_SIZE,
            outbox_poll_interval_ms: DEFAULT_OUTBOX_POLL_INTERVAL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let config = Config {
            notify_webhook_url: Some("https://push.example.com/hook?token=abc".to_string()),
            ..Config::default()
        };

        let debug = format!("{:?}", config);
        assert!(!debug.contains(DEV_JWT_SECRET));
        assert!(!debug.contains("token=abc"));
        assert!(!debug.contains("postgres://"));
    }

    #[test]
    fn default_config_deletes_processed_requests() {
        assert_eq!(Config::default().retention, RetentionPolicy::Delete);
        assert_eq!(Config::default().server_addr(), "0.0.0.0:3000");
    }
}
