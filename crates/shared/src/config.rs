//! Application configuration management.
//!
//! Configuration is layered: `config/default.*`, then `config/{RUN_MODE}.*`,
//! then `TAVOLA__`-prefixed environment variables. The flat variable names
//! used by deployment environments (`DATABASE_URL`, `STRIPE_SECRET_KEY`,
//! `STRIPE_WEBHOOK_SECRET`, `FRONTEND_ORIGIN`, `ADMIN_ORIGIN`) take
//! precedence over everything else.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Payment provider configuration.
    #[serde(default)]
    pub payment: PaymentConfig,
    /// CORS origin configuration.
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of runtime worker threads.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_workers() -> usize {
    4
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Payment provider (Stripe) configuration.
///
/// Both secrets are optional: checkout and webhook handling live in a
/// separate service, so the server only reports whether they are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Secret API key.
    pub secret_key: Option<String>,
    /// Webhook signing secret.
    pub webhook_secret: Option<String>,
}

impl PaymentConfig {
    /// Returns `true` when the provider secret key is present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }
}

/// CORS origin configuration for the two known frontends.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Public storefront origin.
    #[serde(default = "default_frontend_origin")]
    pub frontend_origin: String,
    /// Admin panel origin.
    #[serde(default = "default_admin_origin")]
    pub admin_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            frontend_origin: default_frontend_origin(),
            admin_origin: default_admin_origin(),
        }
    }
}

impl CorsConfig {
    /// The allowed origins, storefront first.
    #[must_use]
    pub fn origins(&self) -> [&str; 2] {
        [&self.frontend_origin, &self.admin_origin]
    }
}

fn default_frontend_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_admin_origin() -> String {
    "http://localhost:3001".to_string()
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a required value
    /// (the database URL) is missing.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TAVOLA").separator("__"))
            // Flat names documented for the deployment environment win.
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("payment.secret_key", std::env::var("STRIPE_SECRET_KEY").ok())?
            .set_override_option(
                "payment.webhook_secret",
                std::env::var("STRIPE_WEBHOOK_SECRET").ok(),
            )?
            .set_override_option("cors.frontend_origin", std::env::var("FRONTEND_ORIGIN").ok())?
            .set_override_option("cors.admin_origin", std::env::var("ADMIN_ORIGIN").ok())?
            .build()?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS_CLEARED: [(&str, Option<&str>); 8] = [
        ("DATABASE_URL", None),
        ("STRIPE_SECRET_KEY", None),
        ("STRIPE_WEBHOOK_SECRET", None),
        ("FRONTEND_ORIGIN", None),
        ("ADMIN_ORIGIN", None),
        ("RUN_MODE", None),
        ("TAVOLA__SERVER__PORT", None),
        ("TAVOLA__DATABASE__URL", None),
    ];

    fn with_env<const N: usize>(vars: [(&str, Option<&str>); N], f: impl FnOnce()) {
        let mut all: Vec<(&str, Option<&str>)> = VARS_CLEARED.to_vec();
        all.extend(vars);
        temp_env::with_vars(all, f);
    }

    #[test]
    fn test_defaults_with_database_url_only() {
        with_env(
            [("DATABASE_URL", Some("postgres://localhost/tavola_dev"))],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.port, 8000);
                assert_eq!(config.server.workers, 4);
                assert_eq!(config.database.url, "postgres://localhost/tavola_dev");
                assert_eq!(config.database.max_connections, 10);
                assert!(!config.payment.is_configured());
                assert_eq!(
                    config.cors.origins(),
                    ["http://localhost:3000", "http://localhost:3001"]
                );
            },
        );
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        with_env([], || {
            let result = AppConfig::load();
            assert!(matches!(result, Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_prefixed_env_overrides() {
        with_env(
            [
                ("DATABASE_URL", Some("postgres://localhost/tavola_dev")),
                ("TAVOLA__SERVER__PORT", Some("9000")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.server.port, 9000);
            },
        );
    }

    #[test]
    fn test_flat_names_win_over_prefixed() {
        with_env(
            [
                ("TAVOLA__DATABASE__URL", Some("postgres://prefixed/db")),
                ("DATABASE_URL", Some("postgres://flat/db")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "postgres://flat/db");
            },
        );
    }

    #[test]
    fn test_payment_and_cors_from_flat_names() {
        with_env(
            [
                ("DATABASE_URL", Some("postgres://localhost/tavola_dev")),
                ("STRIPE_SECRET_KEY", Some("sk_test_123")),
                ("STRIPE_WEBHOOK_SECRET", Some("whsec_456")),
                ("FRONTEND_ORIGIN", Some("https://shop.example.com")),
                ("ADMIN_ORIGIN", Some("https://admin.example.com")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert!(config.payment.is_configured());
                assert_eq!(config.payment.webhook_secret.as_deref(), Some("whsec_456"));
                assert_eq!(
                    config.cors.origins(),
                    ["https://shop.example.com", "https://admin.example.com"]
                );
            },
        );
    }
}
