//! Service configuration.
//!
//! Settings come from built-in defaults overlaid with process environment
//! variables (`ADMIN_PASSWORD`, `PORT`, `CORS_ORIGINS`, ...). The binary
//! applies command-line flags on top.

use config::{Config, ConfigError, Environment};
use folio_session::MAX_TTL_DAYS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Placeholder admin password used when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "secret123";

/// Placeholder cookie signing secret used when none is configured.
pub const DEFAULT_SECRET_KEY: &str = "folio-dev-secret-key";

/// Runtime configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Static admin secret compared on login.
    pub admin_password: String,
    /// Key material for signing session cookies.
    pub secret_key: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Raise the default log level to debug.
    pub debug: bool,
    /// Deployment environment; `production` enables secure cookies.
    pub environment: String,
    /// Origins allowed to make credentialed cross-origin requests.
    pub cors_origins: Vec<String>,
    /// Audit log directory. Empty disables the audit log.
    pub log_dir: String,
    /// `pretty` or `json`.
    pub log_format: String,
    /// Session lifetime in days.
    pub session_ttl_days: i64,
    /// Preload the sample posts.
    pub seed_posts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            debug: false,
            environment: "development".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:5500".to_string(),
            ],
            log_dir: "logs".to_string(),
            log_format: "pretty".to_string(),
            session_ttl_days: folio_session::DEFAULT_TTL_DAYS,
            seed_posts: true,
        }
    }
}

impl Settings {
    /// Load settings from defaults and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Self::environment())
    }

    /// Load settings from defaults and an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_environment(Self::environment().source(Some(vars)))
    }

    // Values stay strings so secrets like "007" survive; typed fields are
    // converted on deserialize.
    fn environment() -> Environment {
        Environment::default()
            .list_separator(",")
            .with_list_parse_key("cors_origins")
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("admin_password", defaults.admin_password)?
            .set_default("secret_key", defaults.secret_key)?
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port)?
            .set_default("debug", defaults.debug)?
            .set_default("environment", defaults.environment)?
            .set_default("cors_origins", defaults.cors_origins)?
            .set_default("log_dir", defaults.log_dir)?
            .set_default("log_format", defaults.log_format)?
            .set_default("session_ttl_days", defaults.session_ttl_days)?
            .set_default("seed_posts", defaults.seed_posts)?
            .add_source(env)
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !(1..=MAX_TTL_DAYS).contains(&self.session_ttl_days) {
            return Err(ConfigError::Message(format!(
                "session_ttl_days must be between 1 and {MAX_TTL_DAYS}, got {}",
                self.session_ttl_days
            )));
        }
        Ok(self)
    }

    /// Whether the service runs in production.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Audit log directory, if enabled.
    pub fn audit_dir(&self) -> Option<PathBuf> {
        let dir = self.log_dir.trim();
        (!dir.is_empty()).then(|| PathBuf::from(dir))
    }

    /// Default log level for the `folio` targets.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    /// Whether the admin password is still the placeholder.
    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }

    /// Whether the cookie secret is still the placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// `host:port` string to bind to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
