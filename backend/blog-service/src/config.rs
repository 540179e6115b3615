/// Configuration management for Blog Service
///
/// This module handles loading configuration from environment variables,
/// optionally seeded from a `.env` file.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheme that selects the in-process document store instead of MongoDB.
pub const MEMORY_DATABASE_URL: &str = "memory://";

const DEFAULT_DATABASE_NAME: &str = "blog_cms";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse {key}='{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Rejected(String),
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Admin login reference credentials
    pub admin: AdminConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Cross-origin policy.
///
/// The defaults reproduce the historical behaviour of this service: any
/// origin, any method, any header, and credentials allowed. Browsers only
/// honour credentialed requests for an echoed origin, so this combination
/// lets any site make authenticated calls on a visitor's behalf. It is
/// refused in production.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, `*` for any
    pub allowed_origins: String,
    /// Whether credentialed requests are supported
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.origins().any(|origin| origin == "*")
    }

    /// Wildcard origins combined with credentials.
    pub fn is_permissive_with_credentials(&self) -> bool {
        self.allow_credentials && self.allows_any_origin()
    }

    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_string(),
            allow_credentials: true,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string; `None` leaves the service without a database
    pub url: Option<String>,
    /// Database name override
    pub name: Option<String>,
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url.as_deref() == Some(MEMORY_DATABASE_URL)
    }

    /// Resolve the database name: explicit override, then the name carried
    /// by the connection string, then the service default.
    pub fn resolve_name(&self, uri_default: Option<&str>) -> String {
        self.name
            .as_deref()
            .or(uri_default)
            .unwrap_or(DEFAULT_DATABASE_NAME)
            .to_string()
    }
}

/// Admin login reference credentials (plaintext)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let app_env = env_or("APP_ENV", "development");
        let production = app_env.eq_ignore_ascii_case("production");

        let cors = CorsConfig {
            allowed_origins: env_or("CORS_ALLOWED_ORIGINS", "*"),
            allow_credentials: parse_env_or_default("CORS_ALLOW_CREDENTIALS", true)?,
        };
        if production && cors.is_permissive_with_credentials() {
            return Err(ConfigError::Rejected(
                "CORS_ALLOWED_ORIGINS cannot be '*' with credentials in production".to_string(),
            ));
        }

        let defaults = AdminConfig::default();

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: env_or("HOST", "0.0.0.0"),
                port: parse_env_or_default("PORT", 8000)?,
            },
            cors,
            database: DatabaseConfig {
                url: non_empty_env("DATABASE_URL"),
                name: non_empty_env("DATABASE_NAME"),
            },
            admin: AdminConfig {
                username: std::env::var("ADMIN_USER").unwrap_or(defaults.username),
                password: std::env::var("ADMIN_PASS").unwrap_or(defaults.password),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env_or_default<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
