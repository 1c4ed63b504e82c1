//! Process configuration for the task store server and the board client.
//!
//! Configuration is resolved once at startup and passed explicitly into each
//! layer. The server reads command-line flags with environment fallbacks
//! through [`ServerArgs`]; the board client reads its API base URL through
//! [`BoardConfig::from_env`].

use crate::task::{
    domain::CompletionPolicy,
    services::{DeletePolicy, TaskBehavior},
};
use axum::http::HeaderValue;
use clap::Parser;
use thiserror::Error;

/// Base URL the board client talks to when `API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Errors raised while resolving configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The completion policy is neither `derive` nor `independent`.
    #[error("unknown completion policy '{0}', expected derive or independent")]
    InvalidCompletionPolicy(String),
    /// The delete policy is neither `idempotent` nor `strict`.
    #[error("unknown delete policy '{0}', expected idempotent or strict")]
    InvalidDeletePolicy(String),
    /// A CORS origin is not a valid header value.
    #[error("invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsPolicy {
    /// Any origin; the request origin is mirrored back.
    #[default]
    AnyOrigin,
    /// Only the listed origins.
    AllowList(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// Parses a comma-separated origin list. An absent, blank or `*` value
    /// allows every origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCorsOrigin`] for an origin that cannot
    /// be sent as a header value.
    pub fn parse(value: Option<&str>) -> Result<Self, ConfigError> {
        let Some(raw) = value.map(str::trim).filter(|text| !text.is_empty()) else {
            return Ok(Self::AnyOrigin);
        };
        if raw == "*" {
            return Ok(Self::AnyOrigin);
        }

        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::AllowList(origins))
    }
}

/// Parses `derive` or `independent`, ignoring case.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidCompletionPolicy`] for any other value.
pub fn parse_completion_policy(value: &str) -> Result<CompletionPolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "derive" => Ok(CompletionPolicy::DeriveFromStatus),
        "independent" => Ok(CompletionPolicy::Independent),
        _ => Err(ConfigError::InvalidCompletionPolicy(value.to_owned())),
    }
}

/// Parses `idempotent` or `strict`, ignoring case.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDeletePolicy`] for any other value.
pub fn parse_delete_policy(value: &str) -> Result<DeletePolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "idempotent" => Ok(DeletePolicy::Idempotent),
        "strict" => Ok(DeletePolicy::Strict),
        _ => Err(ConfigError::InvalidDeletePolicy(value.to_owned())),
    }
}

/// Command-line flags for the task store server.
#[derive(Debug, Clone, Parser)]
#[command(name = "collabtask-server", about = "CollabTask task store API")]
pub struct ServerArgs {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// `PostgreSQL` connection URL; the in-memory store is used when unset.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Comma-separated allowed origins, or `*` for any.
    #[arg(long, env = "CORS_ORIGINS")]
    pub cors_origins: Option<String>,

    /// Whether status patches derive `completed`: `derive` or `independent`.
    #[arg(long, env = "COMPLETION_POLICY", default_value = "derive")]
    pub completion_policy: String,

    /// Whether deleting an unknown task fails: `idempotent` or `strict`.
    #[arg(long, env = "DELETE_POLICY", default_value = "idempotent")]
    pub delete_policy: String,
}

impl ServerArgs {
    /// Validates the flags into an [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a policy or origin value is invalid.
    pub fn into_config(self) -> Result<AppConfig, ConfigError> {
        let behavior = TaskBehavior {
            completion: parse_completion_policy(&self.completion_policy)?,
            delete: parse_delete_policy(&self.delete_policy)?,
        };
        let cors = CorsPolicy::parse(self.cors_origins.as_deref())?;
        let database_url = self.database_url.filter(|url| !url.trim().is_empty());

        Ok(AppConfig {
            host: self.host,
            port: self.port,
            database_url,
            cors,
            behavior,
        })
    }
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// `PostgreSQL` connection URL, if any.
    pub database_url: Option<String>,
    /// Allowed browser origins.
    pub cors: CorsPolicy,
    /// Task service behaviour switches.
    pub behavior: TaskBehavior,
}

impl AppConfig {
    /// Returns `host:port` for binding.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 5000,
            database_url: None,
            cors: CorsPolicy::default(),
            behavior: TaskBehavior::default(),
        }
    }
}

/// Board client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Base URL of the task store API, without a trailing slash.
    pub api_base_url: String,
}

impl BoardConfig {
    /// Creates a configuration for the given base URL.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let url = api_base_url.into();
        Self {
            api_base_url: url.trim_end_matches('/').to_owned(),
        }
    }

    /// Reads `API_URL`, falling back to [`DEFAULT_API_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_value(std::env::var("API_URL").ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_API_URL),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
