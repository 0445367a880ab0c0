//! Process Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).
//! Every variable is optional and falls back to a local-development default.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use auth::AuthConfig;
use platform::password::HashCost;
use student::{StudentConfig, WriteInvalidation};
use thiserror::Error;
use tools::ToolsConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            var,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` runs on in-memory repositories
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    pub write_invalidation: WriteInvalidation,
    pub password_pepper: Option<Vec<u8>>,
    pub hash_cost: HashCost,
    pub contact_storage_dir: PathBuf,
    pub frontend_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_max_connections: 5,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cache_enabled: true,
            cache_ttl: Duration::from_secs(60),
            write_invalidation: WriteInvalidation::PointOnly,
            password_pepper: None,
            hash_cost: HashCost::Standard,
            contact_storage_dir: ToolsConfig::default().contact_storage_dir,
            frontend_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.database_url = get("DATABASE_URL");

        if let Some(v) = get("DATABASE_MAX_CONNECTIONS") {
            config.database_max_connections = v
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("DATABASE_MAX_CONNECTIONS", e))?;
        }
        if let Some(v) = get("BIND_ADDR") {
            config.bind_addr = v
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("BIND_ADDR", e))?;
        }
        if let Some(v) = get("CACHE_ENABLED") {
            config.cache_enabled = parse_bool(&v)
                .ok_or_else(|| ConfigError::invalid("CACHE_ENABLED", "expected true or false"))?;
        }
        if let Some(v) = get("CACHE_TTL_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("CACHE_TTL_SECS", e))?;
            if secs == 0 {
                return Err(ConfigError::invalid("CACHE_TTL_SECS", "must be positive"));
            }
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(v) = get("CACHE_WRITE_INVALIDATION") {
            config.write_invalidation = v
                .parse()
                .map_err(|e| ConfigError::invalid("CACHE_WRITE_INVALIDATION", e))?;
        }
        if let Some(v) = get("PASSWORD_PEPPER") {
            let pepper = platform::crypto::from_base64(v.trim())
                .map_err(|e| ConfigError::invalid("PASSWORD_PEPPER", e))?;
            config.password_pepper = Some(pepper);
        }
        if let Some(v) = get("CONTACT_STORAGE_DIR") {
            config.contact_storage_dir = PathBuf::from(v);
        }
        if let Some(v) = get("FRONTEND_ORIGINS") {
            config.frontend_origins = v
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            password_pepper: self.password_pepper.clone(),
            hash_cost: self.hash_cost,
        }
    }

    pub fn student_config(&self) -> StudentConfig {
        StudentConfig {
            cache_ttl: self.cache_ttl,
            write_invalidation: self.write_invalidation,
        }
    }

    pub fn tools_config(&self) -> ToolsConfig {
        ToolsConfig {
            contact_storage_dir: self.contact_storage_dir.clone(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
