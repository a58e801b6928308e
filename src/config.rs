//! Process configuration, read once at startup

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::llm::core::config::LOCAL_MODEL_KEY;
use crate::llm::{ProviderRegistry, DEFAULT_REQUEST_TIMEOUT};
use crate::message_store::StoreConfig;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_POOL_SIZE: usize = 16;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("Missing required setting {0}")]
    Missing(String),

    #[error("Unknown provider kind '{0}'")]
    UnknownProvider(String),

    #[error("Model '{0}' is defined more than once")]
    DuplicateModel(String),

    #[error("Invalid models file: {0}")]
    ModelsFile(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which message store backend to run with
#[derive(Debug, Clone)]
pub enum StoreBackend {
    Memory,
    Postgres(StoreConfig),
}

/// Credentials required by every route when present
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuthCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub auth: Option<BasicAuthCredentials>,
    pub request_timeout: Duration,
    pub registry: ProviderRegistry,
}

impl AppConfig {
    /// Load from the process environment (after `.env`, if any)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host: IpAddr = parse_var(&var, "HOST")?.unwrap_or(IpAddr::from([127, 0, 0, 1]));
        let port: u16 = parse_var(&var, "PORT")?.unwrap_or(DEFAULT_PORT);

        let store = match var("STORE_BACKEND").as_deref() {
            Some("memory") => StoreBackend::Memory,
            Some("postgres") => StoreBackend::Postgres(postgres_config(&var)?),
            None if var("DATABASE_URL").is_some() => {
                StoreBackend::Postgres(postgres_config(&var)?)
            }
            None => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "STORE_BACKEND".to_string(),
                    reason: format!("'{}' is not one of memory, postgres", other),
                })
            }
        };

        let auth = match (var("AUTH_USERNAME"), var("AUTH_PASSWORD")) {
            (Some(username), Some(password)) => Some(BasicAuthCredentials { username, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("AUTH_PASSWORD".to_string())),
            (None, Some(_)) => return Err(ConfigError::Missing("AUTH_USERNAME".to_string())),
        };

        let request_timeout = parse_var::<u64, _>(&var, "LLM_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let default_model = var("DEFAULT_MODEL");
        let registry = match var("MODELS_FILE") {
            Some(path) => {
                let path = PathBuf::from(path);
                let content = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path, source })?;
                ProviderRegistry::from_toml_str(&content, default_model, &var)?
            }
            None => ProviderRegistry::new(
                ProviderRegistry::builtin(&var)?,
                default_model.unwrap_or_else(|| LOCAL_MODEL_KEY.to_string()),
            )?,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            store,
            auth,
            request_timeout,
            registry,
        })
    }
}

fn postgres_config<F>(var: &F) -> Result<StoreConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let url = var("DATABASE_URL").ok_or_else(|| ConfigError::Missing("DATABASE_URL".to_string()))?;
    let pool_size = parse_var(var, "DB_POOL_SIZE")?.unwrap_or(DEFAULT_POOL_SIZE);

    StoreConfig::from_connection_string(&url)
        .map(|config| config.with_max_pool_size(pool_size))
        .map_err(|e| ConfigError::InvalidValue {
            name: "DATABASE_URL".to_string(),
            reason: e.to_string(),
        })
}

fn parse_var<T, F>(var: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: format!("'{}': {}", raw, e),
            })
        })
        .transpose()
}
