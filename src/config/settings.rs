//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port, static assets)
    pub server: ServerSettings,

    /// Message store configuration
    pub database: DatabaseSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// WebSocket configuration
    pub websocket: WebSocketSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,

    /// Directory served for every path the API does not claim
    pub static_dir: String,
}

/// Which store holds the messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Message store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Store implementation
    pub backend: StorageBackend,

    /// Database connection URL (required for the postgres backend)
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}

/// WebSocket configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketSettings {
    /// Maximum inbound message size in bytes (default: 64KB)
    pub max_message_size: usize,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. APP__SECTION__KEY environment variables
    /// 5. PORT, HOST, DATABASE_URL, STORAGE_BACKEND, STATIC_DIR (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the postgres backend is selected without a database URL.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", DEFAULT_PORT as i64)?
            .set_default("server.static_dir", DEFAULT_STATIC_DIR)?
            .set_default("database.backend", "postgres")?
            .set_default("database.url", "")?
            .set_default("database.max_connections", DEFAULT_MAX_CONNECTIONS as i64)?
            .set_default("database.min_connections", DEFAULT_MIN_CONNECTIONS as i64)?
            .set_default("database.acquire_timeout", DEFAULT_ACQUIRE_TIMEOUT_SECS as i64)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("websocket.max_message_size", DEFAULT_MAX_MESSAGE_SIZE as i64)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=5000 -> server.port = 5000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.static_dir", std::env::var("STATIC_DIR").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("database.backend", std::env::var("STORAGE_BACKEND").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| settings.validate())
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.database.backend == StorageBackend::Postgres && self.database.url.is_empty() {
            return Err(ConfigError::Message(
                "DATABASE_URL must be set when the postgres backend is selected".into(),
            ));
        }
        Ok(self)
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    /// Built-in defaults with the in-memory store, so nothing external is needed.
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: DEFAULT_HOST.into(),
                port: DEFAULT_PORT,
                static_dir: DEFAULT_STATIC_DIR.into(),
            },
            database: DatabaseSettings {
                backend: StorageBackend::Memory,
                url: String::new(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
                min_connections: DEFAULT_MIN_CONNECTIONS,
                acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            },
            cors: CorsSettings {
                allowed_origins: Vec::new(),
            },
            websocket: WebSocketSettings {
                max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            },
            environment: "development".into(),
        }
    }
}
