use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, GeoConfig, LogLevel,
    LoggingConfig, ServerConfig, WebSocketConfig,
};

use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub websocket: WebSocketConfig,
    pub geo: GeoConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for LH_CONFIG_DIR env var, else use ./.lh/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply LH_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: LH_CONFIG_DIR env var > ./.lh/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("LH_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".lh"))
    }

    /// Apply LH_* environment variable overrides on top of file/default values.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("LH_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("LH_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(secret) = std::env::var("LH_JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Ok(path) = std::env::var("LH_DATABASE_PATH") {
            self.database.path = path;
        }
        if let Ok(level) = std::env::var("LH_LOG_LEVEL") {
            // FromStr never fails, invalid values fall back to Info
            self.logging.level = LogLevel::from_str(&level).unwrap();
        }
        if let Ok(endpoint) = std::env::var("LH_GEO_ENDPOINT") {
            self.geo.endpoint = Some(endpoint);
        }
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.websocket.validate()?;
        self.geo.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log the effective configuration at startup (secrets elided).
    pub fn log_summary(&self) {
        info!("Config: bind={}", self.bind_addr());
        info!("Config: database.path={}", self.database.path);
        info!(
            "Config: auth={}",
            if self.auth.jwt_secret.is_some() {
                "HS256"
            } else {
                "RS256"
            }
        );
        info!(
            "Config: websocket.heartbeat_interval_secs={}, send_buffer_size={}",
            self.websocket.heartbeat_interval_secs, self.websocket.send_buffer_size
        );
        match self.geo.endpoint {
            Some(ref endpoint) => info!("Config: geo.endpoint={}", endpoint),
            None => info!("Config: geo disabled"),
        }
    }
}
