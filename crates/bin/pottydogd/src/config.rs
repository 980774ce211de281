//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `pottydog.toml` in the working directory. Every field has a
//! default so the file is optional, except that a signing secret must be
//! provided one way or another. Environment variables take precedence over
//! file values.

use std::time::Duration;

use serde::Deserialize;

use pottydog_adapter_mqtt::MqttConfig;
use pottydog_app::services::account_service::AdminBootstrap;

const CONFIG_FILE: &str = "pottydog.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Token and session settings.
    pub access: AccessConfig,
    /// Real-time channel settings.
    pub channel: ChannelConfig,
    /// Device broker bridge.
    pub mqtt: MqttConfig,
    /// Administrator created or promoted at startup.
    pub admin: Option<AdminConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub secure_cookies: bool,
    /// Directory served under `/static`.
    pub static_dir: String,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// HMAC secret signing channel tokens.
    pub secret: String,
    pub token_ttl_minutes: u32,
    pub session_ttl_hours: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Name of the channel the sensor publishes on.
    pub name: String,
    /// Messages buffered per subscriber before it starts lagging.
    pub capacity: usize,
}

/// Bootstrap administrator credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<&AdminConfig> for AdminBootstrap {
    fn from(admin: &AdminConfig) -> Self {
        Self {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password: admin.password.clone(),
        }
    }
}

impl Config {
    /// Load configuration from `pottydog.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("POTTYDOG_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("POTTYDOG_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("POTTYDOG_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("POTTYDOG_SECURE_COOKIES") {
            self.server.secure_cookies = matches!(val.as_str(), "1" | "true" | "yes");
        }
        if let Some(val) = var("POTTYDOG_STATIC_DIR") {
            self.server.static_dir = val;
        }
        if let Some(val) = var("POTTYDOG_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("POTTYDOG_SECRET_KEY") {
            self.access.secret = val;
        }
        if let Some(val) = var("POTTYDOG_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.access.secret.is_empty() {
            return Err(ConfigError::Validation(
                "access.secret (or POTTYDOG_SECRET_KEY) must be set".to_string(),
            ));
        }
        if self.access.token_ttl_minutes == 0 || self.access.session_ttl_hours == 0 {
            return Err(ConfigError::Validation(
                "token and session lifetimes must be non-zero".to_string(),
            ));
        }
        if self.channel.capacity == 0 {
            return Err(ConfigError::Validation(
                "channel capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// How long a login session stays valid.
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.access.session_ttl_hours.saturating_mul(3600))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            secure_cookies: false,
            static_dir: "static".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:pottydog.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pottydogd=info,pottydog=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_ttl_minutes: 1440,
            session_ttl_hours: 72,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: "Channel-Barcelona".to_string(),
            capacity: 256,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_secret() -> Config {
        let mut config = Config::default();
        config.access.secret = "s3cret".to_string();
        config
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:pottydog.db?mode=rwc");
        assert_eq!(config.channel.name, "Channel-Barcelona");
        assert_eq!(config.access.token_ttl_minutes, 1440);
        assert_eq!(config.session_ttl(), Duration::from_secs(72 * 3600));
        assert!(!config.mqtt.enabled);
        assert!(config.admin.is_none());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090
            secure_cookies = true
            static_dir = 'public'

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [access]
            secret = 'abc'
            token_ttl_minutes = 60
            session_ttl_hours = 1

            [channel]
            name = 'Channel-Madrid'
            capacity = 8

            [mqtt]
            enabled = true
            broker_host = 'broker.local'

            [admin]
            username = 'root'
            email = 'root@example.com'
            password = 'Secret1!'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert!(config.server.secure_cookies);
        assert_eq!(config.server.static_dir, "public");
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.access.token_ttl_minutes, 60);
        assert_eq!(config.channel.name, "Channel-Madrid");
        assert!(config.mqtt.enabled);
        assert_eq!(config.mqtt.broker_host, "broker.local");
        assert_eq!(config.mqtt.broker_port, 1883);
        assert!(config.validate().is_ok());
        assert_eq!(config.admin.unwrap().username, "root");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_missing_secret() {
        assert!(Config::default().validate().is_err());
        assert!(with_secret().validate().is_ok());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = with_secret();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_ttl() {
        let mut config = with_secret();
        config.access.token_ttl_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("POTTYDOG_BIND", "127.0.0.1:8080"),
            ("POTTYDOG_SECRET_KEY", "from-env"),
            ("POTTYDOG_SECURE_COOKIES", "true"),
            ("POTTYDOG_DATABASE_URL", "sqlite::memory:"),
            ("POTTYDOG_LOG", "warn"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.access.secret, "from-env");
        assert!(config.server.secure_cookies);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_prefer_rust_log_over_pottydog_log() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("POTTYDOG_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_port() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("POTTYDOG_PORT", "http")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
