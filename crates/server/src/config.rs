use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Rate limit: requests per minute per authenticated user
    #[serde(default = "default_rate_limit_per_minute")]
    pub rate_limit_per_minute: u32,

    /// Secret used to sign and verify access tokens
    #[serde(default)]
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_token_expiry_minutes")]
    pub token_expiry_minutes: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Base URL of the external conversational-reply service, if any
    #[serde(default)]
    pub chat_api_url: Option<String>,

    /// API key for the external reply service
    #[serde(default)]
    pub chat_api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            rate_limit_per_minute: default_rate_limit_per_minute(),
            jwt_secret: String::new(),
            token_expiry_minutes: default_token_expiry_minutes(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            chat_api_url: None,
            chat_api_key: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("lexilearn").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("LEXILEARN").separator("__"));

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        // Fall back to a fixed dev secret so a bare checkout still boots
        if config.jwt_secret.is_empty() {
            tracing::warn!("No JWT secret configured, using insecure dev secret");
            config.jwt_secret = "dev-secret-change-me".to_string();
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Access token lifetime
    pub fn token_expiry(&self) -> Duration {
        Duration::from_secs(self.token_expiry_minutes * 60)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_rate_limit_per_minute() -> u32 {
    100
}

fn default_token_expiry_minutes() -> u64 {
    // 7 days, matching the session length students actually get
    60 * 24 * 7
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_body_size_mb, 10);
        assert_eq!(cfg.rate_limit_per_minute, 100);
        assert_eq!(cfg.token_expiry_minutes, 60 * 24 * 7);
        assert!(cfg.enable_cors);
        assert!(cfg.chat_api_url.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_token_expiry() {
        let cfg = ServerConfig {
            token_expiry_minutes: 2,
            ..Default::default()
        };
        assert_eq!(cfg.token_expiry(), Duration::from_secs(120));
    }
}
