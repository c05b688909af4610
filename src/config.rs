use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins, comma separated. Permissive when unset.
    pub cors_origins: Option<String>,

    /// Credentials guarding /metrics and /docs
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    pub admin_password: Option<String>,

    /// Number of characters in a generated class code
    #[serde(default = "default_class_id_length")]
    pub class_id_length: usize,

    /// Evict classes nobody touched for this long. No expiry when unset.
    pub class_idle_timeout_secs: Option<u64>,

    /// Outbound packets queued per connection before sends start waiting
    #[serde(default = "default_send_buffer")]
    pub send_buffer: usize,

    /// How long a send waits on a full connection queue
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables or app.env file
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        match envy::from_env::<Config>() {
            Ok(config) => {
                info!("✅ Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                error!("❌ Failed to load configuration: {}", e);
                Err(ConfigError::EnvError(e))
            }
        }
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment.to_lowercase() == "dev" || self.environment.to_lowercase() == "development"
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    pub fn class_idle_timeout(&self) -> Option<Duration> {
        self.class_idle_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            cors_origins: None,
            admin_username: default_admin_username(),
            admin_password: None,
            class_id_length: default_class_id_length(),
            class_idle_timeout_secs: None,
            send_buffer: default_send_buffer(),
            send_timeout_ms: default_send_timeout_ms(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvError(#[from] envy::Error),
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_class_id_length() -> usize {
    6
}

fn default_send_buffer() -> usize {
    64
}

fn default_send_timeout_ms() -> u64 {
    5_000
}
