//! Client configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;

use chat_core::{Partials, Snowflake};

use crate::telemetry::TracingConfig;

/// Main client configuration
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub app: AppSettings,
    pub client: ClientSettings,
    pub events: EventSettings,
    pub logging: LoggingSettings,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: Environment::default(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Cache behaviour of the client
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    /// The client's own user, used to track `me` on reactions
    pub user_id: Option<Snowflake>,
    /// Structures that may be materialized from incomplete data
    pub partials: Partials,
}

/// Event sink configuration
#[derive(Debug, Clone)]
pub struct EventSettings {
    /// Capacity of the broadcast channel carrying client events
    pub buffer_size: usize,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            buffer_size: default_event_buffer_size(),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingSettings {
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

// Default value functions
fn default_app_name() -> String {
    "chat-client".to_string()
}

fn default_event_buffer_size() -> usize {
    256
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Every variable is optional; malformed values are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(value) => Environment::parse(&value)
                .ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
            None => Environment::default(),
        };

        let user_id = lookup("CLIENT_USER_ID")
            .map(|value| {
                Snowflake::parse(value.trim())
                    .map_err(|_| ConfigError::InvalidValue("CLIENT_USER_ID", value))
            })
            .transpose()?;

        let partials = match lookup("CLIENT_PARTIALS") {
            Some(value) => Partials::parse_list(&value)
                .map_err(|unknown| ConfigError::InvalidValue("CLIENT_PARTIALS", unknown))?,
            None => Partials::empty(),
        };

        let buffer_size = match lookup("EVENT_BUFFER_SIZE") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidValue("EVENT_BUFFER_SIZE", value)),
            },
            None => default_event_buffer_size(),
        };

        let json = lookup("LOG_JSON")
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or_else(|| env.is_production());

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            client: ClientSettings { user_id, partials },
            events: EventSettings { buffer_size },
            logging: LoggingSettings { json },
        })
    }

    /// Tracing setup matching the configured environment
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let mut config = if self.app.env.is_development() {
            TracingConfig::development()
        } else {
            TracingConfig::production()
        };
        config.json = self.logging.json;
        config
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
