//! Configuration structs

mod client_config;

pub use client_config::{
    AppSettings, ClientConfig, ClientSettings, ConfigError, Environment, EventSettings,
    LoggingSettings,
};
