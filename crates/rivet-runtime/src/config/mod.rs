//! Configuration module for the Rivet runtime.
//!
//! Layered TOML + environment configuration for the platform connection,
//! logging, and the bundled agents.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, load_config, load_config_from_file};
pub use schema::{
    AgentConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, PlatformConfig, RivetConfig,
    SupportConfig,
};
