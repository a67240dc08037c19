//! # Rivet Runtime
//!
//! Orchestration layer for the Rivet agent host.
//!
//! This crate provides:
//! - Layered configuration loading (`rivet.toml` + `RIVET_*` env)
//! - Logging setup over `tracing-subscriber`
//! - [`AgentRuntime`], which owns the platform client and the subscription
//!   hub and runs until shutdown
//!
//! ```ignore
//! use rivet_runtime::AgentRuntime;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = AgentRuntime::new(client);
//!     runtime.register_reaction_subscriptions(my_subscriptions());
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

// Re-exports
pub use config::{
    AgentConfig, ConfigError, ConfigLoader, ConfigResult, LogFormat, LogLevel, LogOutput,
    LoggingConfig, PlatformConfig, RivetConfig, SupportConfig, load_config, load_config_from_file,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::LoggingBuilder;
pub use runtime::AgentRuntime;

// Re-export tracing for use by agent crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// Provides the commonly used logging macros alongside the runtime entry
/// points.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};

    pub use crate::config::{RivetConfig, load_config};
    pub use crate::runtime::AgentRuntime;
}
