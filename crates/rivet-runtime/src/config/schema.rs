//! Configuration schema definitions.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RivetConfig {
    /// Platform connection settings.
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Agent-specific settings.
    #[serde(default)]
    pub agents: AgentConfig,
}

/// Platform connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Adapter name (e.g. "local").
    #[serde(default = "default_platform_name")]
    pub name: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            name: default_platform_name(),
        }
    }
}

fn default_platform_name() -> String {
    "local".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Per-module level overrides, e.g. `rivet_framework = "debug"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Log file path, used when `output = "file"`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            filters: HashMap::new(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file_path: None,
        }
    }
}

/// Log verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a lowercase directive string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line, abbreviated output.
    #[default]
    Compact,
    /// The default `tracing-subscriber` format.
    Full,
    /// Multi-line, human-oriented output.
    Pretty,
    /// Newline-delimited JSON (requires the `json-log` feature).
    #[cfg(feature = "json-log")]
    Json,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Settings consumed by the bundled agents.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentConfig {
    /// Support-redirect agent settings.
    #[serde(default)]
    pub support: SupportConfig,
}

/// Settings for the support-redirect agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportConfig {
    /// Forum channel that hosts redirected support threads.
    #[serde(default)]
    pub forum_channel: Option<String>,

    /// User ids to mention when a conversation is redirected.
    #[serde(default)]
    pub team: Vec<String>,

    /// Notice posted in the original channel after a redirect. `{thread}` is
    /// replaced with a mention of the created thread.
    #[serde(default = "default_redirect_notice")]
    pub redirect_notice: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            forum_channel: None,
            team: Vec::new(),
            redirect_notice: default_redirect_notice(),
        }
    }
}

fn default_redirect_notice() -> String {
    "This looks like a support question, so I moved it to {thread}. \
     The team will follow up there."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = RivetConfig::default();
        assert_eq!(config.platform.name, "local");
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.logging.output, LogOutput::Stdout);
        assert!(config.agents.support.forum_channel.is_none());
    }

    #[test]
    fn log_level_deserializes_lowercase() {
        let level: LogLevel = serde::Deserialize::deserialize(
            serde::de::value::StrDeserializer::<serde::de::value::Error>::new("debug"),
        )
        .unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert_eq!(level.to_tracing_level(), tracing::Level::DEBUG);
    }
}
