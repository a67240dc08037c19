//! Configuration loader using figment.
//!
//! Configuration is layered; later sources override earlier ones:
//!
//! 1. Built-in defaults
//! 2. Programmatic overrides ([`ConfigLoader::merge`])
//! 3. Configuration file (`rivet.toml`, or the file given to
//!    [`ConfigLoader::file`])
//! 4. Environment variables (`RIVET_*`)
//!
//! # Environment Variable Mapping
//!
//! Environment variables use the `RIVET_` prefix with `__` as the nesting
//! separator:
//!
//! - `RIVET_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `RIVET_AGENTS__SUPPORT__FORUM_CHANNEL=c42` → `agents.support.forum_channel = "c42"`
//!
//! # Example
//!
//! ```rust,ignore
//! // Default locations plus env overrides.
//! let config = ConfigLoader::new().load()?;
//!
//! // A specific file, no env.
//! let config = ConfigLoader::new()
//!     .file("./config/rivet.toml")
//!     .without_env()
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::RivetConfig;

/// Base name of the configuration file searched for in each search path.
const CONFIG_FILE: &str = "rivet.toml";

/// Loads configuration from the default locations.
///
/// Equivalent to `ConfigLoader::new().with_current_dir().load()`.
pub fn load_config() -> ConfigResult<RivetConfig> {
    ConfigLoader::new().with_current_dir().load()
}

/// Loads configuration from a specific file, with env overrides.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<RivetConfig> {
    ConfigLoader::new().file(path).load()
}

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// User-supplied programmatic overrides.
    figment: Figment,
    /// Search paths for `rivet.toml`.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds the current directory to the search paths.
    pub fn with_current_dir(self) -> Self {
        if let Ok(cwd) = std::env::current_dir() {
            self.search_path(cwd)
        } else {
            self
        }
    }

    /// Adds the user config directory (`~/.config/rivet` on Linux) to the
    /// search paths.
    pub fn with_user_config_dir(self) -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            self.search_path(config_dir.join("rivet"))
        } else {
            self
        }
    }

    /// Sets a specific configuration file to load instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically.
    ///
    /// Files and environment variables still override merged values.
    pub fn merge(mut self, config: RivetConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<RivetConfig> {
        let figment = self.build_figment()?;

        let config: RivetConfig = figment
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;

        debug!(
            platform = %config.platform.name,
            logging_level = %config.logging.level,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(mut self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(RivetConfig::default()));

        let user_figment = std::mem::take(&mut self.figment);
        figment = figment.merge(user_figment);

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            info!(path = %path.display(), "loading configuration file");
            figment = figment.merge(Toml::file(path));
        } else {
            figment = self.search_config_file(figment);
        }

        if self.load_env {
            trace!("loading environment variables with RIVET_ prefix");
            figment = figment.merge(
                Env::prefixed("RIVET_")
                    .split("__")
                    .map(|key| key.as_str().replace("__", ".").into()),
            );
        }

        Ok(figment)
    }

    /// Searches the configured paths for `rivet.toml`, merging the first hit.
    fn search_config_file(&self, mut figment: Figment) -> Figment {
        for search_path in &self.search_paths {
            let path = search_path.join(CONFIG_FILE);
            if path.exists() {
                info!(path = %path.display(), "loading configuration file");
                figment = figment.merge(Toml::file(path));
                return figment;
            }
        }
        warn!("no configuration file found, using defaults");
        figment
    }
}

// =============================================================================
// Tests
// =============================================================================
