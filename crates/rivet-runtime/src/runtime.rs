//! Runtime orchestration.
//!
//! [`AgentRuntime`] ties the layers together: it owns the platform client and
//! the subscription hub, initializes logging from configuration, and runs
//! until ctrl-c or an explicit [`AgentRuntime::stop`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rivet_runtime::AgentRuntime;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Loads rivet.toml from the current directory, falls back to defaults.
//!     let runtime = AgentRuntime::new(client);
//!
//!     runtime.register_message_subscriptions(ping_subscriptions());
//!     runtime.register_reaction_subscriptions(star_subscriptions());
//!
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use rivet_core::BoxedClient;
use rivet_framework::{
    MessageRegistryHandle, MessageSubscription, ReactionRegistryHandle, ReactionSubscription,
    SubscriptionHub,
};

use crate::config::{ConfigLoader, RivetConfig};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;

/// The runtime that hosts agents on top of a platform client.
pub struct AgentRuntime {
    config: RivetConfig,
    client: BoxedClient,
    hub: Arc<SubscriptionHub>,
    shutdown: CancellationToken,
}

impl AgentRuntime {
    /// Creates a runtime with automatic configuration loading.
    ///
    /// Searches the current directory for `rivet.toml` and applies `RIVET_*`
    /// environment overrides. Falls back to defaults if loading fails.
    pub fn new(client: BoxedClient) -> Self {
        let config = ConfigLoader::new()
            .with_current_dir()
            .load()
            .unwrap_or_else(|e| {
                // Logging is not up yet at this point.
                eprintln!("warning: failed to load config ({e}), using defaults");
                RivetConfig::default()
            });

        Self::from_config(client, config)
    }

    /// Creates a runtime from a specific configuration file.
    ///
    /// Unlike [`AgentRuntime::new`], a missing or invalid file is an error
    /// rather than a silent fall-back to defaults. `RIVET_*` environment
    /// overrides still apply.
    pub fn from_config_file<P: AsRef<std::path::Path>>(
        client: BoxedClient,
        path: P,
    ) -> RuntimeResult<Self> {
        let config = ConfigLoader::new().file(path).load()?;
        Ok(Self::from_config(client, config))
    }

    /// Creates a runtime from a pre-loaded configuration.
    ///
    /// Initializes logging from the configuration; if a subscriber is already
    /// installed, the existing one is kept.
    pub fn from_config(client: BoxedClient, config: RivetConfig) -> Self {
        logging::init_from_config(&config.logging);

        info!(
            platform = %config.platform.name,
            log_level = %config.logging.level,
            "runtime initialized"
        );

        Self {
            config,
            client,
            hub: Arc::new(SubscriptionHub::new()),
            shutdown: CancellationToken::new(),
        }
    }

    /// The loaded configuration.
    pub fn config(&self) -> &RivetConfig {
        &self.config
    }

    /// The platform client the runtime was built with.
    pub fn client(&self) -> BoxedClient {
        Arc::clone(&self.client)
    }

    /// The subscription hub, for callers that need direct registry access.
    pub fn hub(&self) -> Arc<SubscriptionHub> {
        Arc::clone(&self.hub)
    }

    /// Registers reaction subscriptions on the hub.
    pub fn register_reaction_subscriptions(
        &self,
        subscriptions: Vec<ReactionSubscription>,
    ) -> ReactionRegistryHandle {
        self.hub
            .register_reaction_subscriptions(Arc::clone(&self.client), subscriptions)
    }

    /// Registers message subscriptions on the hub.
    pub fn register_message_subscriptions(
        &self,
        subscriptions: Vec<MessageSubscription>,
    ) -> MessageRegistryHandle {
        self.hub
            .register_message_subscriptions(Arc::clone(&self.client), subscriptions)
    }

    /// A token that is cancelled when the runtime shuts down.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Requests shutdown; a pending [`AgentRuntime::run`] returns.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    /// Runs until ctrl-c or [`AgentRuntime::stop`].
    ///
    /// Event dispatch happens on the listener tasks the hub spawned; this
    /// future only parks the main task and reports the shutdown reason.
    pub async fn run(&self) -> RuntimeResult<()> {
        info!("runtime started, waiting for shutdown");

        tokio::select! {
            result = signal::ctrl_c() => {
                result.map_err(RuntimeError::Signal)?;
                info!("ctrl-c received, shutting down");
                self.shutdown.cancel();
            }
            _ = self.shutdown.cancelled() => {
                info!("shutdown requested");
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for AgentRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRuntime")
            .field("platform", &self.config.platform.name)
            .field("hub", &self.hub)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rivet_adapter_local::LocalClient;
    use rivet_core::User;

    fn runtime() -> AgentRuntime {
        let client = Arc::new(
            LocalClient::builder()
                .bot_user(User::new("bot", "rivet").as_bot())
                .build(),
        );
        AgentRuntime::from_config(client, RivetConfig::default())
    }

    #[tokio::test]
    async fn stop_unparks_run() {
        let runtime = Arc::new(runtime());

        let handle = {
            let runtime = Arc::clone(&runtime);
            tokio::spawn(async move { runtime.run().await })
        };

        runtime.stop();
        let result = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn registration_delegates_to_the_hub() {
        let runtime = runtime();

        let handle = runtime.register_reaction_subscriptions(vec![ReactionSubscription::new(
            "📌",
            |_| async { Ok(()) },
        )]);

        // The default star handler plus the explicit subscription.
        assert_eq!(handle.len(), 2);

        let handle = runtime.register_message_subscriptions(vec![MessageSubscription::new(
            "ping",
            |_| async { Ok(()) },
        )]);
        assert_eq!(handle.len(), 1);
    }

    #[tokio::test]
    async fn missing_config_file_is_an_error() {
        let client = Arc::new(
            LocalClient::builder()
                .bot_user(User::new("bot", "rivet").as_bot())
                .build(),
        );
        let err = AgentRuntime::from_config_file(client, "/definitely/not/here/rivet.toml")
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Config(crate::config::ConfigError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn shutdown_token_observes_stop() {
        let runtime = runtime();
        let token = runtime.shutdown_token();
        assert!(!token.is_cancelled());
        runtime.stop();
        assert!(token.is_cancelled());
    }
}
