//! # Rivet
//!
//! An event-driven chat agent host for Rust.
//!
//! ## Overview
//!
//! Rivet lets many independent agent modules react to a live stream of chat
//! events without each reimplementing event plumbing. Agents declare
//! subscriptions (an emoji for reactions, an id plus optional filter for
//! messages); the framework normalizes keys, hydrates partial payloads,
//! routes each event to the matching actions, and contains their failures.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐     ┌──────────────────┐     ┌───────────────────────────────┐
//! │ Runtime  │────▶│ SubscriptionHub  │────▶│ Reaction registry → action    │
//! │ (client) │     │ (one listener    │────▶│ Message registry  → action(s) │
//! └──────────┘     │  per event kind) │     └───────────────────────────────┘
//!                  └──────────────────┘
//! ```
//!
//! - **Runtime**: configuration, logging, lifecycle
//! - **Framework**: normalization, hydration, registries, dispatch
//! - **Core**: the data model and the [`core::ChatClient`] platform trait
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rivet::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = AgentRuntime::new(client);
//!
//!     runtime.register_reaction_subscriptions(vec![
//!         ReactionSubscription::new("📌", |ctx| async move {
//!             info!(key = %ctx.emoji_key, "pinned");
//!             Ok(())
//!         }),
//!     ]);
//!
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub use rivet_core as core;
pub use rivet_framework as framework;
pub use rivet_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use rivet::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use rivet_runtime::{AgentRuntime, RivetConfig, load_config};

    // Subscription system - primary unit of event handling
    pub use rivet_framework::{
        ActionResult, MessageContext, MessageSubscription, ReactionContext, ReactionSubscription,
        SubscriptionHub,
    };

    // Data model - for building actions
    pub use rivet_core::{
        ChannelId, ChatClient, EmojiId, GuildId, Message, MessageId, OutgoingMessage, UserId,
    };

    // Logging macros
    pub use rivet_runtime::tracing::{debug, error, info, trace, warn};
}
