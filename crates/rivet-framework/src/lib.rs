//! # Rivet Framework
//!
//! The event subscription and dispatch layer of the Rivet agent host.
//!
//! Many independent agent modules need to react to a live stream of chat
//! events without each reimplementing event plumbing. This crate provides
//! that plumbing:
//!
//! - [`emoji`] — canonical emoji lookup keys
//! - [`hydrate`] — resolution of partial event payloads
//! - [`registry`] — keyed handler stores with registration-order iteration
//! - [`reaction`] / [`message`] — per-event dispatch state machines
//! - [`hub`] — the registration entry points agents call
//!
//! # Data Flow
//!
//! ```text
//! ┌──────────┐      ┌───────────┐      ┌───────────┐      ┌──────────┐
//! │ Platform │─────▶│  Hydrate  │─────▶│ Registry  │─────▶│ Action(s)│
//! │ (client) │ raw  │ (partial→ │ keys │ lookup /  │ ctx  │ isolated │
//! └──────────┘      │   full)   │      │  fan-out  │      └──────────┘
//!                   └───────────┘      └───────────┘
//! ```
//!
//! Failures in hydration or in any action are logged and contained; the
//! platform listeners stay attached across an unbounded number of them.
//!
//! # Example
//!
//! ```rust,ignore
//! use rivet_framework::{SubscriptionHub, ReactionSubscription, MessageSubscription};
//!
//! let hub = SubscriptionHub::new();
//!
//! hub.register_reaction_subscriptions(
//!     client.clone(),
//!     vec![ReactionSubscription::new("📌", |ctx| async move {
//!         ctx.client
//!             .send_message(&ctx.channel.id, OutgoingMessage::new("pinned!"))
//!             .await?;
//!         Ok(())
//!     })],
//! );
//!
//! hub.register_message_subscriptions(
//!     client,
//!     vec![
//!         MessageSubscription::new("ping", |ctx| async move { /* ... */ Ok(()) })
//!             .with_filter(|m| m.content.trim() == "!ping"),
//!     ],
//! );
//! ```

pub mod context;
pub mod emoji;
pub mod hub;
pub mod hydrate;
pub mod message;
pub mod reaction;
pub mod registry;
pub mod subscription;

pub use context::{MessageContext, ReactionContext};
pub use emoji::normalize_emoji_key;
pub use hub::{MessageRegistryHandle, ReactionRegistryHandle, SubscriptionHub};
pub use message::MessageDispatcher;
pub use reaction::ReactionDispatcher;
pub use registry::SubscriptionRegistry;
pub use subscription::{
    ActionResult, MessageAction, MessageFilter, MessageSubscription, ReactionAction,
    ReactionSubscription, message_action, reaction_action,
};
