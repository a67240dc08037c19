//! The subscription hub — registration entry points and listener bootstrap.
//!
//! A [`SubscriptionHub`] is constructed once per process and threaded through
//! wherever registration occurs. It owns the two subscription registries and
//! guarantees that attaching to the platform's event stream happens at most
//! once per registry type, no matter how many independent agent modules call
//! the registration entry points.
//!
//! # Example
//!
//! ```rust,ignore
//! let hub = Arc::new(SubscriptionHub::new());
//!
//! // Each agent module registers independently; the platform listener is
//! // attached exactly once per event kind.
//! let reactions = hub.register_reaction_subscriptions(client.clone(), star_subs());
//! hub.register_reaction_subscriptions(client.clone(), support_subs());
//! let messages = hub.register_message_subscriptions(client, ping_subs());
//!
//! // Handles allow runtime mutation.
//! reactions.remove("⭐");
//! messages.clear();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use rivet_core::{BoxedClient, GatewayEvent};

use crate::emoji::normalize_emoji_key;
use crate::message::MessageDispatcher;
use crate::reaction::{DEFAULT_STAR_KEY, ReactionDispatcher, default_star_action};
use crate::registry::SubscriptionRegistry;
use crate::subscription::{MessageSubscription, ReactionAction, ReactionSubscription};

/// Process-lifetime owner of the subscription registries and listener state.
pub struct SubscriptionHub {
    reactions: Arc<SubscriptionRegistry<ReactionAction>>,
    messages: Arc<SubscriptionRegistry<MessageSubscription>>,
    reaction_listener_attached: AtomicBool,
    message_listener_attached: AtomicBool,
    /// Guards the one-shot default-handler bootstrap, which only the very
    /// first reaction registration call may perform.
    reaction_bootstrap_done: AtomicBool,
}

impl SubscriptionHub {
    /// Creates a hub with empty registries and no listeners attached.
    pub fn new() -> Self {
        Self {
            reactions: Arc::new(SubscriptionRegistry::new()),
            messages: Arc::new(SubscriptionRegistry::new()),
            reaction_listener_attached: AtomicBool::new(false),
            message_listener_attached: AtomicBool::new(false),
            reaction_bootstrap_done: AtomicBool::new(false),
        }
    }

    /// Registers reaction subscriptions and returns a handle for runtime
    /// mutation.
    ///
    /// Safe to call any number of times; the platform listener is attached on
    /// the first call only, and later calls merely merge subscriptions into
    /// the registry (last write wins per canonical key).
    ///
    /// The very first call, if it finds the registry empty before merging,
    /// installs a built-in `⭐` acknowledgement handler. An explicit star
    /// subscription in the same call overwrites it; later calls never install
    /// it again.
    pub fn register_reaction_subscriptions(
        &self,
        client: BoxedClient,
        subscriptions: Vec<ReactionSubscription>,
    ) -> ReactionRegistryHandle {
        if !self.reaction_bootstrap_done.swap(true, Ordering::SeqCst) && self.reactions.is_empty() {
            debug!("installing default star acknowledgement handler");
            self.reactions.insert(DEFAULT_STAR_KEY, default_star_action());
        }

        for subscription in subscriptions {
            self.reactions
                .insert(subscription.canonical_key(), subscription.action);
        }

        if !self.reaction_listener_attached.swap(true, Ordering::SeqCst) {
            let dispatcher =
                ReactionDispatcher::new(Arc::clone(&client), Arc::clone(&self.reactions));
            spawn_listener("reaction", client.events(), move |event| {
                if let GatewayEvent::ReactionAdded(event) = event {
                    let dispatcher = dispatcher.clone();
                    tokio::spawn(async move { dispatcher.dispatch(event).await });
                }
            });
        }

        ReactionRegistryHandle {
            registry: Arc::clone(&self.reactions),
        }
    }

    /// Registers message subscriptions and returns a handle for runtime
    /// mutation.
    ///
    /// Safe to call any number of times; the platform listener is attached on
    /// the first call only.
    pub fn register_message_subscriptions(
        &self,
        client: BoxedClient,
        subscriptions: Vec<MessageSubscription>,
    ) -> MessageRegistryHandle {
        for subscription in subscriptions {
            self.messages
                .insert(subscription.id.clone(), subscription);
        }

        if !self.message_listener_attached.swap(true, Ordering::SeqCst) {
            let dispatcher = MessageDispatcher::new(Arc::clone(&client), Arc::clone(&self.messages));
            spawn_listener("message", client.events(), move |event| {
                if let GatewayEvent::MessageCreated(event) = event {
                    let dispatcher = dispatcher.clone();
                    tokio::spawn(async move { dispatcher.dispatch(event).await });
                }
            });
        }

        MessageRegistryHandle {
            registry: Arc::clone(&self.messages),
        }
    }

    /// Returns a mutation handle for the reaction registry without
    /// registering anything or attaching listeners.
    pub fn reaction_registry(&self) -> ReactionRegistryHandle {
        ReactionRegistryHandle {
            registry: Arc::clone(&self.reactions),
        }
    }

    /// Returns a mutation handle for the message registry without
    /// registering anything or attaching listeners.
    pub fn message_registry(&self) -> MessageRegistryHandle {
        MessageRegistryHandle {
            registry: Arc::clone(&self.messages),
        }
    }
}

impl Default for SubscriptionHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SubscriptionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHub")
            .field("reactions", &self.reactions.len())
            .field("messages", &self.messages.len())
            .finish()
    }
}

/// Spawns the single listener task for one registry type.
///
/// The task lives until the client drops its event sender. Each matching
/// event is handed to `on_event`, which spawns an independent task per event
/// so that one slow handler never blocks the stream. A lagged receiver logs
/// and keeps going — missed events are an accepted loss.
fn spawn_listener(
    kind: &'static str,
    mut events: broadcast::Receiver<GatewayEvent>,
    on_event: impl Fn(GatewayEvent) + Send + 'static,
) {
    info!(kind, "attaching platform event listener");
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => on_event(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(kind, skipped, "event stream lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!(kind, "event stream closed, detaching listener");
                    break;
                }
            }
        }
    });
}

/// Runtime mutation handle for the reaction registry.
#[derive(Clone)]
pub struct ReactionRegistryHandle {
    registry: Arc<SubscriptionRegistry<ReactionAction>>,
}

impl ReactionRegistryHandle {
    /// Registers (or replaces) the action for an emoji.
    pub fn add(&self, emoji: &str, action: ReactionAction) {
        self.registry.insert(normalize_emoji_key(emoji), action);
    }

    /// Removes the action for an emoji. Returns `true` if one was registered.
    pub fn remove(&self, emoji: &str) -> bool {
        self.registry.remove(&normalize_emoji_key(emoji))
    }

    /// Drops all reaction subscriptions.
    pub fn clear(&self) {
        self.registry.clear();
    }

    /// Returns the number of registered reaction subscriptions.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if no reaction subscriptions are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

/// Runtime mutation handle for the message registry.
#[derive(Clone)]
pub struct MessageRegistryHandle {
    registry: Arc<SubscriptionRegistry<MessageSubscription>>,
}

impl MessageRegistryHandle {
    /// Registers (or replaces) a message subscription.
    pub fn add(&self, subscription: MessageSubscription) {
        self.registry.insert(subscription.id.clone(), subscription);
    }

    /// Removes a subscription by id. Returns `true` if one was registered.
    pub fn remove(&self, id: &str) -> bool {
        self.registry.remove(id)
    }

    /// Drops all message subscriptions.
    pub fn clear(&self) {
        self.registry.clear();
    }

    /// Returns the number of registered message subscriptions.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if no message subscriptions are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
