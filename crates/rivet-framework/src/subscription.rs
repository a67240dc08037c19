//! Subscription types and action signatures.
//!
//! An *action* is what an agent wants to happen when an event matches. Actions
//! are async, fallible, and type-erased behind `Arc` so registries can clone
//! them cheaply. A failed action is logged by the dispatcher and never
//! propagates (see the dispatch modules).

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use rivet_core::Message;

use crate::context::{MessageContext, ReactionContext};
use crate::emoji::normalize_emoji_key;

/// Result of a single action invocation.
///
/// Errors carry arbitrary agent-side failures (a model call that timed out, a
/// send that was rejected, ...); the dispatcher logs them with the matched
/// key or subscription id and moves on.
pub type ActionResult = anyhow::Result<()>;

/// A registered reaction handler.
pub type ReactionAction =
    Arc<dyn Fn(Arc<ReactionContext>) -> BoxFuture<'static, ActionResult> + Send + Sync>;

/// A registered message handler.
pub type MessageAction =
    Arc<dyn Fn(Arc<MessageContext>) -> BoxFuture<'static, ActionResult> + Send + Sync>;

/// A predicate deciding whether a message subscription's action should fire.
pub type MessageFilter = Arc<dyn Fn(&Message) -> bool + Send + Sync>;

/// Wraps an async closure into a [`ReactionAction`].
pub fn reaction_action<F, Fut>(f: F) -> ReactionAction
where
    F: Fn(Arc<ReactionContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ActionResult> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Wraps an async closure into a [`MessageAction`].
pub fn message_action<F, Fut>(f: F) -> MessageAction
where
    F: Fn(Arc<MessageContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ActionResult> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// A reaction subscription: one emoji, one action.
///
/// The emoji may be given in any textual form; it is normalized into a
/// canonical key on registration. One action per canonical key — registering
/// the same key again overwrites the previous action.
#[derive(Clone)]
pub struct ReactionSubscription {
    /// The raw emoji identifier as the agent wrote it.
    pub emoji: String,
    /// The action to run on a matching reaction.
    pub action: ReactionAction,
}

impl ReactionSubscription {
    /// Creates a reaction subscription from an async closure.
    pub fn new<F, Fut>(emoji: impl Into<String>, action: F) -> Self
    where
        F: Fn(Arc<ReactionContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        Self {
            emoji: emoji.into(),
            action: reaction_action(action),
        }
    }

    /// The canonical registry key for this subscription.
    pub fn canonical_key(&self) -> String {
        normalize_emoji_key(&self.emoji)
    }
}

impl std::fmt::Debug for ReactionSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionSubscription")
            .field("emoji", &self.emoji)
            .finish_non_exhaustive()
    }
}

/// A message subscription: an id, an optional filter, and an action.
///
/// Keyed by id; re-registering an id overwrites. A subscription without a
/// filter matches every message.
#[derive(Clone)]
pub struct MessageSubscription {
    /// Registry key for this subscription.
    pub id: String,
    /// Optional predicate; `None` matches all messages.
    pub filter: Option<MessageFilter>,
    /// The action to run on a matching message.
    pub action: MessageAction,
}

impl MessageSubscription {
    /// Creates an unfiltered message subscription from an async closure.
    pub fn new<F, Fut>(id: impl Into<String>, action: F) -> Self
    where
        F: Fn(Arc<MessageContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        Self {
            id: id.into(),
            filter: None,
            action: message_action(action),
        }
    }

    /// Restricts this subscription to messages accepted by `filter`.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Message) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Returns `true` if this subscription accepts the given message.
    pub fn accepts(&self, message: &Message) -> bool {
        match &self.filter {
            Some(filter) => filter(message),
            None => true,
        }
    }
}

impl std::fmt::Debug for MessageSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageSubscription")
            .field("id", &self.id)
            .field("filtered", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}
