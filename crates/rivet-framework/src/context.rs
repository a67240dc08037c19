//! Contexts handed to actions.
//!
//! One context value is built per matched event and shared behind an `Arc`
//! with every action invoked for it. Everything inside is fully hydrated —
//! actions never see stubs.

use rivet_core::{BoxedClient, Channel, Message, Reaction, User};

/// Context for a matched reaction action.
pub struct ReactionContext {
    /// The platform client, for outbound calls.
    pub client: BoxedClient,
    /// The registry key that matched — not necessarily the first candidate
    /// derived from the emoji.
    pub emoji_key: String,
    /// The resolved channel of the reacted-to message. Guaranteed sendable.
    pub channel: Channel,
    /// The resolved parent message.
    pub message: Message,
    /// The resolved reaction.
    pub reaction: Reaction,
    /// The resolved acting user.
    pub user: User,
}

impl std::fmt::Debug for ReactionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionContext")
            .field("emoji_key", &self.emoji_key)
            .field("channel", &self.channel.id)
            .field("message", &self.message.id)
            .field("user", &self.user.id)
            .finish_non_exhaustive()
    }
}

/// Context shared by every message action invoked for one event.
pub struct MessageContext {
    /// The platform client, for outbound calls.
    pub client: BoxedClient,
    /// The resolved message.
    pub message: Message,
}

impl std::fmt::Debug for MessageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageContext")
            .field("message", &self.message.id)
            .finish_non_exhaustive()
    }
}
