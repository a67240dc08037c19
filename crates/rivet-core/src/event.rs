//! Gateway events delivered by the platform client.
//!
//! Payload fields are [`Partial`]: the platform is free to deliver stubs, and
//! the dispatch layer resolves them before any handler runs.

use crate::model::{Message, Reaction, User};
use crate::partial::Partial;

/// A user added an emoji reaction to a message.
#[derive(Debug, Clone)]
pub struct ReactionAdded {
    /// The reaction, possibly a stub.
    pub reaction: Partial<Reaction>,
    /// The acting user, possibly a stub.
    pub user: Partial<User>,
    /// The parent message, possibly a stub.
    pub message: Partial<Message>,
}

/// A message was posted.
#[derive(Debug, Clone)]
pub struct MessageCreated {
    /// The message, possibly a stub.
    pub message: Partial<Message>,
}

/// A raw event from the platform's gateway stream.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// A reaction was added to a message.
    ReactionAdded(ReactionAdded),
    /// A message was created.
    MessageCreated(MessageCreated),
}

impl GatewayEvent {
    /// Returns the human-readable name of this event kind.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::ReactionAdded(_) => "reaction_added",
            Self::MessageCreated(_) => "message_created",
        }
    }
}
