//! Two-state partial values.
//!
//! The chat platform may deliver event payloads as stubs that carry only the
//! identifiers needed to fetch the real object later. Instead of a runtime
//! `partial` flag, [`Partial`] makes the distinction a type: the full fields
//! are unreachable until something resolves the stub through the client's
//! fetch primitives (see `rivet-framework`'s hydrate module).

use serde::{Deserialize, Serialize};

use crate::id::{ChannelId, MessageId, UserId};
use crate::model::{Emoji, Message, Reaction, User};

/// Identifiers sufficient to fetch a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    /// The channel holding the message.
    pub channel_id: ChannelId,
    /// The message to fetch.
    pub message_id: MessageId,
}

impl MessageRef {
    /// Creates a message reference.
    pub fn new(channel_id: impl Into<ChannelId>, message_id: impl Into<MessageId>) -> Self {
        Self {
            channel_id: channel_id.into(),
            message_id: message_id.into(),
        }
    }
}

impl From<&Message> for MessageRef {
    fn from(message: &Message) -> Self {
        Self {
            channel_id: message.channel_id.clone(),
            message_id: message.id.clone(),
        }
    }
}

impl From<&Reaction> for MessageRef {
    fn from(reaction: &Reaction) -> Self {
        Self {
            channel_id: reaction.channel_id.clone(),
            message_id: reaction.message_id.clone(),
        }
    }
}

/// Identifiers sufficient to fetch a [`Reaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRef {
    /// The reacted-to message.
    pub message: MessageRef,
    /// The emoji of the reaction to fetch.
    pub emoji: Emoji,
}

/// Associates a model type with the reference needed to fetch it.
pub trait Identify {
    /// The stub form carried by partial events.
    type Ref: Clone + Send + Sync + std::fmt::Debug;
}

impl Identify for Message {
    type Ref = MessageRef;
}

impl Identify for Reaction {
    type Ref = ReactionRef;
}

impl Identify for User {
    type Ref = UserId;
}

/// A possibly-unresolved platform object.
///
/// `Stub` holds just enough to fetch the object; `Full` holds the object
/// itself. Field access requires matching on the variant or going through a
/// hydrator, so unresolved data cannot be used by accident.
#[derive(Debug, Clone)]
pub enum Partial<T: Identify> {
    /// An unresolved stub; must be fetched before use.
    Stub(T::Ref),
    /// A fully populated object.
    Full(T),
}

impl<T: Identify> Partial<T> {
    /// Returns the full object, if already resolved.
    pub fn full(&self) -> Option<&T> {
        match self {
            Self::Full(value) => Some(value),
            Self::Stub(_) => None,
        }
    }

    /// Returns `true` if this value still needs fetching.
    pub fn is_stub(&self) -> bool {
        matches!(self, Self::Stub(_))
    }
}

impl Partial<User> {
    /// The user id, available on both variants.
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::Stub(id) => id,
            Self::Full(user) => &user.id,
        }
    }
}

impl Partial<Reaction> {
    /// A best-effort emoji description for log messages, available on both
    /// variants.
    pub fn emoji_describe(&self) -> &str {
        match self {
            Self::Stub(r) => r.emoji.describe(),
            Self::Full(reaction) => reaction.emoji.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_and_full_accessors() {
        let stub: Partial<User> = Partial::Stub(UserId::new("7"));
        assert!(stub.is_stub());
        assert!(stub.full().is_none());
        assert_eq!(stub.user_id(), &UserId::new("7"));

        let full = Partial::Full(User::new("7", "ada"));
        assert!(!full.is_stub());
        assert_eq!(full.full().unwrap().username, "ada");
        assert_eq!(full.user_id(), &UserId::new("7"));
    }

    #[test]
    fn message_ref_from_reaction() {
        let reaction = Reaction::new(Emoji::unicode("⭐"), "c1", "m1");
        let r = MessageRef::from(&reaction);
        assert_eq!(r, MessageRef::new("c1", "m1"));
    }
}
