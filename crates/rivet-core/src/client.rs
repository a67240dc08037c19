//! The platform client abstraction.
//!
//! Everything the dispatch layer needs from the host chat platform is behind
//! [`ChatClient`]: fetch primitives for resolving partial objects, outbound
//! sends, thread creation, the bot-identity check, and the gateway event
//! stream. Login, reconnection, and rate limiting are the client's own
//! business and invisible here.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::ApiResult;
use crate::event::GatewayEvent;
use crate::id::{ChannelId, MessageId, UserId};
use crate::model::{Channel, Message, Reaction, User};
use crate::partial::{MessageRef, ReactionRef};

/// An outbound message.
///
/// Mentions inside `content` only ping users listed in `allowed_mentions`;
/// an empty list means the message pings nobody.
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    /// Plain-text content.
    pub content: String,
    /// Users that may be pinged by mentions in the content.
    pub allowed_mentions: Vec<UserId>,
    /// Message to reply to, if any.
    pub reply_to: Option<MessageId>,
}

impl OutgoingMessage {
    /// Creates an outgoing message with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Allows a user to be pinged by this message.
    pub fn mention_allowed(mut self, user: impl Into<UserId>) -> Self {
        self.allowed_mentions.push(user.into());
        self
    }

    /// Sends this message as a reply.
    pub fn in_reply_to(mut self, message: impl Into<MessageId>) -> Self {
        self.reply_to = Some(message.into());
        self
    }
}

/// The black-box surface of the host chat platform.
///
/// Implementations live under `rivet-adapters`. The dispatch layer only ever
/// holds a [`BoxedClient`].
#[async_trait]
pub trait ChatClient: Send + Sync + 'static {
    /// The bot's own user id, used to ignore the bot's own actions.
    fn bot_user_id(&self) -> &UserId;

    /// Resolves a message stub into a full message.
    async fn fetch_message(&self, message: &MessageRef) -> ApiResult<Message>;

    /// Resolves a reaction stub into a full reaction.
    async fn fetch_reaction(&self, reaction: &ReactionRef) -> ApiResult<Reaction>;

    /// Resolves a user id into a full user.
    async fn fetch_user(&self, user: &UserId) -> ApiResult<User>;

    /// Resolves a channel id into a full channel.
    async fn fetch_channel(&self, channel: &ChannelId) -> ApiResult<Channel>;

    /// Sends a message to a channel, returning the new message's id.
    async fn send_message(
        &self,
        channel: &ChannelId,
        message: OutgoingMessage,
    ) -> ApiResult<MessageId>;

    /// Creates a thread under a forum or text channel, seeded with an
    /// initial message, and returns the new thread channel.
    async fn create_thread(
        &self,
        parent: &ChannelId,
        name: &str,
        initial: OutgoingMessage,
    ) -> ApiResult<Channel>;

    /// Subscribes to the gateway event stream.
    ///
    /// Every call returns an independent receiver; slow receivers may lag
    /// and miss events (delivery is not guaranteed).
    fn events(&self) -> broadcast::Receiver<GatewayEvent>;
}

/// A shared, type-erased platform client.
pub type BoxedClient = Arc<dyn ChatClient>;
