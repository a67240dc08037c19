//! Message model.

use serde::{Deserialize, Serialize};

use crate::id::{ChannelId, GuildId, MessageId};
use crate::model::User;

/// A file or image attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Public URL of the attachment.
    pub url: String,
}

/// A fully-hydrated chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// The channel this message was sent in.
    pub channel_id: ChannelId,
    /// The guild this message belongs to, if any. `None` for direct messages.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// The author of the message.
    pub author: User,
    /// Plain-text content.
    pub content: String,
    /// Attached files, in upload order.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Returns `true` if this message was sent inside a guild.
    pub fn in_guild(&self) -> bool {
        self.guild_id.is_some()
    }

    /// Returns a permanent link to this message.
    ///
    /// Direct messages use the `@me` guild segment, matching the platform's
    /// own link format.
    pub fn link(&self) -> String {
        let guild = self
            .guild_id
            .as_ref()
            .map(|g| g.as_str())
            .unwrap_or("@me");
        format!("https://chat.example/channels/{guild}/{}/{}", self.channel_id, self.id)
    }
}

/// Builder-style construction for tests and adapters.
impl Message {
    /// Creates a message with the minimum required fields.
    pub fn new(
        id: impl Into<MessageId>,
        channel_id: impl Into<ChannelId>,
        author: User,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            guild_id: None,
            author,
            content: content.into(),
            attachments: Vec::new(),
        }
    }

    /// Places this message in a guild.
    pub fn in_guild_id(mut self, guild: impl Into<GuildId>) -> Self {
        self.guild_id = Some(guild.into());
        self
    }

    /// Adds an attachment URL.
    pub fn with_attachment(mut self, url: impl Into<String>) -> Self {
        self.attachments.push(Attachment { url: url.into() });
        self
    }
}
