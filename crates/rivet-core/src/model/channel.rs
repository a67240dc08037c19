//! Channel model.

use serde::{Deserialize, Serialize};

use crate::id::ChannelId;

/// The kind of a channel, which determines what can be done with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// A regular guild text channel.
    Text,
    /// A direct-message channel.
    Dm,
    /// A thread inside a text or forum channel.
    Thread,
    /// A forum channel; posts are created as threads, it cannot receive
    /// plain sends itself.
    Forum,
    /// A voice channel.
    Voice,
    /// A category grouping other channels.
    Category,
}

/// A channel as resolved from the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Unique channel identifier.
    pub id: ChannelId,
    /// What kind of channel this is.
    pub kind: ChannelKind,
    /// Channel name, absent for direct messages.
    #[serde(default)]
    pub name: Option<String>,
}

impl Channel {
    /// Creates a channel of the given kind.
    pub fn new(id: impl Into<ChannelId>, kind: ChannelKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
        }
    }

    /// Sets the channel name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns `true` if messages can be sent directly to this channel.
    pub fn is_sendable(&self) -> bool {
        matches!(
            self.kind,
            ChannelKind::Text | ChannelKind::Dm | ChannelKind::Thread
        )
    }

    /// Returns `true` if this channel is a thread.
    pub fn is_thread(&self) -> bool {
        self.kind == ChannelKind::Thread
    }

    /// Returns the platform mention string for this channel.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}
