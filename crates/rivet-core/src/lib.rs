//! # Rivet Core
//!
//! Foundation types for the Rivet agent host.
//!
//! This crate defines everything the dispatch layer and the platform adapters
//! agree on:
//!
//! - **Identifiers**: string newtypes for users, channels, messages, emoji
//! - **Data model**: [`User`], [`Message`], [`Reaction`], [`Channel`]
//! - **Partial values**: the two-state [`Partial`] wrapper that forces a
//!   resolve step before field access
//! - **Gateway events**: [`GatewayEvent`] and its payloads
//! - **Client abstraction**: the [`ChatClient`] trait, the black-box surface
//!   of the host chat platform (fetch primitives, outbound sends, the event
//!   stream, and the bot-identity check)
//! - **Errors**: [`ApiError`] for everything that crosses the client boundary
//!
//! The dispatch layer itself lives in `rivet-framework`; concrete platform
//! clients live under `rivet-adapters`.

pub mod client;
pub mod error;
pub mod event;
pub mod id;
pub mod model;
pub mod partial;

pub use client::{BoxedClient, ChatClient, OutgoingMessage};
pub use error::{ApiError, ApiResult};
pub use event::{GatewayEvent, MessageCreated, ReactionAdded};
pub use id::{ChannelId, EmojiId, GuildId, MessageId, UserId};
pub use model::{Attachment, Channel, ChannelKind, Emoji, Message, Reaction, User};
pub use partial::{MessageRef, Partial, ReactionRef};
