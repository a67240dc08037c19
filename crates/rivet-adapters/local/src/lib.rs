//! # Rivet Local Adapter
//!
//! An in-process [`ChatClient`] implementation backed by scriptable state.
//!
//! The local client serves two purposes:
//!
//! - **Tests**: integration tests seed users, channels, and messages, inject
//!   gateway events, and assert on recorded outbound sends.
//! - **Demos**: runnable examples drive the full dispatch pipeline without a
//!   network connection.
//!
//! # Example
//!
//! ```rust,ignore
//! let client = LocalClient::builder()
//!     .bot_user(User::new("bot", "rivet").as_bot())
//!     .channel(Channel::new("c1", ChannelKind::Text))
//!     .message(Message::new("m1", "c1", User::new("u1", "ada"), "hello"))
//!     .build();
//!
//! client.emit_message_created(Partial::Stub(MessageRef::new("c1", "m1")));
//! // ... let the dispatch layer run ...
//! assert_eq!(client.sent_messages().len(), 1);
//! ```

mod client;

pub use client::{CreatedThread, LocalClient, LocalClientBuilder, SentMessage};
