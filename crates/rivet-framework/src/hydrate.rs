//! Resolution of partial event payloads.
//!
//! Each function returns a [`Partial::Full`] value unchanged and resolves a
//! [`Partial::Stub`] through the client's fetch primitive. Fetch errors are
//! surfaced to the caller — the dispatchers decide what a failed hydration
//! means; no retries and no logging happen here.

use rivet_core::{ApiResult, ChatClient, Message, Partial, Reaction, User};

/// Resolves a possibly-partial message.
pub async fn hydrate_message(
    client: &dyn ChatClient,
    message: Partial<Message>,
) -> ApiResult<Message> {
    match message {
        Partial::Full(message) => Ok(message),
        Partial::Stub(r) => client.fetch_message(&r).await,
    }
}

/// Resolves a possibly-partial reaction.
pub async fn hydrate_reaction(
    client: &dyn ChatClient,
    reaction: Partial<Reaction>,
) -> ApiResult<Reaction> {
    match reaction {
        Partial::Full(reaction) => Ok(reaction),
        Partial::Stub(r) => client.fetch_reaction(&r).await,
    }
}

/// Resolves a possibly-partial user.
pub async fn hydrate_user(client: &dyn ChatClient, user: Partial<User>) -> ApiResult<User> {
    match user {
        Partial::Full(user) => Ok(user),
        Partial::Stub(id) => client.fetch_user(&id).await,
    }
}
