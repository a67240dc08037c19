//! Reaction dispatch.
//!
//! One [`ReactionDispatcher::dispatch`] call handles one `ReactionAdded`
//! event, walking a fixed pipeline:
//!
//! ```text
//! RECEIVED → (drop own reactions) → HYDRATE → DERIVE_KEYS → LOOKUP
//!          → VALIDATE_TARGET → INVOKE
//! ```
//!
//! Hydration failures are logged and drop the event; an action failure is
//! logged with the matched key and contained to that invocation. Nothing
//! here ever propagates an error back to the platform listener.

use std::sync::Arc;

use tracing::{debug, error, trace, warn};

use rivet_core::{BoxedClient, Emoji, OutgoingMessage, ReactionAdded};

use crate::context::ReactionContext;
use crate::emoji::normalize_emoji_key;
use crate::hydrate::{hydrate_message, hydrate_reaction, hydrate_user};
use crate::registry::SubscriptionRegistry;
use crate::subscription::{ReactionAction, reaction_action};

/// Dispatches reaction-added events against a reaction registry.
#[derive(Clone)]
pub struct ReactionDispatcher {
    client: BoxedClient,
    registry: Arc<SubscriptionRegistry<ReactionAction>>,
}

impl ReactionDispatcher {
    /// Creates a dispatcher over the given client and registry.
    pub fn new(client: BoxedClient, registry: Arc<SubscriptionRegistry<ReactionAction>>) -> Self {
        Self { client, registry }
    }

    /// Processes one reaction-added event end to end.
    pub async fn dispatch(&self, event: ReactionAdded) {
        // Ignore the bot's own reactions. The user id is available on both
        // stub and full users, so this needs no fetch.
        if event.user.user_id() == self.client.bot_user_id() {
            trace!("ignoring bot's own reaction");
            return;
        }

        let raw_identifier = event.reaction.emoji_describe().to_string();

        // HYDRATE — resolve reaction, parent message, and acting user. Any
        // fetch failure drops the event.
        let reaction = match hydrate_reaction(self.client.as_ref(), event.reaction).await {
            Ok(reaction) => reaction,
            Err(e) => {
                warn!(emoji = %raw_identifier, error = %e, "failed to hydrate reaction");
                return;
            }
        };
        let message = match hydrate_message(self.client.as_ref(), event.message).await {
            Ok(message) => message,
            Err(e) => {
                warn!(emoji = %raw_identifier, error = %e, "failed to hydrate reacted-to message");
                return;
            }
        };
        let user = match hydrate_user(self.client.as_ref(), event.user).await {
            Ok(user) => user,
            Err(e) => {
                warn!(emoji = %raw_identifier, error = %e, "failed to hydrate reacting user");
                return;
            }
        };

        // DERIVE_KEYS + LOOKUP — first registered candidate wins, and the
        // winning key (not the first candidate) is what the action sees.
        let candidates = derive_candidate_keys(&reaction.emoji);
        let Some((matched_key, action)) = candidates
            .iter()
            .find_map(|key| self.registry.get(key).map(|action| (key.clone(), action)))
        else {
            // No subscription for this emoji — the common case.
            return;
        };

        // VALIDATE_TARGET — the channel must support sending.
        let channel = match self.client.fetch_channel(&message.channel_id).await {
            Ok(channel) => channel,
            Err(e) => {
                warn!(emoji_key = %matched_key, error = %e, "failed to resolve target channel");
                return;
            }
        };
        if !channel.is_sendable() {
            debug!(emoji_key = %matched_key, channel = %channel.id, "target channel is not sendable");
            return;
        }

        // INVOKE — contained; a failing action never takes the listener down.
        let ctx = Arc::new(ReactionContext {
            client: Arc::clone(&self.client),
            emoji_key: matched_key.clone(),
            channel,
            message,
            reaction,
            user,
        });

        if let Err(e) = action(ctx).await {
            error!(emoji_key = %matched_key, error = %e, "reaction action failed");
        }
    }
}

impl std::fmt::Debug for ReactionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionDispatcher")
            .field("registered", &self.registry.len())
            .finish()
    }
}

/// Builds the ordered, de-duplicated candidate key list for an emoji.
///
/// The order {id-or-name, name, id} is a deliberate contract: it decides
/// which subscription wins when legacy and canonical registrations for the
/// same emoji coexist. Keep it as is.
pub(crate) fn derive_candidate_keys(emoji: &Emoji) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::with_capacity(3);

    let mut push = |value: Option<&str>| {
        let Some(value) = value else { return };
        if value.is_empty() {
            return;
        }
        let normalized = normalize_emoji_key(value);
        if !normalized.is_empty() && !candidates.contains(&normalized) {
            candidates.push(normalized);
        }
    };

    push(emoji.id_or_name());
    push(emoji.name.as_deref());
    push(emoji.id.as_ref().map(|id| id.as_str()));

    candidates
}

/// The built-in acknowledgement action bound to `⭐` when the very first
/// registration call finds an empty registry.
///
/// Fires only inside guilds and only for the first star on a message, and
/// posts a link back to the starred message.
pub(crate) fn default_star_action() -> ReactionAction {
    reaction_action(|ctx| async move {
        if !ctx.message.in_guild() {
            return Ok(());
        }

        // Only fire once per message to avoid duplicate acknowledgements.
        if ctx.reaction.count > 1 {
            return Ok(());
        }

        let content = format!(
            "⭐ {} starred a message from {}: {}",
            ctx.user.mention(),
            ctx.message.author.mention(),
            ctx.message.link()
        );
        ctx.client
            .send_message(
                &ctx.channel.id,
                OutgoingMessage::new(content).mention_allowed(ctx.user.id.clone()),
            )
            .await?;
        Ok(())
    })
}

/// The canonical key the default star action is registered under.
pub(crate) const DEFAULT_STAR_KEY: &str = "⭐";
