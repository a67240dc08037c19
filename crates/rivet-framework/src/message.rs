//! Message dispatch.
//!
//! One [`MessageDispatcher::dispatch`] call handles one `MessageCreated`
//! event: `RECEIVED → HYDRATE → FAN_OUT`. Fan-out walks every registered
//! message subscription in registration order; each invocation is wrapped
//! independently so one failing action cannot starve its siblings or abort
//! processing of future events.

use std::sync::Arc;

use tracing::{error, warn};

use rivet_core::{BoxedClient, MessageCreated};

use crate::context::MessageContext;
use crate::hydrate::hydrate_message;
use crate::registry::SubscriptionRegistry;
use crate::subscription::MessageSubscription;

/// Dispatches message-created events against a message registry.
#[derive(Clone)]
pub struct MessageDispatcher {
    client: BoxedClient,
    registry: Arc<SubscriptionRegistry<MessageSubscription>>,
}

impl MessageDispatcher {
    /// Creates a dispatcher over the given client and registry.
    pub fn new(
        client: BoxedClient,
        registry: Arc<SubscriptionRegistry<MessageSubscription>>,
    ) -> Self {
        Self { client, registry }
    }

    /// Processes one message-created event end to end.
    pub async fn dispatch(&self, event: MessageCreated) {
        // HYDRATE — a fetch failure drops the event before any fan-out.
        let message = match hydrate_message(self.client.as_ref(), event.message).await {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "failed to hydrate incoming message");
                return;
            }
        };

        // FAN_OUT — registration order, one shared context, per-subscription
        // failure containment.
        let ctx = Arc::new(MessageContext {
            client: Arc::clone(&self.client),
            message,
        });

        for (id, subscription) in self.registry.snapshot() {
            if !subscription.accepts(&ctx.message) {
                continue;
            }

            if let Err(e) = (subscription.action)(Arc::clone(&ctx)).await {
                error!(subscription = %id, error = %e, "message action failed");
            }
        }
    }
}

impl std::fmt::Debug for MessageDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageDispatcher")
            .field("registered", &self.registry.len())
            .finish()
    }
}
