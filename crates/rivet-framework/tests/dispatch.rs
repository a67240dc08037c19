//! End-to-end dispatch tests over the local adapter.
//!
//! Matching and failure-isolation rules are exercised by driving the
//! dispatchers directly (deterministic, no timing); listener attachment and
//! the default-handler bootstrap go through the hub and the live event
//! stream.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::{Instant, sleep};

use rivet_adapter_local::LocalClient;
use rivet_core::{
    ApiError, BoxedClient, Channel, ChannelKind, Emoji, Message, MessageCreated, MessageRef,
    Partial, Reaction, ReactionAdded, User, UserId,
};
use rivet_framework::{
    MessageDispatcher, MessageSubscription, ReactionDispatcher, ReactionSubscription,
    SubscriptionHub, SubscriptionRegistry, reaction_action,
};

const MEMBER: &str = "u1";
const CHANNEL: &str = "c1";
const MESSAGE: &str = "m1";

fn seeded_client() -> Arc<LocalClient> {
    Arc::new(
        LocalClient::builder()
            .bot_user(User::new("bot", "rivet").as_bot())
            .user(User::new(MEMBER, "ada"))
            .channel(Channel::new(CHANNEL, ChannelKind::Text))
            .message(
                Message::new(MESSAGE, CHANNEL, User::new(MEMBER, "ada"), "hello").in_guild_id("g1"),
            )
            .build(),
    )
}

fn star_event(client: &LocalClient) -> ReactionAdded {
    let reaction = Reaction::new(Emoji::unicode("⭐"), CHANNEL, MESSAGE);
    client.put_reaction(reaction.clone());
    ReactionAdded {
        reaction: Partial::Full(reaction),
        user: Partial::Stub(UserId::new(MEMBER)),
        message: Partial::Stub(MessageRef::new(CHANNEL, MESSAGE)),
    }
}

/// Polls until `check` holds or the timeout elapses.
async fn wait_until(check: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        sleep(Duration::from_millis(5)).await;
    }
    check()
}

// ============================================================================
// Reaction dispatch — direct dispatcher, deterministic
// ============================================================================

#[tokio::test]
async fn matched_key_is_the_registry_hit_not_the_first_candidate() {
    let client = seeded_client();
    let registry = Arc::new(SubscriptionRegistry::new());

    // Candidates for a custom emoji are ["123", "wave"]; only the second is
    // registered, and that key must be what the action sees.
    let seen_key = Arc::new(Mutex::new(None::<String>));
    let seen = Arc::clone(&seen_key);
    registry.insert(
        "wave",
        reaction_action(move |ctx| {
            let seen = Arc::clone(&seen);
            async move {
                *seen.lock() = Some(ctx.emoji_key.clone());
                Ok(())
            }
        }),
    );

    let reaction = Reaction::new(Emoji::custom("wave", "123"), CHANNEL, MESSAGE);
    let dispatcher = ReactionDispatcher::new(client.clone() as BoxedClient, registry);
    dispatcher
        .dispatch(ReactionAdded {
            reaction: Partial::Full(reaction),
            user: Partial::Stub(UserId::new(MEMBER)),
            message: Partial::Stub(MessageRef::new(CHANNEL, MESSAGE)),
        })
        .await;

    assert_eq!(seen_key.lock().as_deref(), Some("wave"));
}

#[tokio::test]
async fn bot_own_reaction_never_triggers() {
    let client = seeded_client();
    let registry = Arc::new(SubscriptionRegistry::new());

    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    registry.insert(
        "⭐",
        reaction_action(move |_| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }),
    );

    let mut event = star_event(&client);
    event.user = Partial::Stub(UserId::new("bot"));

    ReactionDispatcher::new(client as BoxedClient, registry)
        .dispatch(event)
        .await;

    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn hydration_failure_drops_event_but_not_the_dispatcher() {
    let client = seeded_client();
    let registry = Arc::new(SubscriptionRegistry::new());

    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    registry.insert(
        "⭐",
        reaction_action(move |_| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }),
    );

    let dispatcher = ReactionDispatcher::new(client.clone() as BoxedClient, registry);

    client.fail_next_fetch(ApiError::request("gateway hiccup"));
    dispatcher.dispatch(star_event(&client)).await;
    assert_eq!(invoked.load(Ordering::SeqCst), 0);

    // The next event goes through untouched.
    dispatcher.dispatch(star_event(&client)).await;
    assert_eq!(invoked.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unsendable_channel_ends_dispatch_silently() {
    let client = Arc::new(
        LocalClient::builder()
            .bot_user(User::new("bot", "rivet").as_bot())
            .user(User::new(MEMBER, "ada"))
            .channel(Channel::new(CHANNEL, ChannelKind::Forum))
            .message(Message::new(MESSAGE, CHANNEL, User::new(MEMBER, "ada"), "hi"))
            .build(),
    );
    let registry = Arc::new(SubscriptionRegistry::new());

    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    registry.insert(
        "⭐",
        reaction_action(move |_| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }),
    );

    ReactionDispatcher::new(client.clone() as BoxedClient, registry)
        .dispatch(star_event(&client))
        .await;

    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unregistered_emoji_is_ignored() {
    let client = seeded_client();
    let registry = Arc::new(SubscriptionRegistry::new());
    let dispatcher = ReactionDispatcher::new(client.clone() as BoxedClient, registry);

    // No subscriptions at all; dispatch must simply return.
    dispatcher.dispatch(star_event(&client)).await;
    assert!(client.sent_messages().is_empty());
}

#[tokio::test]
async fn failing_reaction_action_is_contained() {
    let client = seeded_client();
    let registry = Arc::new(SubscriptionRegistry::new());
    registry.insert(
        "⭐",
        reaction_action(|_| async { anyhow::bail!("model call exploded") }),
    );

    let dispatcher = ReactionDispatcher::new(client.clone() as BoxedClient, registry);
    dispatcher.dispatch(star_event(&client)).await;

    // A second event still dispatches after the failure.
    dispatcher.dispatch(star_event(&client)).await;
}

// ============================================================================
// Message dispatch — direct dispatcher, deterministic
// ============================================================================

#[tokio::test]
async fn filter_gates_fan_out() {
    let client = seeded_client();
    let registry = Arc::new(SubscriptionRegistry::new());

    let filtered = Arc::new(AtomicUsize::new(0));
    let unfiltered = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&filtered);
    let sub = MessageSubscription::new("never", move |_| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    })
    .with_filter(|_| false);
    registry.insert(sub.id.clone(), sub);

    let counter = Arc::clone(&unfiltered);
    let sub = MessageSubscription::new("always", move |_| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });
    registry.insert(sub.id.clone(), sub);

    MessageDispatcher::new(client as BoxedClient, registry)
        .dispatch(MessageCreated {
            message: Partial::Stub(MessageRef::new(CHANNEL, MESSAGE)),
        })
        .await;

    assert_eq!(filtered.load(Ordering::SeqCst), 0);
    assert_eq!(unfiltered.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failing_subscription_does_not_starve_siblings() {
    let client = seeded_client();
    let registry = Arc::new(SubscriptionRegistry::new());

    let sub = MessageSubscription::new("boom", |_| async { anyhow::bail!("kaput") });
    registry.insert(sub.id.clone(), sub);

    let survived = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&survived);
    let sub = MessageSubscription::new("survivor", move |_| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });
    registry.insert(sub.id.clone(), sub);

    MessageDispatcher::new(client as BoxedClient, registry)
        .dispatch(MessageCreated {
            message: Partial::Stub(MessageRef::new(CHANNEL, MESSAGE)),
        })
        .await;

    assert_eq!(survived.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn message_hydration_failure_skips_fan_out() {
    let client = seeded_client();
    let registry = Arc::new(SubscriptionRegistry::new());

    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    let sub = MessageSubscription::new("any", move |_| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });
    registry.insert(sub.id.clone(), sub);

    let dispatcher = MessageDispatcher::new(client.clone() as BoxedClient, registry);

    client.fail_next_fetch(ApiError::NotConnected);
    dispatcher
        .dispatch(MessageCreated {
            message: Partial::Stub(MessageRef::new(CHANNEL, MESSAGE)),
        })
        .await;
    assert_eq!(invoked.load(Ordering::SeqCst), 0);

    dispatcher
        .dispatch(MessageCreated {
            message: Partial::Stub(MessageRef::new(CHANNEL, MESSAGE)),
        })
        .await;
    assert_eq!(invoked.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Hub — listener idempotency and default-handler bootstrap
// ============================================================================

#[tokio::test]
async fn repeated_registration_attaches_one_listener() {
    let client = seeded_client();
    let hub = SubscriptionHub::new();

    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&first);
    hub.register_message_subscriptions(
        client.clone() as BoxedClient,
        vec![MessageSubscription::new("first", move |_| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })],
    );

    // Disjoint second registration; must not duplicate the listener.
    let counter = Arc::clone(&second);
    hub.register_message_subscriptions(
        client.clone() as BoxedClient,
        vec![MessageSubscription::new("second", move |_| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })],
    );

    client.emit_message_created(Partial::Stub(MessageRef::new(CHANNEL, MESSAGE)));

    assert!(
        wait_until(|| {
            first.load(Ordering::SeqCst) == 1 && second.load(Ordering::SeqCst) == 1
        })
        .await
    );

    // Give any duplicate invocation time to show up, then re-check.
    sleep(Duration::from_millis(50)).await;
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reaction_registration_merges_across_calls() {
    let client = seeded_client();
    let hub = SubscriptionHub::new();

    let invoked = Arc::new(AtomicUsize::new(0));
    hub.register_reaction_subscriptions(client.clone() as BoxedClient, Vec::new());

    let counter = Arc::clone(&invoked);
    hub.register_reaction_subscriptions(
        client.clone() as BoxedClient,
        vec![ReactionSubscription::new("📌", move |_| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })],
    );

    let reaction = Reaction::new(Emoji::unicode("📌"), CHANNEL, MESSAGE);
    client.put_reaction(reaction.clone());
    client.emit_reaction_added(
        Partial::Full(reaction),
        Partial::Stub(UserId::new(MEMBER)),
        Partial::Stub(MessageRef::new(CHANNEL, MESSAGE)),
    );

    assert!(wait_until(|| invoked.load(Ordering::SeqCst) == 1).await);
    sleep(Duration::from_millis(50)).await;
    assert_eq!(invoked.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn first_empty_registration_installs_star_default() {
    let client = seeded_client();
    let hub = SubscriptionHub::new();

    let handle = hub.register_reaction_subscriptions(client.clone() as BoxedClient, Vec::new());
    assert_eq!(handle.len(), 1);

    client.emit(rivet_core::GatewayEvent::ReactionAdded(star_event(&client)));

    assert!(wait_until(|| !client.sent_messages().is_empty()).await);
    let sent = client.sent_messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].message.content.contains("starred a message"));
    assert_eq!(sent[0].channel_id.as_str(), CHANNEL);
}

#[tokio::test]
async fn explicit_star_subscription_beats_the_default() {
    let client = seeded_client();
    let hub = SubscriptionHub::new();

    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    let handle = hub.register_reaction_subscriptions(
        client.clone() as BoxedClient,
        vec![ReactionSubscription::new("⭐", move |_| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })],
    );

    // The default was installed and immediately overwritten; one entry only.
    assert_eq!(handle.len(), 1);

    client.emit(rivet_core::GatewayEvent::ReactionAdded(star_event(&client)));

    assert!(wait_until(|| invoked.load(Ordering::SeqCst) == 1).await);
    // The default's acknowledgement must not have fired.
    assert!(client.sent_messages().is_empty());
}

#[tokio::test]
async fn default_is_never_resurrected() {
    let client = seeded_client();
    let hub = SubscriptionHub::new();

    let handle = hub.register_reaction_subscriptions(client.clone() as BoxedClient, Vec::new());
    assert_eq!(handle.len(), 1);

    handle.clear();
    let handle = hub.register_reaction_subscriptions(client as BoxedClient, Vec::new());
    assert!(handle.is_empty());
}

#[tokio::test]
async fn handle_remove_reports_and_unregisters() {
    let client = seeded_client();
    let hub = SubscriptionHub::new();

    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    let handle = hub.register_reaction_subscriptions(
        client.clone() as BoxedClient,
        vec![ReactionSubscription::new("<:wave:123>", move |_| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })],
    );

    // Any textual form of the same emoji removes the same canonical key.
    assert!(handle.remove("wave:123"));
    assert!(!handle.remove("wave:123"));

    let reaction = Reaction::new(Emoji::custom("wave", "123"), CHANNEL, MESSAGE);
    client.put_reaction(reaction.clone());
    client.emit_reaction_added(
        Partial::Full(reaction),
        Partial::Stub(UserId::new(MEMBER)),
        Partial::Stub(MessageRef::new(CHANNEL, MESSAGE)),
    );

    sleep(Duration::from_millis(50)).await;
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}
