//! A runnable agent host over the local adapter.
//!
//! Seeds a small scripted guild, registers the ping and support-redirect
//! agents (the built-in star acknowledgement comes along for free), then
//! replays a handful of gateway events and prints what the bot did.
//!
//! ```text
//! cargo run -p support_bot
//! ```

mod support;

use std::sync::Arc;
use std::time::Duration;

use rivet::core::{Channel, ChannelKind, Emoji, MessageRef, Partial, Reaction, User};
use rivet::prelude::*;
use rivet::runtime::RivetConfig;
use rivet_adapter_local::LocalClient;

const GENERAL: &str = "chan-general";
const FORUM: &str = "chan-support-forum";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = scripted_client();

    let mut config = RivetConfig::default();
    config.agents.support.forum_channel = Some(FORUM.to_string());
    config.agents.support.team = vec!["user-sam".to_string()];

    let runtime = AgentRuntime::from_config(client.clone(), config);

    runtime.register_message_subscriptions(ping_subscriptions(runtime.client()));
    runtime.register_reaction_subscriptions(support::subscriptions(
        runtime.config().agents.support.clone(),
    ));

    replay_events(&client);

    let driver = {
        let client = Arc::clone(&client);
        let shutdown = runtime.shutdown_token();
        tokio::spawn(async move {
            // Give the listener tasks a moment to drain the replayed events.
            tokio::time::sleep(Duration::from_millis(300)).await;

            for sent in client.sent_messages() {
                info!(channel = %sent.channel_id, content = %sent.message.content, "bot sent");
            }
            for thread in client.created_threads() {
                info!(
                    parent = %thread.parent_id,
                    name = thread.thread.name.as_deref().unwrap_or(""),
                    "bot created thread"
                );
            }

            shutdown.cancel();
        })
    };

    runtime.run().await?;
    driver.await?;
    Ok(())
}

/// A guild with two members, a general channel, a support forum, and a
/// question that deserves both a star and a redirect.
fn scripted_client() -> Arc<LocalClient> {
    let ada = User::new("user-ada", "ada");
    Arc::new(
        LocalClient::builder()
            .bot_user(User::new("bot-rivet", "rivet").as_bot())
            .user(ada.clone())
            .user(User::new("user-sam", "sam"))
            .channel(Channel::new(GENERAL, ChannelKind::Text).named("general"))
            .channel(Channel::new(FORUM, ChannelKind::Forum).named("support"))
            .message(
                Message::new(
                    "msg-question",
                    GENERAL,
                    ada.clone(),
                    "my webhook keeps failing with a 401, any ideas?",
                )
                .in_guild_id("guild-demo"),
            )
            .message(Message::new("msg-ping", GENERAL, ada, "!ping").in_guild_id("guild-demo"))
            .build(),
    )
}

/// Replays the scripted gateway traffic: a `!ping`, a support redirect, and a
/// star on the same question.
fn replay_events(client: &LocalClient) {
    client.emit_message_created(Partial::Stub(MessageRef::new(GENERAL, "msg-ping")));

    let redirect = Reaction::new(Emoji::custom("tech_support", "em-support"), GENERAL, "msg-question");
    client.put_reaction(redirect.clone());
    client.emit_reaction_added(
        Partial::Full(redirect),
        Partial::Stub(UserId::new("user-sam")),
        Partial::Stub(MessageRef::new(GENERAL, "msg-question")),
    );

    let star = Reaction::new(Emoji::unicode("⭐"), GENERAL, "msg-question");
    client.put_reaction(star.clone());
    client.emit_reaction_added(
        Partial::Full(star),
        Partial::Stub(UserId::new("user-sam")),
        Partial::Stub(MessageRef::new(GENERAL, "msg-question")),
    );
}

/// The ping-pong smoke-test agent.
fn ping_subscriptions(client: rivet::core::BoxedClient) -> Vec<MessageSubscription> {
    let bot_id = client.bot_user_id().clone();
    vec![
        MessageSubscription::new("ping-test", |ctx| async move {
            info!(
                author = %ctx.message.author.username,
                channel = %ctx.message.channel_id,
                "ping received"
            );
            ctx.client
                .send_message(
                    &ctx.message.channel_id,
                    OutgoingMessage::new("pong! 🏓").in_reply_to(ctx.message.id.clone()),
                )
                .await?;
            Ok(())
        })
        .with_filter(move |message| {
            message.in_guild()
                && message.author.id != bot_id
                && message.content.trim().eq_ignore_ascii_case("!ping")
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    async fn settle(client: &LocalClient, want_sends: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if client.sent_messages().len() >= want_sends {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn scripted_run_produces_the_expected_traffic() {
        let client = scripted_client();

        let mut config = RivetConfig::default();
        config.agents.support.forum_channel = Some(FORUM.to_string());
        config.agents.support.team = vec!["user-sam".to_string()];

        let runtime = AgentRuntime::from_config(client.clone(), config);
        runtime.register_message_subscriptions(ping_subscriptions(runtime.client()));
        runtime.register_reaction_subscriptions(support::subscriptions(
            runtime.config().agents.support.clone(),
        ));

        replay_events(&client);

        // pong + team ping + redirect notice + star acknowledgement
        settle(&client, 4).await;

        let sent = client.sent_messages();
        assert!(sent.iter().any(|s| s.message.content.starts_with("pong!")));
        assert!(
            sent.iter()
                .any(|s| s.message.content.contains("I moved it to"))
        );
        assert!(
            sent.iter()
                .any(|s| s.message.content.contains("starred a message"))
        );

        let threads = client.created_threads();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].parent_id.as_str(), FORUM);
        assert_eq!(
            threads[0].thread.name.as_deref(),
            Some("my webhook keeps failing with a")
        );
        assert!(threads[0].initial.content.contains("support request from"));
    }
}
