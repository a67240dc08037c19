//! Support-redirect agent.
//!
//! When someone reacts to a message with the `tech_support` emoji, the
//! conversation is moved into a dedicated thread under the support forum
//! channel, the requester is pointed there, and the support team is pulled in.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use rivet::core::ChannelKind;
use rivet::prelude::*;
use rivet::runtime::SupportConfig;

/// Emoji that triggers the redirect, in the registration form agents use.
const TRIGGER_EMOJI: &str = "tech_support";

/// Posted inside the new thread, after the quoted request.
const THREAD_FOLLOW_UP: &str = "beep boop, I've moved this conversation here so the \
support team can get back to you sooner.\n\nCould you please share your debugging \
info if you have not already?";

/// Thread names keep word characters, whitespace, and hyphens only.
static NAME_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_\s-]+").unwrap());

/// The reaction subscriptions this agent contributes.
pub fn subscriptions(config: SupportConfig) -> Vec<ReactionSubscription> {
    let config = Arc::new(config);
    vec![ReactionSubscription::new(TRIGGER_EMOJI, move |ctx| {
        let config = Arc::clone(&config);
        async move { redirect(ctx, &config).await }
    })]
}

/// Moves the reacted-to conversation into a support forum thread.
async fn redirect(ctx: Arc<ReactionContext>, config: &SupportConfig) -> ActionResult {
    debug!("support redirect triggered");

    if !ctx.message.in_guild() {
        return Ok(());
    }

    let Some(forum_id) = &config.forum_channel else {
        warn!("support forum channel not configured, skipping thread creation");
        return Ok(());
    };

    // Only the first reaction redirects; later ones would duplicate threads.
    if ctx.reaction.count > 1 {
        return Ok(());
    }

    if ctx.channel.is_thread() {
        return Ok(());
    }

    let forum = ctx.client.fetch_channel(&ChannelId::new(forum_id)).await?;
    if forum.kind != ChannelKind::Forum {
        warn!(channel = %forum.id, "configured support channel is not a forum");
        return Ok(());
    }

    let mut initial = OutgoingMessage::new(initial_post(&ctx.message, &ctx.channel.mention()));
    for user in unique_mentions([&ctx.message.author.id, &ctx.user.id]) {
        initial = initial.mention_allowed(user);
    }

    let thread = ctx
        .client
        .create_thread(&forum.id, &thread_name(&ctx.message), initial)
        .await?;

    // Pull the support team into the thread.
    if !config.team.is_empty() {
        let mut ping = OutgoingMessage::new(
            config
                .team
                .iter()
                .map(|id| format!("<@{id}>"))
                .collect::<Vec<_>>()
                .join(" "),
        );
        for id in &config.team {
            ping = ping.mention_allowed(id.as_str());
        }
        ctx.client.send_message(&thread.id, ping).await?;
    }

    let notice = config.redirect_notice.replace("{thread}", &thread.mention());
    ctx.client
        .send_message(
            &ctx.channel.id,
            OutgoingMessage::new(format!("{}, {}", ctx.message.author.mention(), notice))
                .mention_allowed(ctx.message.author.id.clone()),
        )
        .await?;

    info!(thread = %thread.id, "support thread created");
    Ok(())
}

/// Derives a thread name from the first words of the message.
///
/// Up to six whitespace-separated words, stripped of punctuation, capped at
/// ninety characters; falls back to `{username}-support` for messages with no
/// usable text.
fn thread_name(message: &Message) -> String {
    let head = message
        .content
        .split_whitespace()
        .take(6)
        .collect::<Vec<_>>()
        .join(" ");
    let sanitized = NAME_STRIP.replace_all(&head, "");
    let sanitized = sanitized.trim();

    let base = if sanitized.is_empty() {
        format!("{}-support", message.author.username)
    } else {
        sanitized.to_string()
    };

    base.chars().take(90).collect()
}

/// Formats the opening post of the support thread.
fn initial_post(message: &Message, source_channel_mention: &str) -> String {
    let content = message.content.trim();
    let mut quoted = if content.is_empty() {
        "_No message content provided._".to_string()
    } else {
        content.to_string()
    };
    for attachment in &message.attachments {
        quoted.push('\n');
        quoted.push_str(&attachment.url);
    }

    format!(
        "support request from {} in {}\n```\n{}\n```\noriginal message link: {}\n\n---\n\n{}",
        message.author.mention(),
        source_channel_mention,
        quoted,
        message.link(),
        THREAD_FOLLOW_UP,
    )
}

/// Deduplicates mention targets, preserving order and dropping blanks.
fn unique_mentions<'a>(ids: impl IntoIterator<Item = &'a UserId>) -> Vec<UserId> {
    let mut unique = Vec::new();
    for id in ids {
        let trimmed = id.as_str().trim();
        if trimmed.is_empty() {
            continue;
        }
        if !unique.iter().any(|u: &UserId| u.as_str() == trimmed) {
            unique.push(UserId::new(trimmed));
        }
    }
    unique
}
