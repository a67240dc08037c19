//! The scriptable in-process client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

use rivet_core::{
    ApiError, ApiResult, Channel, ChannelId, ChannelKind, ChatClient, GatewayEvent, Message,
    MessageCreated, MessageId, MessageRef, OutgoingMessage, Partial, Reaction, ReactionAdded,
    ReactionRef, User, UserId,
};

/// Capacity of the gateway broadcast channel.
///
/// Large enough that tests never lag; real platform clients size this for
/// their own delivery pacing.
const EVENT_CAPACITY: usize = 256;

/// A message recorded by [`LocalClient::send_message`].
#[derive(Debug, Clone)]
pub struct SentMessage {
    /// The id assigned to the sent message.
    pub id: MessageId,
    /// The target channel.
    pub channel_id: ChannelId,
    /// The outbound payload as given.
    pub message: OutgoingMessage,
}

/// A thread recorded by [`LocalClient::create_thread`].
#[derive(Debug, Clone)]
pub struct CreatedThread {
    /// The new thread channel.
    pub thread: Channel,
    /// The parent channel the thread was created under.
    pub parent_id: ChannelId,
    /// The seeded initial message.
    pub initial: OutgoingMessage,
}

#[derive(Default)]
struct ScriptedState {
    users: HashMap<UserId, User>,
    channels: HashMap<ChannelId, Channel>,
    messages: HashMap<MessageId, Message>,
    reactions: Vec<Reaction>,
    /// One-shot error returned by the next fetch call, for failure-path tests.
    fail_next_fetch: Option<ApiError>,
}

/// An in-process [`ChatClient`] over scripted state.
///
/// Fetches resolve against seeded objects (missing objects yield
/// [`ApiError::NotFound`]); sends and thread creations are recorded instead
/// of leaving the process; gateway events are whatever the test or demo
/// injects through the `emit_*` methods.
pub struct LocalClient {
    bot_user: User,
    state: Mutex<ScriptedState>,
    sent: Mutex<Vec<SentMessage>>,
    threads: Mutex<Vec<CreatedThread>>,
    events_tx: broadcast::Sender<GatewayEvent>,
    next_id: AtomicU64,
}

impl LocalClient {
    /// Starts building a local client.
    pub fn builder() -> LocalClientBuilder {
        LocalClientBuilder::default()
    }

    // ─── Event injection ────────────────────────────────────────────────────

    /// Injects a raw gateway event.
    pub fn emit(&self, event: GatewayEvent) {
        // Send fails only when nobody is listening; that is fine for a
        // scripted client.
        let _ = self.events_tx.send(event);
    }

    /// Injects a reaction-added event.
    pub fn emit_reaction_added(
        &self,
        reaction: Partial<Reaction>,
        user: Partial<User>,
        message: Partial<Message>,
    ) {
        self.emit(GatewayEvent::ReactionAdded(ReactionAdded {
            reaction,
            user,
            message,
        }));
    }

    /// Injects a message-created event.
    pub fn emit_message_created(&self, message: Partial<Message>) {
        self.emit(GatewayEvent::MessageCreated(MessageCreated { message }));
    }

    // ─── Scripting and inspection ───────────────────────────────────────────

    /// Seeds or replaces a message after construction.
    pub fn put_message(&self, message: Message) {
        self.state
            .lock()
            .messages
            .insert(message.id.clone(), message);
    }

    /// Seeds or replaces a reaction after construction.
    pub fn put_reaction(&self, reaction: Reaction) {
        self.state.lock().reactions.push(reaction);
    }

    /// Makes the next single fetch call fail with the given error.
    pub fn fail_next_fetch(&self, error: ApiError) {
        self.state.lock().fail_next_fetch = Some(error);
    }

    /// Returns all messages sent through this client, in send order.
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Returns all threads created through this client, in creation order.
    pub fn created_threads(&self) -> Vec<CreatedThread> {
        self.threads.lock().clone()
    }

    fn take_injected_failure(&self) -> Option<ApiError> {
        self.state.lock().fail_next_fetch.take()
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("{prefix}-{n}")
    }
}

#[async_trait]
impl ChatClient for LocalClient {
    fn bot_user_id(&self) -> &UserId {
        &self.bot_user.id
    }

    async fn fetch_message(&self, message: &MessageRef) -> ApiResult<Message> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        self.state
            .lock()
            .messages
            .get(&message.message_id)
            .filter(|m| m.channel_id == message.channel_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("message", message.message_id.as_str()))
    }

    async fn fetch_reaction(&self, reaction: &ReactionRef) -> ApiResult<Reaction> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        self.state
            .lock()
            .reactions
            .iter()
            .find(|r| {
                r.message_id == reaction.message.message_id
                    && r.channel_id == reaction.message.channel_id
                    && r.emoji.id_or_name() == reaction.emoji.id_or_name()
            })
            .cloned()
            .ok_or_else(|| ApiError::not_found("reaction", reaction.emoji.describe().to_string()))
    }

    async fn fetch_user(&self, user: &UserId) -> ApiResult<User> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        if *user == self.bot_user.id {
            return Ok(self.bot_user.clone());
        }
        self.state
            .lock()
            .users
            .get(user)
            .cloned()
            .ok_or_else(|| ApiError::not_found("user", user.as_str()))
    }

    async fn fetch_channel(&self, channel: &ChannelId) -> ApiResult<Channel> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        self.state
            .lock()
            .channels
            .get(channel)
            .cloned()
            .ok_or_else(|| ApiError::not_found("channel", channel.as_str()))
    }

    async fn send_message(
        &self,
        channel: &ChannelId,
        message: OutgoingMessage,
    ) -> ApiResult<MessageId> {
        if !self.state.lock().channels.contains_key(channel) {
            return Err(ApiError::not_found("channel", channel.as_str()));
        }
        let id = MessageId::new(self.fresh_id("sent"));
        debug!(channel = %channel, id = %id, "recording outbound message");
        self.sent.lock().push(SentMessage {
            id: id.clone(),
            channel_id: channel.clone(),
            message,
        });
        Ok(id)
    }

    async fn create_thread(
        &self,
        parent: &ChannelId,
        name: &str,
        initial: OutgoingMessage,
    ) -> ApiResult<Channel> {
        let parent_channel = self
            .state
            .lock()
            .channels
            .get(parent)
            .cloned()
            .ok_or_else(|| ApiError::not_found("channel", parent.as_str()))?;

        if !matches!(parent_channel.kind, ChannelKind::Forum | ChannelKind::Text) {
            return Err(ApiError::Unsupported(format!(
                "cannot create a thread under a {:?} channel",
                parent_channel.kind
            )));
        }

        let thread =
            Channel::new(self.fresh_id("thread"), ChannelKind::Thread).named(name.to_string());
        self.state
            .lock()
            .channels
            .insert(thread.id.clone(), thread.clone());
        debug!(parent = %parent, thread = %thread.id, "recording created thread");
        self.threads.lock().push(CreatedThread {
            thread: thread.clone(),
            parent_id: parent.clone(),
            initial,
        });
        Ok(thread)
    }

    fn events(&self) -> broadcast::Receiver<GatewayEvent> {
        self.events_tx.subscribe()
    }
}

impl std::fmt::Debug for LocalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalClient")
            .field("bot_user", &self.bot_user.id)
            .finish_non_exhaustive()
    }
}

/// Builder for [`LocalClient`].
#[derive(Default)]
pub struct LocalClientBuilder {
    bot_user: Option<User>,
    users: Vec<User>,
    channels: Vec<Channel>,
    messages: Vec<Message>,
    reactions: Vec<Reaction>,
}

impl LocalClientBuilder {
    /// Sets the bot's own user. Defaults to a bot account named "rivet".
    pub fn bot_user(mut self, user: User) -> Self {
        self.bot_user = Some(user);
        self
    }

    /// Seeds a user.
    pub fn user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    /// Seeds a channel.
    pub fn channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    /// Seeds a message.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Seeds a reaction.
    pub fn reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    /// Builds the client.
    pub fn build(self) -> LocalClient {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let mut state = ScriptedState::default();
        for user in self.users {
            state.users.insert(user.id.clone(), user);
        }
        for channel in self.channels {
            state.channels.insert(channel.id.clone(), channel);
        }
        for message in self.messages {
            state.messages.insert(message.id.clone(), message);
        }
        state.reactions = self.reactions;

        LocalClient {
            bot_user: self
                .bot_user
                .unwrap_or_else(|| User::new("rivet-bot", "rivet").as_bot()),
            state: Mutex::new(state),
            sent: Mutex::new(Vec::new()),
            threads: Mutex::new(Vec::new()),
            events_tx,
            next_id: AtomicU64::new(1),
        }
    }
}
