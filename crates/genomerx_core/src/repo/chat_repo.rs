//! Chat repository over the persisted `grx_chat` payload.
//!
//! # Responsibility
//! - Own the channel registry and the append-only message log, persisted
//!   together as one chat-state payload.
//!
//! # Invariants
//! - Messages are append-only; no mutation path edits or removes one.
//! - The broadcast channel is always present after load.

use crate::model::chat::{Channel, ChatMessage, BROADCAST_CHANNEL_ID};
use crate::repo::{load_or_default, persist, RepoResult, StateStore};
use serde::{Deserialize, Serialize};

const STATE_KEY: &str = "grx_chat";

/// Persisted chat state: channel registry plus message log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    pub channels: Vec<Channel>,
    pub messages: Vec<ChatMessage>,
}

/// Persisted chat collection.
pub struct ChatRepository<S: StateStore> {
    store: S,
    state: ChatState,
}

impl<S: StateStore> ChatRepository<S> {
    /// Loads chat state; the broadcast channel is registered in memory when
    /// missing (first persisted on the next mutation).
    pub fn load(store: S) -> RepoResult<Self> {
        let mut state: ChatState = load_or_default(&store, STATE_KEY)?;
        if !state
            .channels
            .iter()
            .any(|channel| channel.id == BROADCAST_CHANNEL_ID)
        {
            state.channels.insert(0, Channel::broadcast());
        }
        Ok(Self { store, state })
    }

    pub fn channels(&self) -> &[Channel] {
        &self.state.channels
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.state.channels.iter().find(|channel| channel.id == id)
    }

    /// Registers a channel if its id is not present yet.
    pub fn ensure_channel(&mut self, channel: Channel) -> RepoResult<()> {
        if self.channel(&channel.id).is_some() {
            return Ok(());
        }
        let mut next = self.state.clone();
        next.channels.push(channel);
        self.commit(next)
    }

    /// Appends one message to the log.
    pub fn append_message(&mut self, message: ChatMessage) -> RepoResult<()> {
        let mut next = self.state.clone();
        next.messages.push(message);
        self.commit(next)
    }

    /// Returns the messages of one thread, ascending by timestamp.
    ///
    /// The sort is stable, so equal timestamps keep insertion order.
    pub fn messages_for(&self, channel_id: &str) -> Vec<ChatMessage> {
        let mut messages: Vec<ChatMessage> = self
            .state
            .messages
            .iter()
            .filter(|message| message.channel_id == channel_id)
            .cloned()
            .collect();
        messages.sort_by_key(|message| message.ts);
        messages
    }

    fn commit(&mut self, next: ChatState) -> RepoResult<()> {
        persist(&self.store, STATE_KEY, &next)?;
        self.state = next;
        Ok(())
    }
}
