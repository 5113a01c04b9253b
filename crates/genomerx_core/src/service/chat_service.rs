//! Chat use-case service: broadcast channel and direct threads.
//!
//! # Responsibility
//! - Register direct threads on first use under their canonical id.
//! - Append messages with the author snapshot frozen at send time.
//!
//! # Invariants
//! - The log is append-only; no edit or delete path exists. The log is
//!   the "who said what when" record of the collaboration.
//! - `thread()` returns ascending timestamps with insertion order on ties.

use crate::model::account::Account;
use crate::model::chat::{
    direct_thread_id, Channel, ChannelKind, ChatMessage, UserSnapshot, BROADCAST_CHANNEL_ID,
};
use crate::repo::chat_repo::ChatRepository;
use crate::repo::{RepoError, StateStore};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Chat error taxonomy.
#[derive(Debug)]
pub enum ChatError {
    /// Message text trims to empty.
    EmptyMessage,
    /// Target channel id was never registered.
    UnknownChannel(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "message text must not be empty"),
            Self::UnknownChannel(id) => write!(f, "unknown chat channel: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ChatError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Chat facade over the chat repository.
pub struct ChatService<S: StateStore> {
    repo: ChatRepository<S>,
}

impl<S: StateStore> ChatService<S> {
    pub fn new(repo: ChatRepository<S>) -> Self {
        Self { repo }
    }

    /// Fixed id of the shared broadcast thread.
    pub fn broadcast_id(&self) -> &'static str {
        BROADCAST_CHANNEL_ID
    }

    /// Resolves and registers the direct thread between two accounts.
    ///
    /// Both participants converge on the same id regardless of who opens
    /// the thread first.
    pub fn open_direct(&mut self, a: &Account, b: &Account) -> Result<String, ChatError> {
        let id = direct_thread_id(&a.email, &b.email);
        self.repo.ensure_channel(Channel {
            id: id.clone(),
            kind: ChannelKind::Direct,
            participants: vec![a.email.clone(), b.email.clone()],
        })?;
        Ok(id)
    }

    pub fn channels(&self) -> &[Channel] {
        self.repo.channels()
    }

    /// Appends one message to a registered channel.
    pub fn post(
        &mut self,
        channel_id: &str,
        text: &str,
        author: &Account,
        now_ms: i64,
    ) -> Result<ChatMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.repo.channel(channel_id).is_none() {
            return Err(ChatError::UnknownChannel(channel_id.to_string()));
        }

        let message = ChatMessage {
            id: Uuid::new_v4(),
            channel_id: channel_id.to_string(),
            text: text.to_string(),
            ts: now_ms,
            user: UserSnapshot::from(author),
        };
        self.repo.append_message(message.clone())?;
        Ok(message)
    }

    /// Returns one thread's messages, ascending by timestamp (stable).
    pub fn thread(&self, channel_id: &str) -> Vec<ChatMessage> {
        self.repo.messages_for(channel_id)
    }
}
