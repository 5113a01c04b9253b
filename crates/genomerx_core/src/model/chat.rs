//! Chat domain model: channels, messages and the canonical thread id.
//!
//! # Responsibility
//! - Define the append-only message record with its frozen author snapshot.
//! - Derive the canonical id both direct-message participants converge on.
//!
//! # Invariants
//! - `direct_thread_id(a, b) == direct_thread_id(b, a)` for any two emails.
//! - Message records are never edited or deleted after append.

use crate::model::account::{normalize_email, Account, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a chat message.
pub type MessageId = Uuid;

/// Fixed id of the shared broadcast thread all accounts can read and post to.
pub const BROADCAST_CHANNEL_ID: &str = "broadcast";

/// Channel classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Broadcast,
    Direct,
}

/// One registered chat channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub kind: ChannelKind,
    /// Participant emails; empty for the broadcast channel.
    pub participants: Vec<String>,
}

impl Channel {
    pub fn broadcast() -> Self {
        Self {
            id: BROADCAST_CHANNEL_ID.to_string(),
            kind: ChannelKind::Broadcast,
            participants: Vec::new(),
        }
    }
}

/// Author identity frozen at send time.
///
/// Intentionally a copy, not a reference: later profile renames or
/// deactivation must not rewrite who said what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<&Account> for UserSnapshot {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            name: account.name.clone(),
            role: account.role,
        }
    }
}

/// One append-only chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub channel_id: String,
    pub text: String,
    /// Send instant in epoch milliseconds; thread ordering key.
    pub ts: i64,
    pub user: UserSnapshot,
}

/// Returns the canonical id for the direct thread between two accounts.
///
/// Both participant emails are normalized and sorted before joining, so both
/// clients resolve the same log without a negotiation step.
pub fn direct_thread_id(a: &str, b: &str) -> String {
    let mut pair = [normalize_email(a), normalize_email(b)];
    pair.sort();
    format!("dm:{}|{}", pair[0], pair[1])
}
