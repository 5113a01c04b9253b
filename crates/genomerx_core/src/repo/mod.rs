//! Repository layer: per-entity collections with a persistence hook.
//!
//! # Responsibility
//! - Own the in-memory collection for each persisted entity type.
//! - Serialize the full collection as JSON through a [`StateStore`] after
//!   every successful mutation (copy-on-write commit).
//!
//! # Invariants
//! - A commit serializes the complete replacement collection before the
//!   in-memory swap; a failed write leaves the last-known-good state.
//! - Malformed or missing payloads at startup degrade to the empty default
//!   instead of raising an error.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod annotation_repo;
pub mod calendar_repo;
pub mod chat_repo;
pub mod identity_repo;
pub mod preference_repo;
pub mod state_store;
pub mod task_repo;

pub use state_store::{MemoryStateStore, SqliteStateStore, StateStore, StoreError};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and lookup operations.
#[derive(Debug)]
pub enum RepoError {
    /// Persistence hook failure; the in-memory state was not swapped.
    Store(StoreError),
    /// Collection could not be serialized for write-back.
    Encode(serde_json::Error),
    /// Semantic lookup miss.
    NotFound { entity: &'static str, id: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode persisted payload: {err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Reads one collection payload, degrading to the default on any problem.
///
/// Missing keys are the normal first-run case; malformed JSON is logged and
/// replaced rather than surfaced, per the startup contract.
pub(crate) fn load_or_default<T, S>(store: &S, key: &str) -> RepoResult<T>
where
    T: DeserializeOwned + Default,
    S: StateStore,
{
    match store.load(key)? {
        None => Ok(T::default()),
        Some(payload) => match serde_json::from_str(&payload) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(
                    "event=state_load module=repo status=degraded key={key} error_code=malformed_payload error={err}"
                );
                Ok(T::default())
            }
        },
    }
}

/// Serializes and persists one full collection payload.
pub(crate) fn persist<T, S>(store: &S, key: &str, value: &T) -> RepoResult<()>
where
    T: Serialize,
    S: StateStore,
{
    let payload = serde_json::to_string(value).map_err(RepoError::Encode)?;
    store.save(key, &payload)?;
    Ok(())
}
