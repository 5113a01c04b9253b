//! Browser-session state: current identity and the login lockout machine.
//!
//! # Responsibility
//! - Track the authenticated account for the lifetime of one session.
//! - Own the session-local lockout state (Open → Locked(until) → Open).
//!
//! # Invariants
//! - Lockout state is never persisted; a fresh session always starts Open.
//! - While locked, every attempt is rejected regardless of correctness.

use crate::model::account::Account;

/// Consecutive failed attempts that trigger a lockout.
pub const LOCKOUT_THRESHOLD: u8 = 3;

/// Lockout duration in milliseconds (60 minutes).
pub const LOCKOUT_DURATION_MS: i64 = 60 * 60 * 1000;

/// Login throttle state for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutState {
    /// Accepting attempts; counts consecutive failures so far.
    Open { failures: u8 },
    /// Rejecting all attempts until the expiry instant.
    Locked { until_ms: i64 },
}

impl Default for LockoutState {
    fn default() -> Self {
        Self::Open { failures: 0 }
    }
}

impl LockoutState {
    /// Returns whether attempts are currently rejected.
    pub fn is_locked(&self, now_ms: i64) -> bool {
        matches!(self, Self::Locked { until_ms } if now_ms < *until_ms)
    }

    /// Returns the lock expiry instant, if any.
    pub fn locked_until(&self) -> Option<i64> {
        match self {
            Self::Locked { until_ms } => Some(*until_ms),
            Self::Open { .. } => None,
        }
    }

    /// Collapses an expired lock back to the open state.
    pub fn refreshed(self, now_ms: i64) -> Self {
        match self {
            Self::Locked { until_ms } if now_ms >= until_ms => Self::default(),
            other => other,
        }
    }

    /// Records one failed credential check.
    ///
    /// The attempt that reaches [`LOCKOUT_THRESHOLD`] transitions to
    /// `Locked(now + 60 min)`.
    pub fn register_failure(self, now_ms: i64) -> Self {
        match self.refreshed(now_ms) {
            Self::Open { failures } => {
                let failures = failures.saturating_add(1);
                if failures >= LOCKOUT_THRESHOLD {
                    Self::Locked {
                        until_ms: now_ms + LOCKOUT_DURATION_MS,
                    }
                } else {
                    Self::Open { failures }
                }
            }
            locked => locked,
        }
    }

    /// Clears the failure count after a successful login.
    pub fn register_success(self) -> Self {
        Self::default()
    }
}

/// One browser session: authenticated identity plus lockout state.
///
/// Navigation state lives in the presentation layer; the core only gates
/// which components a session may reach via the signed-in account's role.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Currently authenticated account, if any.
    pub current: Option<Account>,
    pub lockout: LockoutState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signed-in account, if any.
    pub fn current_account(&self) -> Option<&Account> {
        self.current.as_ref()
    }

    /// Clears the authenticated identity, keeping lockout state intact.
    pub fn sign_out(&mut self) {
        self.current = None;
    }
}
