//! Account repository over the persisted `grx_users` payload.
//!
//! # Responsibility
//! - Own the registered-account collection and its lookups by email.
//! - Persist the full collection on every successful mutation.
//!
//! # Invariants
//! - Lookups use the normalized email form.
//! - Accounts are never removed; deactivation flips `active` only.

use crate::model::account::{normalize_email, Account};
use crate::repo::{load_or_default, persist, RepoError, RepoResult, StateStore};

const STATE_KEY: &str = "grx_users";

/// Persisted account collection.
pub struct AccountRepository<S: StateStore> {
    store: S,
    accounts: Vec<Account>,
}

impl<S: StateStore> AccountRepository<S> {
    /// Loads the collection once at startup; malformed state degrades to
    /// an empty roster.
    pub fn load(store: S) -> RepoResult<Self> {
        let accounts = load_or_default(&store, STATE_KEY)?;
        Ok(Self { store, accounts })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Finds one account by email, normalized.
    pub fn find(&self, email: &str) -> Option<&Account> {
        let needle = normalize_email(email);
        self.accounts
            .iter()
            .find(|account| account.email == needle)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.find(email).is_some()
    }

    /// Appends one account and persists the replacement collection.
    pub fn insert(&mut self, account: Account) -> RepoResult<()> {
        let mut next = self.accounts.clone();
        next.push(account);
        self.commit(next)
    }

    /// Mutates one account in place and persists; returns the updated copy.
    pub fn update(
        &mut self,
        email: &str,
        mutate: impl FnOnce(&mut Account),
    ) -> RepoResult<Account> {
        let needle = normalize_email(email);
        let mut next = self.accounts.clone();
        let index = next
            .iter()
            .position(|account| account.email == needle)
            .ok_or(RepoError::NotFound {
                entity: "account",
                id: needle,
            })?;
        mutate(&mut next[index]);
        let updated = next[index].clone();
        self.commit(next)?;
        Ok(updated)
    }

    fn commit(&mut self, next: Vec<Account>) -> RepoResult<()> {
        persist(&self.store, STATE_KEY, &next)?;
        self.accounts = next;
        Ok(())
    }
}
