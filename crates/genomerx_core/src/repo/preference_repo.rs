//! Per-account theme preference map over the `grx_theme` payload.

use crate::model::account::normalize_email;
use crate::repo::{load_or_default, persist, RepoResult, StateStore};
use std::collections::BTreeMap;

const STATE_KEY: &str = "grx_theme";

/// Theme applied to accounts that never picked one.
pub const DEFAULT_THEME: &str = "light";

/// Persisted theme preference per account email.
pub struct PreferenceRepository<S: StateStore> {
    store: S,
    themes: BTreeMap<String, String>,
}

impl<S: StateStore> PreferenceRepository<S> {
    pub fn load(store: S) -> RepoResult<Self> {
        let themes = load_or_default(&store, STATE_KEY)?;
        Ok(Self { store, themes })
    }

    /// Returns the theme for one account, falling back to the default.
    pub fn theme(&self, email: &str) -> &str {
        self.themes
            .get(&normalize_email(email))
            .map(String::as_str)
            .unwrap_or(DEFAULT_THEME)
    }

    /// Stores the theme for one account and persists the map.
    pub fn set_theme(&mut self, email: &str, theme: impl Into<String>) -> RepoResult<()> {
        let mut next = self.themes.clone();
        next.insert(normalize_email(email), theme.into());
        persist(&self.store, STATE_KEY, &next)?;
        self.themes = next;
        Ok(())
    }
}
