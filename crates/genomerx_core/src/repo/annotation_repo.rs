//! Annotation repository over the persisted `grx_notes` payload.
//!
//! # Invariants
//! - One entry per composite key; a save replaces the entry in full.
//! - Reads never fail; unknown keys yield the empty default.

use crate::model::annotation::AnnotationEntry;
use crate::repo::{load_or_default, persist, RepoResult, StateStore};
use std::collections::BTreeMap;

const STATE_KEY: &str = "grx_notes";

/// Persisted notes/tags map keyed by `fileName::date`.
pub struct AnnotationRepository<S: StateStore> {
    store: S,
    entries: BTreeMap<String, AnnotationEntry>,
}

impl<S: StateStore> AnnotationRepository<S> {
    pub fn load(store: S) -> RepoResult<Self> {
        let entries = load_or_default(&store, STATE_KEY)?;
        Ok(Self { store, entries })
    }

    /// Returns the entry for `key`, or the empty default.
    pub fn get(&self, key: &str) -> AnnotationEntry {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    /// Replaces the entry for `key` and persists the map.
    pub fn put(&mut self, key: &str, entry: AnnotationEntry) -> RepoResult<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), entry);
        persist(&self.store, STATE_KEY, &next)?;
        self.entries = next;
        Ok(())
    }
}
