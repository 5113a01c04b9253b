//! Annotation use-case service.
//!
//! # Invariants
//! - `get` never fails; unknown keys yield the empty default entry.
//! - `save` normalizes tags and replaces the entry atomically; repeating
//!   an identical save is a no-op in effect.

use crate::model::annotation::{normalize_tags, AnnotationEntry};
use crate::repo::annotation_repo::AnnotationRepository;
use crate::repo::{RepoResult, StateStore};

/// Notes/tags facade over the annotation repository.
pub struct AnnotationService<S: StateStore> {
    repo: AnnotationRepository<S>,
}

impl<S: StateStore> AnnotationService<S> {
    pub fn new(repo: AnnotationRepository<S>) -> Self {
        Self { repo }
    }

    /// Returns the entry for `key`, or an empty default.
    pub fn get(&self, key: &str) -> AnnotationEntry {
        self.repo.get(key)
    }

    /// Normalizes and stores the entry for `key`, replacing any previous one.
    pub fn save<I, T>(&mut self, key: &str, notes: &str, tags: I) -> RepoResult<AnnotationEntry>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let entry = AnnotationEntry {
            notes: notes.to_string(),
            tags: normalize_tags(tags),
        };
        self.repo.put(key, entry.clone())?;
        Ok(entry)
    }
}
