//! Task repository over the persisted `grx_tasks` payload.
//!
//! # Invariants
//! - Mutations commit the full replacement collection before the swap.
//! - Insertion order is preserved; board-level sorting is a view concern.

use crate::model::task::{Task, TaskId};
use crate::repo::{load_or_default, persist, RepoError, RepoResult, StateStore};

const STATE_KEY: &str = "grx_tasks";

/// Persisted task collection.
pub struct TaskRepository<S: StateStore> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: StateStore> TaskRepository<S> {
    pub fn load(store: S) -> RepoResult<Self> {
        let tasks = load_or_default(&store, STATE_KEY)?;
        Ok(Self { store, tasks })
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn insert(&mut self, task: Task) -> RepoResult<()> {
        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next)
    }

    /// Mutates one task in place and persists; returns the updated copy.
    pub fn update(&mut self, id: TaskId, mutate: impl FnOnce(&mut Task)) -> RepoResult<Task> {
        let mut next = self.tasks.clone();
        let index = next
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| not_found(id))?;
        mutate(&mut next[index]);
        let updated = next[index].clone();
        self.commit(next)?;
        Ok(updated)
    }

    pub fn remove(&mut self, id: TaskId) -> RepoResult<()> {
        let mut next = self.tasks.clone();
        let before = next.len();
        next.retain(|task| task.id != id);
        if next.len() == before {
            return Err(not_found(id));
        }
        self.commit(next)
    }

    fn commit(&mut self, next: Vec<Task>) -> RepoResult<()> {
        persist(&self.store, STATE_KEY, &next)?;
        self.tasks = next;
        Ok(())
    }
}

fn not_found(id: TaskId) -> RepoError {
    RepoError::NotFound {
        entity: "task",
        id: id.to_string(),
    }
}
