//! Task board use-case service.
//!
//! # Responsibility
//! - Apply the hard role-visibility filter before any query filter.
//! - Enforce create/update/delete permissions at the mutation entry point,
//!   mirroring the pure checks views use to hide controls.
//!
//! # Invariants
//! - A Lab Staff caller never receives a task assigned to someone else.
//! - Status transitions carry no ordering rule; any status is settable.
//! - `updated_at` is re-stamped on every successful mutation.

use crate::access::{
    assert_capability, can_edit_task, can_set_task_status, can_view_task, AccessError, Capability,
};
use crate::model::account::{normalize_email, Account};
use crate::model::task::{Task, TaskId, TaskPriority, TaskStatus};
use crate::repo::task_repo::TaskRepository;
use crate::repo::{RepoError, StateStore};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Task board error taxonomy.
#[derive(Debug)]
pub enum TaskBoardError {
    /// Create/update produced an empty title.
    EmptyTitle,
    /// Create produced an empty assignee reference.
    MissingAssignee,
    /// Actor lacks the capability or ownership for the call.
    Denied(AccessError),
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskBoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::MissingAssignee => write!(f, "task assignee must not be empty"),
            Self::Denied(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskBoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Denied(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AccessError> for TaskBoardError {
    fn from(value: AccessError) -> Self {
        Self::Denied(value)
    }
}

impl From<RepoError> for TaskBoardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Request model for creating one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// Assignee account email; eligibility is the creation view's concern.
    pub assignee: String,
    pub priority: TaskPriority,
    pub due: Option<NaiveDate>,
}

/// Partial update for one task; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<TaskPriority>,
    /// Outer `None` leaves the due date unchanged; `Some(None)` clears it.
    pub due: Option<Option<NaiveDate>>,
    pub status: Option<TaskStatus>,
}

/// Optional query filters applied after the role-visibility filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    pub assignee: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Task board facade over the task repository.
pub struct TaskBoard<S: StateStore> {
    repo: TaskRepository<S>,
}

impl<S: StateStore> TaskBoard<S> {
    pub fn new(repo: TaskRepository<S>) -> Self {
        Self { repo }
    }

    /// Lists tasks visible to `actor`, then applies the query filters.
    pub fn list(&self, actor: &Account, query: &TaskListQuery) -> Vec<Task> {
        let assignee_filter = query.assignee.as_deref().map(normalize_email);
        self.repo
            .all()
            .iter()
            .filter(|task| can_view_task(actor, task))
            .filter(|task| {
                assignee_filter
                    .as_ref()
                    .map_or(true, |wanted| &normalize_email(&task.assignee) == wanted)
            })
            .filter(|task| query.status.map_or(true, |wanted| task.status == wanted))
            .cloned()
            .collect()
    }

    /// Returns one visible task by id.
    pub fn get(&self, actor: &Account, id: TaskId) -> Option<Task> {
        self.repo
            .get(id)
            .filter(|task| can_view_task(actor, task))
            .cloned()
    }

    /// Creates a pending task owned by `actor`.
    pub fn create(
        &mut self,
        actor: &Account,
        draft: TaskDraft,
        now_ms: i64,
    ) -> Result<Task, TaskBoardError> {
        assert_capability(actor, Capability::CreateTasks)?;
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(TaskBoardError::EmptyTitle);
        }
        if draft.assignee.trim().is_empty() {
            return Err(TaskBoardError::MissingAssignee);
        }

        let task = Task {
            id: Uuid::new_v4(),
            title,
            description: draft.description,
            assignee: normalize_email(&draft.assignee),
            priority: draft.priority,
            due: draft.due,
            status: TaskStatus::Pending,
            created_by: actor.email.clone(),
            created_at: now_ms,
            updated_at: now_ms,
        };
        self.repo.insert(task.clone())?;
        Ok(task)
    }

    /// Applies a full edit; permitted for an Admin or the creator.
    pub fn update(
        &mut self,
        actor: &Account,
        id: TaskId,
        patch: TaskPatch,
        now_ms: i64,
    ) -> Result<Task, TaskBoardError> {
        let existing = self
            .repo
            .get(id)
            .ok_or(TaskBoardError::TaskNotFound(id))?;
        if !can_edit_task(actor, existing) {
            return Err(TaskBoardError::Denied(AccessError::NotAuthorized));
        }
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(TaskBoardError::EmptyTitle);
            }
        }

        let updated = self.repo.update(id, |task| {
            if let Some(title) = patch.title {
                task.title = title.trim().to_string();
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(assignee) = patch.assignee {
                task.assignee = normalize_email(&assignee);
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(due) = patch.due {
                task.due = due;
            }
            if let Some(status) = patch.status {
                task.status = status;
            }
            task.updated_at = now_ms;
        })?;
        Ok(updated)
    }

    /// Sets the status; the assignee is permitted in addition to editors.
    pub fn set_status(
        &mut self,
        actor: &Account,
        id: TaskId,
        status: TaskStatus,
        now_ms: i64,
    ) -> Result<Task, TaskBoardError> {
        let existing = self
            .repo
            .get(id)
            .ok_or(TaskBoardError::TaskNotFound(id))?;
        if !can_set_task_status(actor, existing) {
            return Err(TaskBoardError::Denied(AccessError::NotAuthorized));
        }

        let updated = self.repo.update(id, |task| {
            task.status = status;
            task.updated_at = now_ms;
        })?;
        Ok(updated)
    }

    /// Deletes one task; same permission rule as [`Self::update`].
    pub fn delete(&mut self, actor: &Account, id: TaskId) -> Result<(), TaskBoardError> {
        let existing = self
            .repo
            .get(id)
            .ok_or(TaskBoardError::TaskNotFound(id))?;
        if !can_edit_task(actor, existing) {
            return Err(TaskBoardError::Denied(AccessError::NotAuthorized));
        }
        self.repo.remove(id)?;
        Ok(())
    }
}
