//! Task domain model.
//!
//! # Responsibility
//! - Define the assignable work-item record shared by board views.
//! - Provide the overdue predicate used by list rendering.
//!
//! # Invariants
//! - `id` is generation-time unique and never reused.
//! - Status transitions are unrestricted; any status is settable in any order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Task urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

/// One assignable work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Assignee account email, resolved through the identity store.
    pub assignee: String,
    pub priority: TaskPriority,
    /// Optional due date; `None` means no deadline.
    pub due: Option<NaiveDate>,
    pub status: TaskStatus,
    /// Creator account email; ownership anchor for edit/delete permission.
    pub created_by: String,
    /// Creation instant in epoch milliseconds.
    pub created_at: i64,
    /// Last-mutation instant in epoch milliseconds.
    pub updated_at: i64,
}

impl Task {
    /// Returns whether this task is past due as of `today`.
    ///
    /// Done tasks and tasks without a due date are never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Done && self.due.is_some_and(|due| due < today)
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskPriority, TaskStatus};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn task_with(due: Option<NaiveDate>, status: TaskStatus) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Sequence QC".to_string(),
            description: String::new(),
            assignee: "lab1@x.com".to_string(),
            priority: TaskPriority::High,
            due,
            status,
            created_by: "admin@x.com".to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
    }

    #[test]
    fn overdue_requires_past_due_date_and_unfinished_status() {
        let today = date("2025-03-02");
        assert!(task_with(Some(date("2025-03-01")), TaskStatus::Pending).is_overdue(today));
        assert!(task_with(Some(date("2025-03-01")), TaskStatus::InProgress).is_overdue(today));
        assert!(!task_with(Some(date("2025-03-01")), TaskStatus::Done).is_overdue(today));
        assert!(!task_with(Some(date("2025-03-02")), TaskStatus::Pending).is_overdue(today));
        assert!(!task_with(None, TaskStatus::Pending).is_overdue(today));
    }
}
