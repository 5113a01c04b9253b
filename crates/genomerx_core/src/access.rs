//! Capability declarations and role/ownership authorization checks.
//!
//! # Responsibility
//! - Provide the single pure `{role, ownership} -> allowed/denied` layer
//!   consulted by both views (to hide controls) and service entry points
//!   (to reject calls that bypass the view).
//!
//! # Invariants
//! - Checks are pure functions of the actor and target; no store access.
//! - Page-level gates deny before any query runs; row-level checks decide
//!   per entity.

use crate::model::account::{normalize_email, Account, Role};
use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Role-gated capability for page-level access decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Reset passwords and toggle account activation.
    ManageAccounts,
    /// Enter the calendar component at all.
    AccessCalendar,
    /// Create tasks on the board.
    CreateTasks,
}

impl Capability {
    /// Stable string id used in log events and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManageAccounts => "manage_accounts",
            Self::AccessCalendar => "access_calendar",
            Self::CreateTasks => "create_tasks",
        }
    }
}

/// Roles permitted to enter the calendar component.
pub const CALENDAR_ROLES: &[Role] = &[Role::Admin, Role::Doctor, Role::Researcher];

/// Returns whether `role` carries the given capability.
pub fn role_allows(role: Role, capability: Capability) -> bool {
    match capability {
        Capability::ManageAccounts => role == Role::Admin,
        Capability::AccessCalendar => CALENDAR_ROLES.contains(&role),
        Capability::CreateTasks => role != Role::LabStaff,
    }
}

/// Guard form of [`role_allows`] for service entry points.
pub fn assert_capability(actor: &Account, capability: Capability) -> Result<(), AccessError> {
    if role_allows(actor.role, capability) {
        Ok(())
    } else {
        Err(AccessError::CapabilityDenied {
            role: actor.role,
            capability,
        })
    }
}

/// Returns whether `actor` may see `task` on the board.
///
/// Lab Staff sees only tasks assigned to itself; every other role sees the
/// full set.
pub fn can_view_task(actor: &Account, task: &Task) -> bool {
    actor.role != Role::LabStaff || same_email(&task.assignee, &actor.email)
}

/// Returns whether `actor` may fully edit or delete `task`.
pub fn can_edit_task(actor: &Account, task: &Task) -> bool {
    actor.role == Role::Admin || same_email(&task.created_by, &actor.email)
}

/// Returns whether `actor` may change the status of `task`.
///
/// The assignee is self-service here, on top of the full-edit holders.
pub fn can_set_task_status(actor: &Account, task: &Task) -> bool {
    can_edit_task(actor, task) || same_email(&task.assignee, &actor.email)
}

/// Returns whether `account` is eligible as a task assignee.
///
/// Consulted by the creation view when it builds the assignee picker; the
/// store itself does not re-check this at write time.
pub fn is_assignable(account: &Account) -> bool {
    account.active && account.role == Role::LabStaff
}

fn same_email(a: &str, b: &str) -> bool {
    normalize_email(a) == normalize_email(b)
}

/// Authorization failure raised by service entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The actor's role lacks a page-level capability.
    CapabilityDenied { role: Role, capability: Capability },
    /// The actor is neither owner nor otherwise permitted on the entity.
    NotAuthorized,
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapabilityDenied { role, capability } => {
                write!(
                    f,
                    "role `{role}` is not permitted to {}",
                    capability.as_str()
                )
            }
            Self::NotAuthorized => write!(f, "actor is not authorized for this action"),
        }
    }
}

impl Error for AccessError {}
