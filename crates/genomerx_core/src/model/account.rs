//! Account domain model and role taxonomy.
//!
//! # Responsibility
//! - Define the registered-account record and the fixed role set.
//! - Own email normalization and shape validation.
//!
//! # Invariants
//! - `email` is the only identity key; comparisons use the normalized form.
//! - `role` is fixed at registration; no mutation path exists in core.
//! - Accounts are never hard-deleted; `active = false` hides them from login.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Clinical roles recognized by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Doctor,
    Researcher,
    LabStaff,
}

impl Role {
    /// Stable string id used in persisted payloads and log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Researcher => "researcher",
            Self::LabStaff => "lab_staff",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one role from its stable string id.
pub fn parse_role(value: &str) -> Result<Role, RoleParseError> {
    match value.trim() {
        "admin" => Ok(Role::Admin),
        "doctor" => Ok(Role::Doctor),
        "researcher" => Ok(Role::Researcher),
        "lab_staff" => Ok(Role::LabStaff),
        other => Err(RoleParseError::UnknownRole(other.to_string())),
    }
}

/// Role parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    UnknownRole(String),
}

impl Display for RoleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRole(value) => write!(f, "unknown role: `{value}`"),
        }
    }
}

impl Error for RoleParseError {}

/// One registered account.
///
/// The password is an opaque secret for this core; hashing and transport
/// security are outside the session-store scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identity key, stored in normalized form.
    pub email: String,
    /// Display name shown by views and frozen into chat snapshots.
    pub name: String,
    /// Opaque secret compared verbatim on login.
    pub password: String,
    pub role: Role,
    /// Login/visibility eligibility toggle; deactivation is not deletion.
    pub active: bool,
}

impl Account {
    /// Creates an active account with a normalized email.
    pub fn new(
        name: impl Into<String>,
        email: &str,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: normalize_email(email),
            name: name.into(),
            password: password.into(),
            role,
            active: true,
        }
    }
}

/// Normalizes an email for identity comparison (trim + lowercase).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Returns whether the value has a plausible mailbox shape.
///
/// Intentionally loose: one `@`, non-empty local part, dotted domain. The
/// store is session-local, so this guards form input, not deliverability.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, normalize_email, parse_role, Role, RoleParseError};

    #[test]
    fn role_string_ids_round_trip() {
        for role in [Role::Admin, Role::Doctor, Role::Researcher, Role::LabStaff] {
            assert_eq!(parse_role(role.as_str()).expect("role parse"), role);
        }
    }

    #[test]
    fn parse_role_rejects_unknown_values() {
        let err = parse_role("superuser").expect_err("unknown role must fail");
        assert_eq!(err, RoleParseError::UnknownRole("superuser".to_string()));
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Lab1@X.Com "), "lab1@x.com");
    }

    #[test]
    fn email_shape_check_accepts_plain_mailboxes_and_rejects_garbage() {
        assert!(is_valid_email("doctor@genomerx.io"));
        assert!(is_valid_email(" lab1@x.com "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("@x.com"));
    }
}
