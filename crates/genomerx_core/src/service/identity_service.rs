//! Identity use-case service: registration, login, profile and admin ops.
//!
//! # Responsibility
//! - Enforce registration/credential rules in front of the account repo.
//! - Drive the session-local lockout machine on authentication.
//! - Gate the admin-only operations behind the capability layer.
//!
//! # Invariants
//! - Only `InvalidCredentials` outcomes advance the lockout counter.
//! - A locked session rejects every attempt until expiry, correct password
//!   included.
//! - Accounts are never hard-deleted; admin deactivation flips `active`.

use crate::access::{assert_capability, AccessError, Capability};
use crate::model::account::{is_valid_email, normalize_email, Account, Role};
use crate::model::session::Session;
use crate::repo::identity_repo::AccountRepository;
use crate::repo::{RepoError, RepoResult, StateStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Fixed value installed by the admin password reset.
pub const RECOVERY_PASSWORD: &str = "reset123";

/// Identity/session error taxonomy.
#[derive(Debug)]
pub enum IdentityError {
    /// Registration email already present.
    DuplicateEmail(String),
    /// Registration email fails the shape check.
    InvalidEmail(String),
    /// Password shorter than [`MIN_PASSWORD_LEN`].
    WeakPassword,
    /// No active-account/password match; advances the lockout counter.
    InvalidCredentials,
    /// Email matched but the account is deactivated.
    AccountDeactivated,
    /// Session is locked; no attempt is evaluated until `until_ms`.
    LockedOut { until_ms: i64 },
    /// `change_password` current-secret mismatch.
    WrongCurrentPassword,
    /// `change_password` new/confirm mismatch.
    PasswordMismatch,
    /// Profile/admin target email is unknown.
    AccountNotFound(String),
    /// Capability check failed.
    Denied(AccessError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => write!(f, "email already registered: {email}"),
            Self::InvalidEmail(email) => write!(f, "invalid email address: `{email}`"),
            Self::WeakPassword => {
                write!(f, "password must be at least {MIN_PASSWORD_LEN} characters")
            }
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::AccountDeactivated => write!(f, "account is deactivated"),
            Self::LockedOut { until_ms } => {
                write!(f, "too many failed attempts; locked until {until_ms}")
            }
            Self::WrongCurrentPassword => write!(f, "current password is incorrect"),
            Self::PasswordMismatch => write!(f, "new password and confirmation do not match"),
            Self::AccountNotFound(email) => write!(f, "account not found: {email}"),
            Self::Denied(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IdentityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Denied(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AccessError> for IdentityError {
    fn from(value: AccessError) -> Self {
        Self::Denied(value)
    }
}

impl From<RepoError> for IdentityError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::AccountNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Identity store facade over the account repository.
pub struct IdentityService<S: StateStore> {
    accounts: AccountRepository<S>,
}

impl<S: StateStore> IdentityService<S> {
    pub fn new(accounts: AccountRepository<S>) -> Self {
        Self { accounts }
    }

    /// Read access for views (admin roster, assignee pickers, name lookups).
    pub fn directory(&self) -> &[Account] {
        self.accounts.accounts()
    }

    /// Finds one account by email, normalized.
    pub fn find(&self, email: &str) -> Option<&Account> {
        self.accounts.find(email)
    }

    /// Registers a new active account.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, IdentityError> {
        if !is_valid_email(email) {
            return Err(IdentityError::InvalidEmail(email.trim().to_string()));
        }
        if self.accounts.contains(email) {
            return Err(IdentityError::DuplicateEmail(normalize_email(email)));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(IdentityError::WeakPassword);
        }

        let account = Account::new(name.trim(), email, password, role);
        self.accounts.insert(account.clone())?;
        info!(
            "event=account_register module=identity status=ok role={}",
            account.role
        );
        Ok(account)
    }

    /// Authenticates against the roster, driving the session lockout.
    ///
    /// `now_ms` is the caller's current instant; the lockout window and
    /// expiry are evaluated against it.
    pub fn authenticate(
        &self,
        session: &mut Session,
        email: &str,
        password: &str,
        now_ms: i64,
    ) -> Result<Account, IdentityError> {
        session.lockout = session.lockout.refreshed(now_ms);
        if let Some(until_ms) = session.lockout.locked_until() {
            return Err(IdentityError::LockedOut { until_ms });
        }

        match self.accounts.find(email) {
            Some(account) if account.password == password => {
                if !account.active {
                    return Err(IdentityError::AccountDeactivated);
                }
                session.lockout = session.lockout.register_success();
                session.current = Some(account.clone());
                Ok(account.clone())
            }
            _ => {
                session.lockout = session.lockout.register_failure(now_ms);
                if session.lockout.is_locked(now_ms) {
                    warn!("event=login_lockout module=identity status=locked");
                }
                Err(IdentityError::InvalidCredentials)
            }
        }
    }

    /// Renames one account.
    pub fn update_profile(
        &mut self,
        email: &str,
        new_name: &str,
    ) -> Result<Account, IdentityError> {
        let updated = self
            .accounts
            .update(email, |account| account.name = new_name.trim().to_string())?;
        Ok(updated)
    }

    /// Overwrites the stored secret after the usual checks.
    pub fn change_password(
        &mut self,
        email: &str,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), IdentityError> {
        let account = self
            .accounts
            .find(email)
            .ok_or_else(|| IdentityError::AccountNotFound(normalize_email(email)))?;
        if account.password != current {
            return Err(IdentityError::WrongCurrentPassword);
        }
        if new.len() < MIN_PASSWORD_LEN {
            return Err(IdentityError::WeakPassword);
        }
        if new != confirm {
            return Err(IdentityError::PasswordMismatch);
        }

        self.accounts
            .update(email, |account| account.password = new.to_string())?;
        Ok(())
    }

    /// Admin-only: sets the password to the fixed recovery value.
    pub fn reset_password(&mut self, actor: &Account, email: &str) -> Result<(), IdentityError> {
        assert_capability(actor, Capability::ManageAccounts)?;
        self.accounts
            .update(email, |account| {
                account.password = RECOVERY_PASSWORD.to_string()
            })?;
        info!("event=password_reset module=identity status=ok");
        Ok(())
    }

    /// Admin-only: toggles login eligibility.
    pub fn set_active(
        &mut self,
        actor: &Account,
        email: &str,
        active: bool,
    ) -> Result<Account, IdentityError> {
        assert_capability(actor, Capability::ManageAccounts)?;
        let updated = self.accounts.update(email, |account| account.active = active)?;
        Ok(updated)
    }

    /// Installs the demo roster when the store is empty ("seeded at first
    /// run"); returns whether seeding happened.
    pub fn seed_defaults(&mut self) -> RepoResult<bool> {
        if !self.accounts.is_empty() {
            return Ok(false);
        }

        for (name, email, role) in [
            ("Admin", "admin@genomerx.io", Role::Admin),
            ("Dr. Adaeze Obi", "doctor@genomerx.io", Role::Doctor),
            ("Riya Sharma", "researcher@genomerx.io", Role::Researcher),
            ("Lab One", "lab1@genomerx.io", Role::LabStaff),
        ] {
            self.accounts
                .insert(Account::new(name, email, "genome123", role))?;
        }
        info!("event=account_seed module=identity status=ok count=4");
        Ok(true)
    }
}
