//! # Principal & Role Value Objects
//!
//! Read-only descriptions of an authenticated user and the roles it holds,
//! plus the contract fixtures use to act as a different user.

use crate::FacetworkError;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard, PoisonError};

// =============================================================================
// ROLE
// =============================================================================

/// A named role. Equality and hashing use the name only.
#[derive(Debug, Clone, Serialize)]
pub struct RoleMemento {
    name: String,
    description: String,
}

impl RoleMemento {
    /// Create a role with no description.
    pub fn new(name: impl Into<String>) -> Result<Self, FacetworkError> {
        Self::with_description(name, "")
    }

    /// Create a role with a description.
    pub fn with_description(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, FacetworkError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FacetworkError::InvalidArgument(
                "Name not specified".to_string(),
            ));
        }
        Ok(Self {
            name,
            description: description.into(),
        })
    }

    /// The role name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The role description (possibly empty).
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Title shown for this role.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.name
    }
}

impl PartialEq for RoleMemento {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for RoleMemento {}

impl Hash for RoleMemento {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// =============================================================================
// USER
// =============================================================================

/// A user and the roles it holds.
///
/// Roles keep their insertion order and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMemento {
    name: String,
    roles: Vec<RoleMemento>,
}

impl UserMemento {
    /// Create a user with no roles.
    pub fn new(name: impl Into<String>) -> Result<Self, FacetworkError> {
        Self::with_roles(name, Vec::new())
    }

    /// Create a user with roles.
    ///
    /// Fails with `InvalidArgument` if the name is empty.
    pub fn with_roles(
        name: impl Into<String>,
        roles: impl IntoIterator<Item = RoleMemento>,
    ) -> Result<Self, FacetworkError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FacetworkError::InvalidArgument(
                "Name not specified".to_string(),
            ));
        }
        Ok(Self {
            name,
            roles: roles.into_iter().collect(),
        })
    }

    /// The login name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title shown for this user.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.name
    }

    /// The roles, in the order given.
    #[must_use]
    pub fn roles(&self) -> &[RoleMemento] {
        &self.roles
    }

    /// Check if the user holds `role` (compared by name).
    #[must_use]
    pub fn has_role(&self, role: &RoleMemento) -> bool {
        self.has_role_named(role.name())
    }

    /// Check if the user holds a role with exactly this name (case-sensitive).
    #[must_use]
    pub fn has_role_named(&self, role_name: &str) -> bool {
        self.roles.iter().any(|role| role.name() == role_name)
    }

    /// Check if `user` names this user (case-sensitive).
    ///
    /// Fails with `IllegalState` when no user is given.
    pub fn is_current_user(&self, user: Option<&str>) -> Result<bool, FacetworkError> {
        match user {
            Some(user) => Ok(self.name == user),
            None => Err(FacetworkError::IllegalState(
                "no user specified".to_string(),
            )),
        }
    }
}

impl fmt::Display for UserMemento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User [name={},roles=", self.name)?;
        for role in &self.roles {
            write!(f, "{} ", role.name())?;
        }
        f.write_str("]")
    }
}

// =============================================================================
// SWITCH USER
// =============================================================================

/// Lets fixtures run as a different user.
pub trait SwitchUserService: Send + Sync {
    /// Make `username` with `roles` the current user.
    fn switch_user(&self, username: &str, roles: &[&str]) -> Result<(), FacetworkError>;
}

/// In-memory switch-user service holding the current user.
#[derive(Debug, Default)]
pub struct FixtureUserSwitcher {
    current: Mutex<Option<UserMemento>>,
}

impl FixtureUserSwitcher {
    /// Create a switcher with no current user.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn current_slot(&self) -> MutexGuard<'_, Option<UserMemento>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The user most recently switched to.
    #[must_use]
    pub fn current_user(&self) -> Option<UserMemento> {
        self.current_slot().clone()
    }
}

impl SwitchUserService for FixtureUserSwitcher {
    fn switch_user(&self, username: &str, roles: &[&str]) -> Result<(), FacetworkError> {
        let roles = roles
            .iter()
            .map(|role| RoleMemento::new(*role))
            .collect::<Result<Vec<_>, _>>()?;
        let user = UserMemento::with_roles(username, roles)?;
        tracing::info!(user = %user, "switched user");
        *self.current_slot() = Some(user);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
