//! Role fallback table.
//!
//! When a user carries no explicit permission set, the resolver falls back to
//! the defaults declared for the user's role. The table is read-only
//! reference data; unknown roles yield `None` so downstream code fails
//! closed.

use crate::PermissionSet;
use serde::{Deserialize, Serialize};

/// Default permissions declared for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefaults {
    /// Role name (e.g. `"admin"`, `"operator"`).
    pub role: String,

    /// Permissions granted to the role by default.
    pub permissions: PermissionSet,
}

/// Ordered list of role defaults, used only as a fallback source.
///
/// Lookup returns the first entry matching the role name, mirroring the
/// upstream declarative list where earlier entries win.
///
/// # Example
///
/// ```
/// use vigil_types::{PermissionSet, RoleTable};
///
/// let table = RoleTable::new()
///     .with_role("admin", PermissionSet::new().grant("dashboard", true));
///
/// assert!(table.defaults_for("admin").is_some());
/// assert!(table.defaults_for("visitor").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleTable(Vec<RoleDefaults>);

impl RoleTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a role entry, consuming and returning the table.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>, permissions: PermissionSet) -> Self {
        self.0.push(RoleDefaults {
            role: role.into(),
            permissions,
        });
        self
    }

    /// Returns the default permissions for a role, if declared.
    ///
    /// First matching entry wins; unknown roles return `None`.
    #[must_use]
    pub fn defaults_for(&self, role: &str) -> Option<&PermissionSet> {
        self.0
            .iter()
            .find(|entry| entry.role == role)
            .map(|entry| &entry.permissions)
    }

    /// Returns the number of declared roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no roles are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
