//! Permission resolution policy.
//!
//! [`AccessPolicy`] is the abstract seam; [`RoleFallbackResolver`] is the
//! concrete policy implementing the resolution order:
//!
//! ```text
//! user.permissions (if present)
//!        │ else
//! role_table.defaults_for(user.role)
//!        │ else
//!      deny
//! ```
//!
//! Whichever source wins, the key's [`PermissionValue`] grant rule decides:
//! scoped values grant on any sub-flag, boolean values require strictly
//! `true`, absent keys deny.
//!
//! [`PermissionValue`]: vigil_types::PermissionValue

use vigil_types::{PermissionSet, RoleTable, User};

/// Abstract access policy for a single permission key.
///
/// Implement this to swap resolution rules in tests or restricted
/// deployments.
///
/// # Example
///
/// ```
/// use vigil_auth::AccessPolicy;
/// use vigil_types::User;
///
/// struct Permissive;
///
/// impl AccessPolicy for Permissive {
///     fn can_access(&self, _user: &User, _key: &str) -> bool {
///         true
///     }
/// }
///
/// let user = User::new("visitor");
/// assert!(Permissive.can_access(&user, "dashboard"));
/// ```
pub trait AccessPolicy: Send + Sync {
    /// Returns `true` if the user may access the capability behind `key`.
    ///
    /// Must fail closed: any missing or malformed input denies, never
    /// panics.
    fn can_access(&self, user: &User, key: &str) -> bool;
}

/// Default policy: explicit permissions first, role defaults as fallback.
///
/// # Example
///
/// ```
/// use vigil_auth::{AccessPolicy, RoleFallbackResolver};
/// use vigil_types::{PermissionSet, RoleTable, User};
///
/// let table = RoleTable::new()
///     .with_role("operator", PermissionSet::new().grant("notice", true));
/// let resolver = RoleFallbackResolver::new(table);
///
/// // No explicit permissions: role defaults apply.
/// let user = User::new("operator");
/// assert!(resolver.can_access(&user, "notice"));
///
/// // Explicit permissions replace the defaults entirely.
/// let user = User::new("operator")
///     .with_permissions(PermissionSet::new().grant("notice", false));
/// assert!(!resolver.can_access(&user, "notice"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoleFallbackResolver {
    table: RoleTable,
}

impl RoleFallbackResolver {
    /// Creates a resolver over a role fallback table.
    #[must_use]
    pub fn new(table: RoleTable) -> Self {
        Self { table }
    }

    /// Returns the effective permission source for a user.
    ///
    /// The user's own set wins; otherwise the role's declared defaults.
    /// `None` means there is no source at all and access must be denied.
    #[must_use]
    pub fn effective<'a>(&'a self, user: &'a User) -> Option<&'a PermissionSet> {
        user.permissions
            .as_ref()
            .or_else(|| self.table.defaults_for(&user.role))
    }
}

impl AccessPolicy for RoleFallbackResolver {
    fn can_access(&self, user: &User, key: &str) -> bool {
        let Some(source) = self.effective(user) else {
            tracing::debug!(role = %user.role, key, "no permission source; denying");
            return false;
        };

        let granted = source.allows(key);
        if !granted {
            tracing::debug!(role = %user.role, key, "permission denied");
        }
        granted
    }
}
