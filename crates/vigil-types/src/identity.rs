//! Identity snapshots from the external session provider.

use crate::PermissionSet;
use serde::{Deserialize, Serialize};

/// An authenticated user as reported by the identity provider.
///
/// The permission set is optional: users without one fall back to their
/// role's declared defaults during resolution.
///
/// # Why No Default?
///
/// **DO NOT implement `Default` for User.** A user requires a role; there is
/// no sensible default identity. Construct with [`User::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's role name.
    pub role: String,

    /// Explicit permission set, if the identity carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

impl User {
    /// Creates a user with a role and no explicit permissions.
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            permissions: None,
        }
    }

    /// Attaches an explicit permission set, consuming and returning the user.
    #[must_use]
    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = Some(permissions);
        self
    }
}

/// Snapshot of the identity provider's `{ user, loading }` contract.
///
/// # Example
///
/// ```
/// use vigil_types::{Identity, User};
///
/// let loading = Identity::loading();
/// assert!(loading.is_loading());
///
/// let resolved = Identity::resolved(User::new("admin"));
/// assert!(!resolved.is_loading());
/// assert!(resolved.user.is_some());
///
/// let anonymous = Identity::anonymous();
/// assert!(anonymous.user.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The authenticated user, or `None` when no session is active.
    pub user: Option<User>,

    /// `true` while the provider has not yet resolved the session.
    pub loading: bool,
}

impl Identity {
    /// Identity still being resolved by the provider.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// Resolved identity with no active session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// Resolved identity for an authenticated user.
    #[must_use]
    pub fn resolved(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// Returns `true` while the provider is still resolving.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_has_no_user() {
        let identity = Identity::loading();
        assert!(identity.is_loading());
        assert!(identity.user.is_none());
    }

    #[test]
    fn resolved_carries_user() {
        let identity = Identity::resolved(User::new("admin"));
        assert!(!identity.is_loading());
        assert_eq!(identity.user.expect("user present").role, "admin");
    }

    #[test]
    fn user_permissions_optional_on_wire() {
        let user: User = serde_json::from_str(r#"{ "role": "operator" }"#).expect("bare user");
        assert!(user.permissions.is_none());

        let user: User =
            serde_json::from_str(r#"{ "role": "operator", "permissions": { "notice": true } }"#)
                .expect("user with permissions");
        assert!(user.permissions.expect("set present").allows("notice"));
    }
}
