//! Gate rendering decision.
//!
//! [`AccessGuard`] maps an identity snapshot plus a view's required
//! permission key onto one of three render states. The decision is
//! recomputed on every call from current inputs; there are no persisted
//! transitions.

use crate::AccessPolicy;
use vigil_types::Identity;

/// What a protected view should render.
///
/// # Example
///
/// ```
/// use vigil_auth::GateState;
///
/// let state = GateState::Allowed;
/// assert!(state.is_allowed());
/// assert_eq!(state.status_str(), "allowed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Identity not yet resolved; render a neutral loading indicator.
    Loading,

    /// No session or insufficient permission; render the denied view.
    Denied,

    /// Render the protected content.
    Allowed,
}

impl GateState {
    /// Returns `true` if the identity is still resolving.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns `true` if access was denied.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }

    /// Returns `true` if the protected content may render.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns the state as a string ("loading", "denied", "allowed").
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Denied => "denied",
            Self::Allowed => "allowed",
        }
    }
}

/// Gates a subtree behind an optional required permission key.
///
/// Generic over [`AccessPolicy`] so resolution rules are injectable.
///
/// # Decision Order
///
/// 1. `loading` → [`GateState::Loading`], no access decision is made
/// 2. no user → [`GateState::Denied`], even with no required key
/// 3. no required key, or the policy grants it → [`GateState::Allowed`]
/// 4. otherwise → [`GateState::Denied`]
///
/// # Example
///
/// ```
/// use vigil_auth::{AccessGuard, GateState, RoleFallbackResolver};
/// use vigil_types::{Identity, PermissionSet, RoleTable, User};
///
/// let guard = AccessGuard::new(RoleFallbackResolver::new(RoleTable::new()));
///
/// let user = User::new("admin")
///     .with_permissions(PermissionSet::new().grant("notice", true));
///
/// let state = guard.evaluate(&Identity::resolved(user), Some("notice"));
/// assert_eq!(state, GateState::Allowed);
///
/// let state = guard.evaluate(&Identity::anonymous(), Some("notice"));
/// assert_eq!(state, GateState::Denied);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessGuard<P> {
    policy: P,
}

impl<P: AccessPolicy> AccessGuard<P> {
    /// Creates a guard over a policy.
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    /// Returns a reference to the underlying policy.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Computes the render state for the current inputs.
    ///
    /// `required` absent means the view needs only an authenticated user.
    /// Never panics; malformed or missing permission data resolves to
    /// [`GateState::Denied`].
    #[must_use]
    pub fn evaluate(&self, identity: &Identity, required: Option<&str>) -> GateState {
        if identity.loading {
            return GateState::Loading;
        }

        let Some(user) = &identity.user else {
            return GateState::Denied;
        };

        match required {
            None => GateState::Allowed,
            Some(key) if self.policy.can_access(user, key) => GateState::Allowed,
            Some(_) => GateState::Denied,
        }
    }
}
