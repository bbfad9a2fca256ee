//! Permission values and sets.
//!
//! A permission key's value is sometimes a boolean and sometimes a record of
//! sub-flags. [`PermissionValue`] models that as a tagged variant so the
//! grant rule is a single match, not ad hoc type inspection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fine-grained sub-flags for a scoped permission key.
///
/// All fields are optional on the wire; absence means `false`. The wire
/// aliases (`visualizar`, `criar`, `editar`) match the upstream payloads
/// produced by the dashboard backend.
///
/// # Example
///
/// ```
/// use vigil_types::ScopedFlags;
///
/// let flags = ScopedFlags { view: false, create: true, edit: false };
/// assert!(flags.any());
///
/// assert!(!ScopedFlags::default().any());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopedFlags {
    /// Read access to the scoped resource.
    #[serde(alias = "visualizar")]
    pub view: bool,

    /// Create access to the scoped resource.
    #[serde(alias = "criar")]
    pub create: bool,

    /// Edit access to the scoped resource.
    #[serde(alias = "editar")]
    pub edit: bool,
}

impl ScopedFlags {
    /// Returns a record with every sub-flag set.
    #[must_use]
    pub fn all() -> Self {
        Self {
            view: true,
            create: true,
            edit: true,
        }
    }

    /// Returns `true` if at least one sub-flag is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.view || self.create || self.edit
    }
}

/// The value attached to a permission key.
///
/// Serialized untagged: plain JSON booleans deserialize as [`Bool`], objects
/// as [`Scoped`].
///
/// [`Bool`]: PermissionValue::Bool
/// [`Scoped`]: PermissionValue::Scoped
///
/// # Grant Rule
///
/// ```
/// use vigil_types::{PermissionValue, ScopedFlags};
///
/// assert!(PermissionValue::Bool(true).is_granted());
/// assert!(!PermissionValue::Bool(false).is_granted());
///
/// // A scoped value is granted when any sub-flag is true.
/// let partial = ScopedFlags { view: false, create: true, edit: false };
/// assert!(PermissionValue::Scoped(partial).is_granted());
/// assert!(!PermissionValue::Scoped(ScopedFlags::default()).is_granted());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionValue {
    /// Plain boolean grant.
    Bool(bool),

    /// Record of finer-grained sub-flags.
    Scoped(ScopedFlags),
}

impl PermissionValue {
    /// Returns `true` if this value grants access.
    ///
    /// Boolean values require strictly `true`; scoped values grant when any
    /// sub-flag is true.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Scoped(flags) => flags.any(),
        }
    }
}

impl From<bool> for PermissionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<ScopedFlags> for PermissionValue {
    fn from(flags: ScopedFlags) -> Self {
        Self::Scoped(flags)
    }
}

/// A mapping from permission keys to values.
///
/// All keys are optional: [`allows`](Self::allows) on an absent key returns
/// `false`, never an error.
///
/// # Example
///
/// ```
/// use vigil_types::{PermissionSet, ScopedFlags};
///
/// let set = PermissionSet::new()
///     .grant("notice", true)
///     .grant("pedidos", ScopedFlags { view: true, ..Default::default() });
///
/// assert!(set.allows("notice"));
/// assert!(set.allows("pedidos"));
/// assert!(!set.allows("dashboard")); // absent means not granted
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeMap<String, PermissionValue>);

impl PermissionSet {
    /// Creates an empty set (grants nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a grant, consuming and returning the set (builder style).
    #[must_use]
    pub fn grant(mut self, key: impl Into<String>, value: impl Into<PermissionValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PermissionValue> {
        self.0.get(key)
    }

    /// Returns `true` if the key resolves to a granting value.
    ///
    /// Absent keys are not granted.
    #[must_use]
    pub fn allows(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(PermissionValue::is_granted)
    }

    /// Returns the number of keys in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
