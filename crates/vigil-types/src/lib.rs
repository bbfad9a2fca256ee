//! Shared vocabulary for the vigil session core.
//!
//! This crate is the leaf of the workspace dependency graph. It defines the
//! permission model, the role fallback table, and the identity snapshot that
//! the other crates consume:
//!
//! ```text
//! vigil-types   (PermissionValue, PermissionSet, RoleTable, Identity)
//!     ↑                ↑
//! vigil-auth     vigil-session
//! (AccessGuard)  (IdleTimer, WarningCoordinator, ConfigService)
//! ```
//!
//! # Permission Model
//!
//! A permission key maps to a [`PermissionValue`], which is either a plain
//! boolean or a [`ScopedFlags`] record of finer-grained sub-flags:
//!
//! | Shape | Granted when |
//! |-------|--------------|
//! | `Bool(b)` | `b` is strictly `true` |
//! | `Scoped(f)` | **any** of `f.view`, `f.create`, `f.edit` is true |
//!
//! Absent keys are never an error — they resolve to "not granted".
//!
//! # Design Principles
//!
//! - **Fail closed** — every ambiguous or missing input resolves to denial
//! - **Value types** — identities and permission sets are immutable snapshots,
//!   cheap to clone and safe to share

pub mod error;
pub mod identity;
pub mod permission;
pub mod role;

pub use error::ErrorCode;
pub use identity::{Identity, User};
pub use permission::{PermissionSet, PermissionValue, ScopedFlags};
pub use role::{RoleDefaults, RoleTable};
