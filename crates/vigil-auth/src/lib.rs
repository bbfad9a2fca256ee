//! Access guard for permission-gated views.
//!
//! This crate answers one question: given the current identity snapshot and
//! a view's required permission key, what should be rendered?
//!
//! ```text
//! Identity provider ──► AccessGuard ──► GateState { Loading | Denied | Allowed }
//!                          │
//!                   AccessPolicy (trait)
//!                          │
//!                 RoleFallbackResolver
//!              (own permissions → role defaults → deny)
//! ```
//!
//! # Design Principles
//!
//! - **Fail closed** — missing users, absent keys, and unknown roles all
//!   resolve to [`GateState::Denied`]; no input panics
//! - **Pure decision** — the guard never mutates permissions and never
//!   triggers navigation; redirects are a collaborator's job
//! - **Trait at the seam** — [`AccessPolicy`] lets tests inject permissive
//!   or strict policies without a role table

pub mod guard;
pub mod resolver;

pub use guard::{AccessGuard, GateState};
pub use resolver::{AccessPolicy, RoleFallbackResolver};
