//! Session-timeout core: idle tracking, pre-expiry warning, configuration.
//!
//! Three pieces compose per authenticated shell instance:
//!
//! ```text
//! activity events ──► IdleTimer ──► WarningCoordinator ──► alert renderer (external)
//!                        │ (1 Hz ticks via SessionRunner)
//!                        └──► expiry callback (exactly once per idle episode)
//! ```
//!
//! - [`IdleTimer`] tracks wall-clock time since the last activity against a
//!   configurable window and fires expiry exactly once per idle episode
//! - [`WarningCoordinator`] thresholds the countdown into a UI alert signal
//!   and hosts transient auto-dismissing banners
//! - [`ConfigService`] persists the warning/banner configuration through a
//!   pluggable [`ConfigStore`] (in-memory for tests, JSON files otherwise),
//!   treating malformed data as "use defaults"
//! - [`SessionRunner`] drives the 1 Hz tick cadence and the activity event
//!   stream on a tokio task, publishing [`SessionSnapshot`]s
//!
//! # Time
//!
//! All temporal state is monotonic [`std::time::Instant`] arithmetic behind
//! the [`Clock`] seam. Remaining time is recomputed from the elapsed delta on
//! every tick, never decremented, so suspended or throttled ticks can only
//! over-count idle time — the safe direction.

pub mod clock;
pub mod config;
pub mod error;
pub mod idle;
pub mod provider;
pub mod runner;
pub mod warning;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    AlertConfig, AlertConfigPatch, BannerStyle, ConfigService, ConfigStore, FileStore, MemoryStore,
};
pub use error::{ConfigError, ProviderError};
pub use idle::{IdleEvent, IdleTimer, DEFAULT_TIMEOUT};
pub use provider::{resolve_timeout, StaticProvider, TimeoutProvider, UnavailableProvider};
pub use runner::{ActivityKind, SessionHandle, SessionRunner, SessionSnapshot};
pub use warning::{BannerKind, WarningCoordinator, WarningState};
