//! Tick and activity scheduling.
//!
//! [`SessionRunner`] owns the idle timer and warning coordinator and drives
//! them from a single task: a 1 Hz interval for ticks and an mpsc channel
//! for activity events. State flows out through a `watch` channel of
//! [`SessionSnapshot`]s.
//!
//! ```text
//! SessionHandle ──activity──►┐
//!                            │  SessionRunner (tokio task)
//!        1 Hz interval ──────┤     IdleTimer + WarningCoordinator
//!                            │
//!     snapshots ◄──watch─────┘     expiry callback (once per episode)
//! ```
//!
//! # Ordering
//!
//! Queued activity events are drained before each tick computes, so a tick
//! never observes a stale last-activity instant relative to events that
//! arrived in the same cycle.
//!
//! # Teardown
//!
//! [`SessionHandle::shutdown`] (or dropping the handle) stops the loop on
//! the next poll: the shutdown arm is polled first, the interval is dropped
//! with the runner, and no tick or expiry callback runs afterwards.

use crate::warning::WarningState;
use crate::{IdleEvent, IdleTimer, WarningCoordinator};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;

/// Tick cadence of the runner.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Buffer for queued activity events between ticks.
const ACTIVITY_BUFFER: usize = 64;

/// A qualifying user-interaction event. Any one re-arms the idle window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// Pointer movement.
    PointerMove,
    /// Pointer press.
    PointerDown,
    /// Key press.
    KeyDown,
    /// Touch start.
    TouchStart,
    /// Scroll.
    Scroll,
    /// Click.
    Click,
}

impl ActivityKind {
    /// Returns the kind as a string, matching the upstream event names.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointerMove => "mousemove",
            Self::PointerDown => "mousedown",
            Self::KeyDown => "keypress",
            Self::TouchStart => "touchstart",
            Self::Scroll => "scroll",
            Self::Click => "click",
        }
    }
}

/// Published state after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Whole seconds left until expiry.
    pub remaining_seconds: u64,

    /// Whether the idle window has closed.
    pub expired: bool,

    /// Derived warning signal.
    pub warning: WarningState,
}

type ExpiryCallback = Box<dyn FnMut() + Send>;

/// Drives the idle timer and warning coordinator on a tokio task.
///
/// Construct with [`SessionRunner::new`], then `tokio::spawn(runner.run())`.
///
/// # Example
///
/// ```no_run
/// use vigil_session::{AlertConfig, IdleTimer, SessionRunner, SystemClock, WarningCoordinator};
///
/// # async fn example() {
/// let timer = IdleTimer::new(SystemClock);
/// let coordinator = WarningCoordinator::new(SystemClock, AlertConfig::default());
///
/// let (runner, handle) = SessionRunner::new(timer, coordinator, || {
///     println!("session expired");
/// });
/// let task = tokio::spawn(runner.run());
///
/// // ... forward activity through `handle`, render from `handle.snapshot()` ...
/// # let mut handle = handle;
/// handle.shutdown();
/// let _ = task.await;
/// # }
/// ```
pub struct SessionRunner {
    timer: IdleTimer,
    coordinator: WarningCoordinator,
    activity_rx: mpsc::Receiver<ActivityKind>,
    shutdown_rx: oneshot::Receiver<()>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    on_expiry: ExpiryCallback,
}

/// Caller-side handle: forwards activity, reads snapshots, shuts down.
///
/// Dropping the handle tears the runner down before its next tick.
pub struct SessionHandle {
    activity_tx: mpsc::Sender<ActivityKind>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl SessionRunner {
    /// Creates a runner/handle pair.
    ///
    /// `on_expiry` is invoked exactly once per idle episode, from the tick
    /// that observes the closed window.
    #[must_use]
    pub fn new(
        timer: IdleTimer,
        coordinator: WarningCoordinator,
        on_expiry: impl FnMut() + Send + 'static,
    ) -> (Self, SessionHandle) {
        let (activity_tx, activity_rx) = mpsc::channel(ACTIVITY_BUFFER);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let initial = snapshot_of(&timer, &coordinator);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let runner = Self {
            timer,
            coordinator,
            activity_rx,
            shutdown_rx,
            snapshot_tx,
            on_expiry: Box::new(on_expiry),
        };
        let handle = SessionHandle {
            activity_tx,
            snapshot_rx,
            shutdown_tx: Some(shutdown_tx),
        };
        (runner, handle)
    }

    /// Runs until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(TICK_PERIOD);
        // Remaining time is recomputed from the elapsed delta, so skipped
        // ticks need no catch-up burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = &mut self.shutdown_rx => {
                    tracing::debug!("session runner shutting down");
                    break;
                }

                maybe = self.activity_rx.recv() => match maybe {
                    Some(kind) => {
                        tracing::trace!(kind = kind.as_str(), "activity observed");
                        self.timer.record_activity();
                    }
                    None => {
                        tracing::debug!("all session handles dropped");
                        break;
                    }
                },

                _ = interval.tick() => {
                    // Drain activity queued in this cycle before computing.
                    while let Ok(kind) = self.activity_rx.try_recv() {
                        tracing::trace!(kind = kind.as_str(), "activity observed");
                        self.timer.record_activity();
                    }

                    if self.timer.tick() == IdleEvent::Expired {
                        tracing::debug!("idle session expired");
                        (self.on_expiry)();
                    }

                    let snapshot = snapshot_of(&self.timer, &self.coordinator);
                    let _ = self.snapshot_tx.send(snapshot);
                }
            }
        }
    }
}

impl SessionHandle {
    /// Forwards an activity event; returns `false` if the runner is gone.
    pub async fn record_activity(&self, kind: ActivityKind) -> bool {
        self.activity_tx.send(kind).await.is_ok()
    }

    /// Non-blocking variant of [`record_activity`](Self::record_activity).
    ///
    /// Returns `false` if the buffer is full or the runner is gone; a
    /// dropped event only delays the re-arm until the next one, so callers
    /// need not retry.
    pub fn try_record_activity(&self, kind: ActivityKind) -> bool {
        self.activity_tx.try_send(kind).is_ok()
    }

    /// Returns the most recent snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// Returns a receiver for awaiting snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Stops the runner before its next tick. Idempotent.
    ///
    /// Returns `true` if the signal reached a live runner.
    pub fn shutdown(&mut self) -> bool {
        self.shutdown_tx
            .take()
            .is_some_and(|tx| tx.send(()).is_ok())
    }
}

fn snapshot_of(timer: &IdleTimer, coordinator: &WarningCoordinator) -> SessionSnapshot {
    let remaining = timer.remaining();
    SessionSnapshot {
        remaining_seconds: remaining.as_secs(),
        expired: timer.is_expired(),
        warning: coordinator.evaluate(remaining),
    }
}
