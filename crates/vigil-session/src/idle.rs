//! Rolling inactivity window.
//!
//! [`IdleTimer`] tracks wall-clock time since the last qualifying activity
//! event against a configurable timeout. Each tick *recomputes* the
//! remaining window from the elapsed delta — a suspended tab or throttled
//! scheduler can therefore only over-count idle time, never under-count it.
//!
//! # Idle Episodes
//!
//! An idle episode runs from the last activity event until either the next
//! activity event or expiry. The `false → true` transition of the expired
//! flag happens exactly once per episode; the tick that crosses zero yields
//! [`IdleEvent::Expired`] and every later tick at zero yields
//! [`IdleEvent::Idle`].
//!
//! # After Expiry
//!
//! `record_activity` is a no-op once expired: stray pointer movement must
//! not silently resurrect a force-expired session. The owning shell calls
//! [`rearm`](IdleTimer::rearm) (or [`configure`](IdleTimer::configure))
//! after re-authentication.

use crate::Clock;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default inactivity window when no external value is available (30 min).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1800);

/// Outcome of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleEvent {
    /// Session is live; countdown continues.
    Active {
        /// Time left until expiry.
        remaining: Duration,
    },

    /// The window just closed. Emitted exactly once per idle episode.
    Expired,

    /// Still expired from an earlier tick; no transition.
    Idle,
}

/// Countdown to inactivity-based expiry.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vigil_session::{IdleEvent, IdleTimer, ManualClock};
///
/// let clock = ManualClock::new();
/// let mut timer = IdleTimer::new(clock.clone());
/// timer.configure(1); // one-minute window
///
/// assert_eq!(timer.remaining(), Duration::from_secs(60));
///
/// clock.advance(Duration::from_secs(60));
/// assert_eq!(timer.tick(), IdleEvent::Expired);
/// assert_eq!(timer.tick(), IdleEvent::Idle); // no second transition
/// ```
pub struct IdleTimer {
    clock: Arc<dyn Clock>,
    timeout: Duration,
    last_activity: Instant,
    expired: bool,
}

impl IdleTimer {
    /// Creates a timer with the default 30-minute window, armed now.
    #[must_use]
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_timeout(clock, DEFAULT_TIMEOUT)
    }

    /// Creates a timer with an explicit window, armed now.
    #[must_use]
    pub fn with_timeout(clock: impl Clock + 'static, timeout: Duration) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        let last_activity = clock.now();
        Self {
            clock,
            timeout,
            last_activity,
            expired: false,
        }
    }

    /// (Re)initializes the window to `timeout_minutes` and re-arms.
    ///
    /// Immediately afterwards [`remaining`](Self::remaining) equals the full
    /// window and the expired flag is clear.
    pub fn configure(&mut self, timeout_minutes: u64) {
        self.timeout = Duration::from_secs(timeout_minutes.saturating_mul(60));
        self.rearm();
    }

    /// Re-arms the timer: activity is "now", expired state cleared.
    ///
    /// This is the only path back from expiry, to be taken after
    /// re-authentication.
    pub fn rearm(&mut self) {
        self.last_activity = self.clock.now();
        self.expired = false;
    }

    /// Records a qualifying activity event.
    ///
    /// No-op once expired — see the module docs.
    pub fn record_activity(&mut self) {
        if self.expired {
            return;
        }
        self.last_activity = self.clock.now();
    }

    /// Returns the configured window.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time left until expiry, computed from the elapsed wall-clock delta.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        let elapsed = self.clock.now().saturating_duration_since(self.last_activity);
        self.timeout.saturating_sub(elapsed)
    }

    /// Remaining whole seconds; zero once the window has closed.
    #[must_use]
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining().as_secs()
    }

    /// Returns `true` once the window has closed and not been re-armed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Returns `true` inside the warning sub-window: `0 < remaining <=
    /// threshold`. Strictly false at zero — expiry supersedes warning.
    #[must_use]
    pub fn is_warning_active(&self, threshold: Duration) -> bool {
        let remaining = self.remaining();
        !remaining.is_zero() && remaining <= threshold
    }

    /// Advances the state machine one tick.
    ///
    /// The tick that first observes a closed window flips the expired flag
    /// and returns [`IdleEvent::Expired`]; the caller fires its expiry
    /// callback on that event only.
    pub fn tick(&mut self) -> IdleEvent {
        if self.expired {
            return IdleEvent::Idle;
        }

        let remaining = self.remaining();
        if remaining.is_zero() {
            self.expired = true;
            tracing::debug!(timeout_secs = self.timeout.as_secs(), "idle window closed");
            IdleEvent::Expired
        } else {
            IdleEvent::Active { remaining }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    fn timer_with_window(secs: u64) -> (IdleTimer, ManualClock) {
        let clock = ManualClock::new();
        let timer = IdleTimer::with_timeout(clock.clone(), Duration::from_secs(secs));
        (timer, clock)
    }

    #[test]
    fn configure_resets_to_full_window() {
        let (mut timer, clock) = timer_with_window(10);
        clock.advance(Duration::from_secs(7));

        timer.configure(30);
        assert_eq!(timer.remaining(), Duration::from_secs(30 * 60));
        assert!(!timer.is_expired());
    }

    #[test]
    fn default_window_is_thirty_minutes() {
        let clock = ManualClock::new();
        let timer = IdleTimer::new(clock);
        assert_eq!(timer.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(timer.remaining_seconds(), 1800);
    }

    #[test]
    fn activity_below_timeout_never_expires() {
        let (mut timer, clock) = timer_with_window(60);

        // Twenty gaps of 59 s, each followed by activity.
        for _ in 0..20 {
            clock.advance(Duration::from_secs(59));
            assert!(matches!(timer.tick(), IdleEvent::Active { .. }));
            timer.record_activity();
        }
        assert!(!timer.is_expired());
        assert_eq!(timer.remaining(), Duration::from_secs(60));
    }

    #[test]
    fn expiry_fires_exactly_once_per_episode() {
        let (mut timer, clock) = timer_with_window(60);

        clock.advance(Duration::from_secs(60));
        assert_eq!(timer.tick(), IdleEvent::Expired);
        assert!(timer.is_expired());

        // Ten further ticks at zero must not re-fire the transition.
        for _ in 0..10 {
            clock.advance(Duration::from_secs(1));
            assert_eq!(timer.tick(), IdleEvent::Idle);
        }
    }

    #[test]
    fn remaining_is_recomputed_not_decremented() {
        let (mut timer, clock) = timer_with_window(60);

        // A single large jump (suspended tab) is counted in full.
        clock.advance(Duration::from_secs(3600));
        assert_eq!(timer.remaining(), Duration::ZERO);
        assert_eq!(timer.tick(), IdleEvent::Expired);
    }

    #[test]
    fn activity_after_expiry_is_ignored() {
        let (mut timer, clock) = timer_with_window(60);
        clock.advance(Duration::from_secs(60));
        assert_eq!(timer.tick(), IdleEvent::Expired);

        timer.record_activity();
        assert!(timer.is_expired());
        assert_eq!(timer.remaining(), Duration::ZERO);
        assert_eq!(timer.tick(), IdleEvent::Idle);
    }

    #[test]
    fn rearm_recovers_from_expiry() {
        let (mut timer, clock) = timer_with_window(60);
        clock.advance(Duration::from_secs(60));
        assert_eq!(timer.tick(), IdleEvent::Expired);

        timer.rearm();
        assert!(!timer.is_expired());
        assert_eq!(timer.remaining(), Duration::from_secs(60));
        assert!(matches!(timer.tick(), IdleEvent::Active { .. }));
    }

    #[test]
    fn warning_window_boundaries() {
        let (timer, clock) = timer_with_window(120);
        let threshold = Duration::from_secs(60);

        // Above the threshold: no warning.
        clock.advance(Duration::from_secs(59));
        assert!(!timer.is_warning_active(threshold));

        // Exactly at the threshold: warning starts.
        clock.advance(Duration::from_secs(1));
        assert!(timer.is_warning_active(threshold));

        // At zero: expiry supersedes the warning.
        clock.advance(Duration::from_secs(60));
        assert!(!timer.is_warning_active(threshold));
    }

    #[test]
    fn simulated_minute_expires_with_callback_discipline() {
        // 1-minute window, >= 60 s of simulated advance, expiry observed
        // once, every later tick silent.
        let (mut timer, clock) = timer_with_window(60);
        let mut fired = 0;

        for _ in 0..70 {
            clock.advance(Duration::from_secs(1));
            if timer.tick() == IdleEvent::Expired {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }
}
