//! Pre-expiry warning and transient banners.
//!
//! The coordinator does not own the countdown — it thresholds the idle
//! timer's remaining time into a UI-facing signal on every tick, so the two
//! can never drift. The warning threshold and enabled flag come from the
//! persisted [`AlertConfig`].
//!
//! [`AlertConfig`]: crate::AlertConfig

use crate::config::AlertConfig;
use crate::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Which banner slot a transient message occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    /// Confirmation banner.
    Success,
    /// Error banner.
    Error,
}

impl BannerKind {
    /// Returns the kind as a string ("success", "error").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// UI-facing warning signal derived from the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningState {
    /// Whether the pre-expiry alert should show.
    pub show_alert: bool,

    /// Whole seconds left until expiry.
    pub time_remaining: u64,
}

/// A transient banner with a clock-evaluated auto-dismiss deadline.
#[derive(Debug, Clone)]
struct Banner {
    kind: BannerKind,
    message: String,
    expires_at: Instant,
}

/// Derives the warning signal and hosts transient banners.
///
/// # Warning Rule
///
/// `show_alert = enabled && 0 < remaining <= threshold`. At zero remaining
/// the warning is off — expiry supersedes it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vigil_session::{AlertConfig, ManualClock, WarningCoordinator};
///
/// let coordinator = WarningCoordinator::new(ManualClock::new(), AlertConfig::default());
///
/// let state = coordinator.evaluate(Duration::from_secs(45));
/// assert!(state.show_alert); // default threshold is 60 s
///
/// let state = coordinator.evaluate(Duration::ZERO);
/// assert!(!state.show_alert); // expiry supersedes the warning
/// ```
pub struct WarningCoordinator {
    clock: Arc<dyn Clock>,
    config: AlertConfig,
    banner: Option<Banner>,
}

impl WarningCoordinator {
    /// Creates a coordinator with the given configuration.
    #[must_use]
    pub fn new(clock: impl Clock + 'static, config: AlertConfig) -> Self {
        Self {
            clock: Arc::new(clock),
            config,
            banner: None,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Replaces the configuration (after an [`update`]).
    ///
    /// [`update`]: crate::ConfigService::update_warning
    pub fn set_config(&mut self, config: AlertConfig) {
        self.config = config;
    }

    /// Thresholds the countdown into the warning signal.
    ///
    /// Called on every idle-timer tick; reactive, never polled on its own
    /// cadence.
    #[must_use]
    pub fn evaluate(&self, remaining: Duration) -> WarningState {
        let secs = remaining.as_secs();
        WarningState {
            show_alert: self.config.enabled && secs > 0 && secs <= self.config.threshold_seconds,
            time_remaining: secs,
        }
    }

    /// Shows a transient banner that self-hides after `duration`.
    ///
    /// Replaces any banner currently showing.
    pub fn show_banner(&mut self, kind: BannerKind, message: impl Into<String>, duration: Duration) {
        self.banner = Some(Banner {
            kind,
            message: message.into(),
            expires_at: self.clock.now() + duration,
        });
    }

    /// Returns the current banner, pruning it if its deadline passed.
    pub fn banner(&mut self) -> Option<(BannerKind, &str)> {
        if let Some(banner) = &self.banner {
            if self.clock.now() >= banner.expires_at {
                self.banner = None;
            }
        }
        self.banner
            .as_ref()
            .map(|banner| (banner.kind, banner.message.as_str()))
    }

    /// Dismisses the current banner. Idempotent.
    pub fn dismiss(&mut self) {
        self.banner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    fn coordinator_with(threshold: u64, enabled: bool) -> (WarningCoordinator, ManualClock) {
        let clock = ManualClock::new();
        let config = AlertConfig {
            threshold_seconds: threshold,
            enabled,
            ..Default::default()
        };
        (WarningCoordinator::new(clock.clone(), config), clock)
    }

    #[test]
    fn no_alert_above_threshold() {
        let (coordinator, _clock) = coordinator_with(60, true);
        let state = coordinator.evaluate(Duration::from_secs(61));
        assert!(!state.show_alert);
        assert_eq!(state.time_remaining, 61);
    }

    #[test]
    fn alert_starts_exactly_at_threshold() {
        let (coordinator, _clock) = coordinator_with(60, true);
        assert!(coordinator.evaluate(Duration::from_secs(60)).show_alert);
        assert!(coordinator.evaluate(Duration::from_secs(1)).show_alert);
    }

    #[test]
    fn no_alert_at_zero_remaining() {
        let (coordinator, _clock) = coordinator_with(60, true);
        let state = coordinator.evaluate(Duration::ZERO);
        assert!(!state.show_alert);
        assert_eq!(state.time_remaining, 0);
    }

    #[test]
    fn disabled_config_suppresses_alert() {
        let (coordinator, _clock) = coordinator_with(60, false);
        assert!(!coordinator.evaluate(Duration::from_secs(30)).show_alert);
    }

    #[test]
    fn zero_threshold_disables_warning_window() {
        let (coordinator, _clock) = coordinator_with(0, true);
        assert!(!coordinator.evaluate(Duration::from_secs(1)).show_alert);
        assert!(!coordinator.evaluate(Duration::ZERO).show_alert);
    }

    #[test]
    fn set_config_takes_effect_immediately() {
        let (mut coordinator, _clock) = coordinator_with(60, true);
        assert!(coordinator.evaluate(Duration::from_secs(45)).show_alert);

        coordinator.set_config(AlertConfig {
            threshold_seconds: 30,
            ..Default::default()
        });
        assert!(!coordinator.evaluate(Duration::from_secs(45)).show_alert);
    }

    #[test]
    fn banner_self_hides_after_duration() {
        let (mut coordinator, clock) = coordinator_with(60, true);
        coordinator.show_banner(BannerKind::Success, "saved", Duration::from_secs(5));

        assert!(coordinator.banner().is_some());

        clock.advance(Duration::from_secs(5));
        assert!(coordinator.banner().is_none());
    }

    #[test]
    fn dismiss_is_idempotent() {
        let (mut coordinator, _clock) = coordinator_with(60, true);
        coordinator.show_banner(BannerKind::Error, "failed", Duration::from_secs(5));

        coordinator.dismiss();
        coordinator.dismiss();
        assert!(coordinator.banner().is_none());
    }

    #[test]
    fn newer_banner_replaces_older() {
        let (mut coordinator, _clock) = coordinator_with(60, true);
        coordinator.show_banner(BannerKind::Success, "first", Duration::from_secs(5));
        coordinator.show_banner(BannerKind::Error, "second", Duration::from_secs(5));

        let (kind, message) = coordinator.banner().expect("banner present");
        assert_eq!(kind, BannerKind::Error);
        assert_eq!(message, "second");
    }
}
