//! Externally configured session duration.
//!
//! The timeout window is fetched once at shell mount. The fetch is
//! fire-and-forget: any failure keeps the current default and logs a
//! non-fatal warning — it never blocks rendering and never surfaces as an
//! error state.

use crate::error::ProviderError;
use std::future::Future;
use std::time::Duration;
use vigil_types::ErrorCode;

/// Source of the configured inactivity window.
///
/// Implementations wrap the dashboard's `GET` endpoint returning
/// `{ timeoutMinutes }`; tests use [`StaticProvider`].
pub trait TimeoutProvider: Send + Sync {
    /// Fetches the configured timeout in minutes.
    fn fetch_timeout_minutes(&self)
        -> impl Future<Output = Result<u64, ProviderError>> + Send;
}

/// Provider returning a fixed value (tests, offline deployments).
#[derive(Debug, Clone, Copy)]
pub struct StaticProvider {
    minutes: u64,
}

impl StaticProvider {
    /// Creates a provider that always reports `minutes`.
    #[must_use]
    pub fn new(minutes: u64) -> Self {
        Self { minutes }
    }
}

impl TimeoutProvider for StaticProvider {
    async fn fetch_timeout_minutes(&self) -> Result<u64, ProviderError> {
        Ok(self.minutes)
    }
}

/// Provider that always fails, for exercising the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProvider;

impl TimeoutProvider for UnavailableProvider {
    async fn fetch_timeout_minutes(&self) -> Result<u64, ProviderError> {
        Err(ProviderError::Fetch(
            "session duration endpoint unreachable".to_string(),
        ))
    }
}

/// Resolves the timeout window, falling back to `default` on any failure.
///
/// A zero-minute answer is rejected like an error: the inactivity window
/// must stay positive.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vigil_session::{resolve_timeout, StaticProvider, UnavailableProvider, DEFAULT_TIMEOUT};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let timeout = resolve_timeout(&StaticProvider::new(15), DEFAULT_TIMEOUT).await;
/// assert_eq!(timeout, Duration::from_secs(15 * 60));
///
/// let timeout = resolve_timeout(&UnavailableProvider, DEFAULT_TIMEOUT).await;
/// assert_eq!(timeout, DEFAULT_TIMEOUT);
/// # });
/// ```
pub async fn resolve_timeout(provider: &impl TimeoutProvider, default: Duration) -> Duration {
    match provider.fetch_timeout_minutes().await {
        Ok(0) => {
            let err = ProviderError::Invalid { minutes: 0 };
            tracing::warn!(code = err.code(), "rejected configured timeout; keeping default");
            default
        }
        Ok(minutes) => Duration::from_secs(minutes.saturating_mul(60)),
        Err(err) => {
            tracing::warn!(code = err.code(), error = %err, "session duration fetch failed; keeping default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_TIMEOUT;

    #[tokio::test]
    async fn static_provider_converts_minutes() {
        let timeout = resolve_timeout(&StaticProvider::new(45), DEFAULT_TIMEOUT).await;
        assert_eq!(timeout, Duration::from_secs(45 * 60));
    }

    #[tokio::test]
    async fn failure_keeps_default() {
        let timeout = resolve_timeout(&UnavailableProvider, DEFAULT_TIMEOUT).await;
        assert_eq!(timeout, DEFAULT_TIMEOUT);
    }

    #[tokio::test]
    async fn zero_minutes_rejected() {
        let timeout = resolve_timeout(&StaticProvider::new(0), DEFAULT_TIMEOUT).await;
        assert_eq!(timeout, DEFAULT_TIMEOUT);
    }

    #[tokio::test]
    async fn custom_default_is_honored() {
        let fallback = Duration::from_secs(600);
        let timeout = resolve_timeout(&UnavailableProvider, fallback).await;
        assert_eq!(timeout, fallback);
    }
}
