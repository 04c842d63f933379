//! Bounded polling for asynchronous, externally-owned conditions
//!
//! The emulator offers no push notification for readiness; the only
//! viable strategy is to poll a probe under a deadline. The primitive
//! here is generic over the probe so the boot check stays decoupled from
//! the waiting mechanism.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use avdctl_core::prelude::*;

/// Deadline and pacing for one polling loop.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Give up after this much elapsed time
    pub timeout: Duration,
    /// Sleep between probe attempts
    pub interval: Duration,
}

impl PollConfig {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

/// Poll `probe` until it reports the condition met or the deadline passes.
///
/// `Ok(true)` ends the wait immediately. `Ok(false)` means the condition
/// is not met yet. Probe errors are swallowed and polling continues:
/// transient unavailability (bridge unreachable, device not yet
/// attachable) is expected early in a boot. On deadline the error names
/// the configured timeout.
pub async fn await_predicate<F, Fut>(config: PollConfig, mut probe: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    while start.elapsed() < config.timeout {
        match probe().await {
            Ok(true) => return Ok(()),
            Ok(false) => trace!("condition not met yet"),
            Err(e) => debug!("probe unavailable, continuing to poll: {}", e),
        }
        sleep(config.interval).await;
    }

    Err(Error::timeout(config.timeout.as_secs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn cfg(timeout_secs: u64, interval_secs: u64) -> PollConfig {
        PollConfig::new(
            Duration::from_secs(timeout_secs),
            Duration::from_secs(interval_secs),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success_does_not_sleep() {
        let start = Instant::now();
        let result = await_predicate(cfg(60, 2), || async { Ok(true) }).await;
        assert!(result.is_ok());
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_elapsed_is_bounded() {
        let start = Instant::now();
        let err = await_predicate(cfg(10, 2), || async { Ok(false) })
            .await
            .unwrap_err();
        let elapsed = start.elapsed();

        assert!(matches!(err, Error::Timeout { seconds: 10 }));
        assert!(elapsed >= Duration::from_secs(10));
        assert!(elapsed < Duration::from_secs(12));
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_errors_are_swallowed() {
        let attempts = AtomicU32::new(0);
        let start = Instant::now();

        let result = await_predicate(cfg(60, 2), || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(Error::bridge("device not yet attachable"))
                } else {
                    Ok(true)
                }
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_error_names_configured_value() {
        let err = await_predicate(cfg(7, 2), || async { Ok(false) })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("7s"));
    }
}
