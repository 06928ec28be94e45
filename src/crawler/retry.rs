//! Bounded exponential-backoff retry
//!
//! Transport-agnostic: the wrapped operation may be an HTTP request, a file
//! read, or anything else that yields a `Result`.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry schedule for a single page fetch
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Pause after the first failure
    pub initial_delay: Duration,

    /// Multiplier applied to the pause after each failure
    pub backoff_factor: f64,

    /// Upper bound on any single pause
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1500),
            backoff_factor: 2.0,
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Returns the pause that follows `delay` in the schedule, capped at `max_delay`
    fn next_delay(&self, delay: Duration) -> Duration {
        Duration::try_from_secs_f64(delay.as_secs_f64() * self.backoff_factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds or the attempts are used up
///
/// After each failure except the last, sleeps `min(delay, max_delay)` and
/// multiplies the delay by the backoff factor. Failures are logged, never
/// returned: when every attempt fails the result is `None`, so one bad page
/// degrades a crawl instead of aborting it.
///
/// # Arguments
///
/// * `policy` - The retry schedule
/// * `label` - What is being fetched, for log messages
/// * `operation` - Produces one attempt
///
/// # Example
///
/// ```
/// use job_harvest::crawler::{fetch_with_retry, RetryPolicy};
///
/// # async fn example() {
/// let policy = RetryPolicy::default();
/// let body = fetch_with_retry(&policy, "page 1", || async {
///     Ok::<_, std::io::Error>("<html></html>".to_string())
/// })
/// .await;
/// assert!(body.is_some());
/// # }
/// ```
pub async fn fetch_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(value) => return Some(value),
            Err(e) => {
                tracing::warn!(
                    "Attempt {}/{} for {} failed: {}",
                    attempt,
                    max_attempts,
                    label,
                    e
                );
            }
        }

        if attempt < max_attempts {
            sleep(delay.min(policy.max_delay)).await;
            delay = policy.next_delay(delay);
        }
    }

    tracing::warn!("Giving up on {} after {} attempts", label, max_attempts);
    None
}
