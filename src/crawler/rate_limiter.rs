//! Token-bucket rate limiting for outbound fetches
//!
//! The bucket holds up to `max_calls` tokens and refills continuously at
//! `max_calls / per` tokens per second. Refill is computed lazily on each
//! acquisition; there is no background timer.

use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Shortest pause between two checks of an empty bucket
const MIN_WAIT: Duration = Duration::from_millis(10);

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Shared gate bounding the fetch rate
///
/// Callers serialize on one mutex guarding the token count and the last refill
/// instant. Waiters are not served in any particular order, but each one makes
/// progress once tokens become available.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: f64,
    refill_per_sec: f64,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_calls` per `per` interval
    ///
    /// The bucket starts full. A zero `max_calls` is treated as one.
    pub fn new(max_calls: u32, per: Duration) -> Self {
        let capacity = f64::from(max_calls.max(1));
        let per_secs = per.as_secs_f64().max(f64::EPSILON);

        Self {
            capacity,
            refill_per_sec: capacity / per_secs,
            bucket: Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Creates a limiter allowing `requests` per minute
    pub fn per_minute(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(60))
    }

    /// Waits until a token is available, then consumes it
    pub async fn acquire(&self) {
        loop {
            let wait = match self.take_or_wait() {
                None => return,
                Some(wait) => wait,
            };

            tracing::trace!("Rate limiter empty, waiting {:?}", wait);
            sleep(wait).await;
        }
    }

    /// Consumes a token if one is available right now
    pub fn try_acquire(&self) -> bool {
        self.take_or_wait().is_none()
    }

    /// Takes a token, or returns how long to wait for the next one
    fn take_or_wait(&self) -> Option<Duration> {
        let mut bucket = self.bucket.lock().unwrap_or_else(|e| e.into_inner());

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            bucket.last_refill = now;
        }

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            return None;
        }

        let needed = 1.0 - bucket.tokens;
        let wait = Duration::from_secs_f64(needed / self.refill_per_sec);
        Some(wait.max(MIN_WAIT))
    }
}
