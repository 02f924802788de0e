// * Request pacing
// * Spaces successive fetches by a fixed delay. Listing pages and profile pages
// * each get their own pacer.

use governor::{Quota, RateLimiter as GovernorLimiter};
use nonzero_ext::nonzero;
use std::time::Duration;
use tracing::debug;

type DirectLimiter = GovernorLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

// * Pacer lets one request through per period; the first is immediate
pub struct Pacer {
    delay: Duration,
    limiter: Option<DirectLimiter>,
}

impl Pacer {
    // * A zero delay disables pacing entirely
    pub fn new(delay: Duration) -> Self {
        let limiter = Quota::with_period(delay)
            .map(|quota| GovernorLimiter::direct(quota.allow_burst(nonzero!(1u32))));

        Self { delay, limiter }
    }

    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    // * Checks the pacer without waiting
    pub fn check(&self) -> bool {
        match &self.limiter {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }

    // * Waits until the next request may go out
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
            debug!(delay_ms = self.delay.as_millis() as u64, "Pacer released request");
        }
    }
}
