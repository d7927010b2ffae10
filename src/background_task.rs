use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::limiter::rate_limiter::SlidingWindowLimiter;

/// Runs the limiter sweep on a fixed interval and whenever a request asks
/// for one. Never returns; spawn it.
pub async fn start_limiter_sweeper(limiter: Arc<SlidingWindowLimiter>, every: Duration) {
    let signal = limiter.sweep_signal();
    let mut interval = interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = signal.notified() => {}
        }

        let removed = limiter.sweep();
        if removed > 0 {
            tracing::debug!(
                "Swept {} stale rate-limit clients ({} still tracked)",
                removed,
                limiter.tracked_clients()
            );
        }
    }
}
