use std::sync::Arc;

use dashmap::DashMap;
use rand::Rng;
use tokio::sync::Notify;

use crate::{limiter::clock::{Clock, SystemClock}, settings::AppConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitConfig {
    pub max: u32,
    pub window_ms: i64,
    /// Chance per attempt that a sweep of stale clients is requested.
    pub sweep_probability: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            max: 5,
            window_ms: 3_600_000,
            sweep_probability: 0.05,
        }
    }
}

impl From<&AppConfig> for RateLimitConfig {
    fn from(config: &AppConfig) -> Self {
        RateLimitConfig {
            max: config.contact_rate_limit_max,
            window_ms: config.contact_rate_limit_window_ms,
            sweep_probability: config.rate_limit_sweep_probability,
        }
    }
}

/// Outcome of one attempt. `reset_ms` is the time until the oldest counted
/// attempt leaves the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_ms: i64,
}

impl RateLimitDecision {
    /// Whole seconds a rejected client should wait, rounded up.
    pub fn retry_after_secs(&self) -> i64 {
        (self.reset_ms + 999).div_euclid(1000)
    }
}

/// Per-client sliding-window limiter.
///
/// Each key maps to the timestamps of its accepted attempts. The map entry is
/// held for the whole evaluation, so attempts for one key are serialized.
pub struct SlidingWindowLimiter {
    entries: DashMap<String, Vec<i64>>,
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    sweep_signal: Arc<Notify>,
}

impl SlidingWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        SlidingWindowLimiter {
            entries: DashMap::new(),
            config,
            clock,
            sweep_signal: Arc::new(Notify::new()),
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Handle the background sweeper waits on.
    pub fn sweep_signal(&self) -> Arc<Notify> {
        self.sweep_signal.clone()
    }

    pub fn tracked_clients(&self) -> usize {
        self.entries.len()
    }

    /// Evaluates and, when allowed, records one attempt for `key`.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now = self.clock.now_ms();
        let window = self.config.window_ms;
        let limit = self.config.max;

        let decision = {
            let mut timestamps = self.entries.entry(key.to_string()).or_default();
            timestamps.retain(|ts| now - ts < window);

            let count = timestamps.len();
            let oldest = timestamps.iter().copied().min().unwrap_or(now);
            let reset_ms = (oldest + window - now).max(0);

            if count >= limit as usize {
                RateLimitDecision {
                    allowed: false,
                    limit,
                    remaining: 0,
                    reset_ms,
                }
            } else {
                timestamps.push(now);
                RateLimitDecision {
                    allowed: true,
                    limit,
                    remaining: limit - count as u32 - 1,
                    reset_ms,
                }
            }
        };

        if self.config.sweep_probability > 0.0
            && rand::thread_rng().gen_bool(self.config.sweep_probability.min(1.0))
        {
            self.sweep_signal.notify_one();
        }

        decision
    }

    /// Drops every client whose attempts have all left the window and trims
    /// the rest. Returns the number of clients removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now_ms();
        let window = self.config.window_ms;
        let before = self.entries.len();

        self.entries.retain(|_, timestamps| {
            timestamps.retain(|ts| now - ts < window);
            !timestamps.is_empty()
        });

        before.saturating_sub(self.entries.len())
    }
}
