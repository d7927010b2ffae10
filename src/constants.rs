use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Process start, forced in `main` so uptime is not measured from the first
/// health request.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const HEALTH_CACHE_TTL_SECS: i64 = 5;

pub const SITEMAP_CACHE_CONTROL: &str = "max-age=0, s-maxage=3600";

pub const RATE_LIMITED_MESSAGE: &str = "Too many contact requests. Please try again later.";
