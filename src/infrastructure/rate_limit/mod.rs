use moka::sync::Cache;
use std::time::Duration;
use uuid::Uuid;

/// Throttle for repeatedly denied requests, keyed by user + action.
///
/// Owned by whoever constructs it and injected into controllers, never a
/// process-wide static. Each bucket expires `window` after the most recent
/// denial, so a user who stops hammering a gated endpoint is unblocked
/// without any sweeper.
pub struct DenialLimiter {
    buckets: Cache<String, u32>,
    max_denials: u32,
}

impl DenialLimiter {
    pub fn new(max_denials: u32, window: Duration) -> Self {
        let buckets = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(window)
            .build();
        Self {
            buckets,
            max_denials,
        }
    }

    fn key(user_id: Uuid, action: &str) -> String {
        format!("{}:{}", user_id, action)
    }

    /// Whether this user has burned through their denial allowance for the
    /// current window.
    pub fn is_throttled(&self, user_id: Uuid, action: &str) -> bool {
        self.buckets
            .get(&Self::key(user_id, action))
            .map_or(false, |count| count >= self.max_denials)
    }

    /// Record one denied attempt. The read-modify-write is not atomic across
    /// threads; an occasional lost increment only makes the throttle slightly
    /// more lenient, which is acceptable for an abuse brake.
    pub fn record_denial(&self, user_id: Uuid, action: &str) {
        let key = Self::key(user_id, action);
        let count = self.buckets.get(&key).unwrap_or(0) + 1;
        self.buckets.insert(key, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_throttled_before_limit() {
        let limiter = DenialLimiter::new(3, Duration::from_secs(60));
        let user = Uuid::new_v4();

        limiter.record_denial(user, "rewrite");
        limiter.record_denial(user, "rewrite");
        assert!(!limiter.is_throttled(user, "rewrite"));
    }

    #[test]
    fn test_throttled_at_limit() {
        let limiter = DenialLimiter::new(3, Duration::from_secs(60));
        let user = Uuid::new_v4();

        for _ in 0..3 {
            limiter.record_denial(user, "rewrite");
        }
        assert!(limiter.is_throttled(user, "rewrite"));
    }

    #[test]
    fn test_buckets_are_per_action() {
        let limiter = DenialLimiter::new(1, Duration::from_secs(60));
        let user = Uuid::new_v4();

        limiter.record_denial(user, "rewrite");
        assert!(limiter.is_throttled(user, "rewrite"));
        assert!(!limiter.is_throttled(user, "export"));
    }

    #[test]
    fn test_buckets_are_per_user() {
        let limiter = DenialLimiter::new(1, Duration::from_secs(60));
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        limiter.record_denial(user_a, "rewrite");
        assert!(limiter.is_throttled(user_a, "rewrite"));
        assert!(!limiter.is_throttled(user_b, "rewrite"));
    }
}
