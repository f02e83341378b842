pub mod dto;
pub mod model;
pub mod service;

pub use dto::{MeResponse, SubscriptionDto, UsageDto, WritingSamplesDto};
pub use model::{SubscriptionTier, User};
pub use service::UserService;

#[cfg(test)]
pub mod test_support {
    use super::{SubscriptionTier, User};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    /// A user with fresh counters on the given tier.
    pub fn user_with_tier(tier: SubscriptionTier) -> User {
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            subscription_tier: tier,
            tokens_remaining: 10_000,
            daily_tokens_used: 0,
            monthly_tokens_used: 0,
            monthly_exports_used: 0,
            last_token_reset: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            monthly_reset_date: 1,
            subscription_expires_at: None,
            billing_start_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
