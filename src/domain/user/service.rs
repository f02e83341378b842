use super::dto::{MeResponse, SubscriptionDto, UsageDto, WritingSamplesDto};
use super::User;
use crate::domain::entitlements::{analysis_level, processing_priority_rank, resolve_limits};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::{SampleRepository, UserRepository};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserService {
    user_repo: Arc<UserRepository>,
    sample_repo: Arc<SampleRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>, sample_repo: Arc<SampleRepository>) -> Self {
        Self {
            user_repo,
            sample_repo,
        }
    }

    /// Get user profile with resolved limits and current usage
    pub async fn get_user_profile(&self, user_id: Uuid) -> AppResult<MeResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let samples_used = self.sample_repo.count_for_user(user_id).await?;

        Ok(Self::build_me_response(&user, samples_used))
    }

    /// Get the usage/limit snapshot for GET /api/usage
    pub async fn get_usage(&self, user_id: Uuid) -> AppResult<UsageDto> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(Self::build_usage(&user))
    }

    fn build_usage(user: &User) -> UsageDto {
        let limits = resolve_limits(Some(user));
        let now = Utc::now();

        UsageDto {
            tokens_remaining: user.tokens_remaining,
            daily_tokens_used: user.daily_tokens_used,
            daily_limit: limits.daily_limit,
            monthly_tokens_used: user.monthly_tokens_used,
            monthly_limit: limits.monthly_limit,
            monthly_exports_used: user.monthly_exports_used,
            export_limit: limits.export_limit,
            daily_resets_at: User::daily_reset_at(now),
            monthly_resets_at: user.monthly_reset_at(now),
        }
    }

    fn build_me_response(user: &User, samples_used: i64) -> MeResponse {
        let limits = resolve_limits(Some(user));

        MeResponse {
            id: user.id,
            email: user.email.clone(),
            subscription: SubscriptionDto {
                tier: user.subscription_tier.to_string(),
                expires_at: user.subscription_expires_at,
                limits,
                analysis_level: analysis_level(Some(user)),
                processing_priority_rank: processing_priority_rank(Some(user)),
                usage: Self::build_usage(user),
                writing_samples: WritingSamplesDto {
                    used: samples_used,
                    limit: limits.max_writing_samples,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlements::Limit;
    use crate::domain::user::test_support::user_with_tier;
    use crate::domain::user::SubscriptionTier;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_me_response_reflects_tier_limits() {
        let user = user_with_tier(SubscriptionTier::Pro);
        let response = UserService::build_me_response(&user, 4);

        assert_eq!(response.subscription.tier, "pro");
        assert!(response.subscription.limits.can_modify_tone);
        assert_eq!(response.subscription.processing_priority_rank, 2);
        assert_eq!(response.subscription.writing_samples.used, 4);
        assert_eq!(response.subscription.writing_samples.limit, 25);
        assert_eq!(response.subscription.usage.daily_limit, Limit::Unlimited);
    }

    #[test]
    fn test_usage_snapshot_copies_counters() {
        let mut user = user_with_tier(SubscriptionTier::Free);
        user.daily_tokens_used = 1234;
        user.monthly_exports_used = 2;

        let usage = UserService::build_usage(&user);
        assert_eq!(usage.daily_tokens_used, 1234);
        assert_eq!(usage.monthly_exports_used, 2);
        assert_eq!(usage.daily_limit, Limit::Limited(100_000));
        assert_eq!(usage.export_limit, Limit::Limited(5));
    }

    #[test]
    fn test_usage_snapshot_exposes_reset_timestamps() {
        let user = user_with_tier(SubscriptionTier::Free);

        let usage = UserService::build_usage(&user);
        let json = serde_json::to_value(&usage).unwrap();

        assert!(json.get("daily_resets_at").is_some());
        assert!(json.get("monthly_resets_at").is_some());
        assert!(json.get("period").is_none());
    }
}
