use super::error::RewriteServiceError;
use crate::domain::entitlements::{
    analysis_level, processing_priority_rank, resolve_limits, validate_access, Action,
    AnalysisLevel,
};
use crate::domain::tone::{filter_tone_settings, validate_tone_settings, ToneSettings};
use crate::domain::user::User;
use crate::infrastructure::repositories::UserRepository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Grant returned when a rewrite passes every gate. The rewrite engine is an
/// external collaborator: it calls this service first and proceeds with the
/// sanitized settings only on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteAuthorization {
    pub tone_settings: ToneSettings,
    pub analysis_level: AnalysisLevel,
    pub processing_priority_rank: u8,
    pub tokens_reserved: i64,
    pub tokens_remaining: i64,
}

/// Grant for a single export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportAuthorization {
    pub monthly_exports_used: i32,
}

pub struct RewriteService {
    user_repo: Arc<UserRepository>,
}

impl RewriteService {
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Authorize one rewrite: entitlement checks, tone filtering and
    /// validation, then the quota gate with an atomic token reservation.
    ///
    /// The in-memory quota checks are advisory; the conditional update in the
    /// repository is the enforcement point, so two racing requests cannot
    /// both spend the last of a user's headroom.
    pub async fn authorize_rewrite(
        &self,
        user_id: Uuid,
        requested: ToneSettings,
        estimated_tokens: i64,
        features: &[Action],
    ) -> Result<RewriteAuthorization, RewriteServiceError> {
        if estimated_tokens <= 0 {
            return Err(RewriteServiceError::Invalid(
                "Estimated token count must be positive".to_string(),
            ));
        }

        let user = self.find_user(user_id).await?;

        for action in features {
            validate_access(Some(&user), *action)?;
        }

        // Filter before validating so validation never sees a blocked
        // dimension that the filter already defaulted.
        let filtered = filter_tone_settings(Some(&user), &requested);
        validate_tone_settings(Some(&user), &filtered)?;

        check_token_quota(&user, Utc::now())?;

        let limits = resolve_limits(Some(&user));
        let updated = self
            .user_repo
            .reserve_tokens(
                user_id,
                estimated_tokens,
                limits.daily_limit,
                limits.monthly_limit,
            )
            .await
            .map_err(|e| RewriteServiceError::Dependency(e.to_string()))?;

        let updated = match updated {
            Some(user) => user,
            // The advisory check passed but the guarded update matched no
            // row: a concurrent request consumed the headroom first.
            None => {
                let fresh = self.find_user(user_id).await?;
                return Err(check_token_quota(&fresh, Utc::now()).err().unwrap_or_else(
                    || {
                        RewriteServiceError::QuotaExhausted(
                            "Token quota was consumed by a concurrent request".to_string(),
                        )
                    },
                ));
            }
        };

        tracing::info!(
            user_id = %user_id,
            tier = %updated.subscription_tier,
            tokens_reserved = estimated_tokens,
            tokens_remaining = updated.tokens_remaining,
            "Rewrite authorized"
        );

        Ok(RewriteAuthorization {
            tone_settings: filtered,
            analysis_level: analysis_level(Some(&updated)),
            processing_priority_rank: processing_priority_rank(Some(&updated)),
            tokens_reserved: estimated_tokens,
            tokens_remaining: updated.tokens_remaining,
        })
    }

    /// Authorize one export against the monthly export quota.
    pub async fn authorize_export(
        &self,
        user_id: Uuid,
    ) -> Result<ExportAuthorization, RewriteServiceError> {
        let user = self.find_user(user_id).await?;

        check_export_quota(&user)?;

        let limits = resolve_limits(Some(&user));
        let updated = self
            .user_repo
            .record_export(user_id, limits.export_limit)
            .await
            .map_err(|e| RewriteServiceError::Dependency(e.to_string()))?;

        let updated = match updated {
            Some(user) => user,
            None => {
                let fresh = self.find_user(user_id).await?;
                return Err(check_export_quota(&fresh).err().unwrap_or_else(|| {
                    RewriteServiceError::QuotaExhausted(
                        "Export quota was consumed by a concurrent request".to_string(),
                    )
                }));
            }
        };

        tracing::info!(
            user_id = %user_id,
            tier = %updated.subscription_tier,
            monthly_exports_used = updated.monthly_exports_used,
            "Export authorized"
        );

        Ok(ExportAuthorization {
            monthly_exports_used: updated.monthly_exports_used,
        })
    }

    async fn find_user(&self, user_id: Uuid) -> Result<User, RewriteServiceError> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| RewriteServiceError::Dependency(e.to_string()))?
            .ok_or(RewriteServiceError::UserNotFound)
    }
}

/// Advisory token-quota gate, checked in order: purse, daily bound, monthly
/// bound. Each failure carries reset-timing context from the user record.
pub fn check_token_quota(user: &User, now: DateTime<Utc>) -> Result<(), RewriteServiceError> {
    let limits = resolve_limits(Some(user));

    if user.tokens_remaining <= 0 {
        return Err(RewriteServiceError::QuotaExhausted(
            "No tokens remaining. Upgrade your plan to keep rewriting.".to_string(),
        ));
    }

    // Finite only on the free tier; unlimited bounds always pass.
    if !limits.daily_limit.allows(user.daily_tokens_used) {
        return Err(RewriteServiceError::QuotaExhausted(format!(
            "Daily token limit reached. Resets in {} hours.",
            User::hours_until_daily_reset(now)
        )));
    }

    if !limits.monthly_limit.allows(user.monthly_tokens_used) {
        return Err(RewriteServiceError::QuotaExhausted(format!(
            "Monthly token limit reached. Resets on day {} of the month.",
            user.monthly_reset_day()
        )));
    }

    Ok(())
}

/// Advisory export-quota gate.
pub fn check_export_quota(user: &User) -> Result<(), RewriteServiceError> {
    let limits = resolve_limits(Some(user));

    if !limits.export_limit.allows(user.monthly_exports_used as i64) {
        return Err(RewriteServiceError::QuotaExhausted(format!(
            "Monthly export limit reached. Resets on day {} of the month.",
            user.monthly_reset_day()
        )));
    }

    Ok(())
}
