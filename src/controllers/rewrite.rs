use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::{
        entitlements::Action,
        rewrite::{ExportAuthorization, RewriteAuthorization, RewriteService},
        tone::ToneSettings,
    },
    error::{AppError, AppResult},
    infrastructure::{auth::AuthUser, rate_limit::DenialLimiter},
};

const MAX_ESTIMATED_TOKENS: i64 = 200_000;

/// Request for POST /api/rewrites/authorize
#[derive(Debug, Serialize, Deserialize)]
pub struct RewriteAuthorizeRequest {
    #[serde(default)]
    pub tone_settings: ToneSettings,
    pub estimated_tokens: i64,
    /// Extra gated capabilities the rewrite intends to use, as action tags
    #[serde(default)]
    pub features: Vec<String>,
}

pub struct RewriteController {
    rewrite_service: Arc<RewriteService>,
    denial_limiter: Arc<DenialLimiter>,
}

impl RewriteController {
    pub fn new(rewrite_service: Arc<RewriteService>, denial_limiter: Arc<DenialLimiter>) -> Self {
        Self {
            rewrite_service,
            denial_limiter,
        }
    }

    /// POST /api/rewrites/authorize - Gate one rewrite and reserve tokens
    pub async fn authorize_rewrite(
        State(controller): State<Arc<RewriteController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<RewriteAuthorizeRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Json<RewriteAuthorization>)> {
        controller.guard_throttle(&auth_user, "rewrite")?;

        // Validate input at the edge; the domain validators assume in-range
        // values and a recognized action set.
        if request.estimated_tokens <= 0 {
            return Err(AppError::BadRequest(
                "estimated_tokens must be positive".to_string(),
            ));
        }
        if request.estimated_tokens > MAX_ESTIMATED_TOKENS {
            return Err(AppError::PayloadTooLarge(format!(
                "estimated_tokens must be {} or less",
                MAX_ESTIMATED_TOKENS
            )));
        }
        if let Some(dimension) = request.tone_settings.out_of_range() {
            return Err(AppError::BadRequest(format!(
                "Tone value for {} must be between 0 and 100",
                dimension
            )));
        }

        // An unrecognized tag is a caller bug, not a denial: the action set
        // is closed, so this maps to an internal error rather than an upsell.
        let mut features = Vec::with_capacity(request.features.len());
        for tag in &request.features {
            let action: Action = tag
                .parse()
                .map_err(|e: crate::domain::entitlements::UnknownAction| {
                    AppError::Internal(e.to_string())
                })?;
            features.push(action);
        }

        let result = controller
            .rewrite_service
            .authorize_rewrite(
                auth_user.user_id,
                request.tone_settings,
                request.estimated_tokens,
                &features,
            )
            .await;

        let authorization =
            controller.observe_outcome(&auth_user, "rewrite", result.map_err(AppError::from))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Tokens-Reserved",
            authorization
                .tokens_reserved
                .to_string()
                .parse()
                .expect("integer header value is always valid"),
        );
        headers.insert(
            "X-Tokens-Remaining",
            authorization
                .tokens_remaining
                .to_string()
                .parse()
                .expect("integer header value is always valid"),
        );

        Ok((StatusCode::OK, headers, Json(authorization)))
    }

    /// POST /api/exports/authorize - Gate one export
    pub async fn authorize_export(
        State(controller): State<Arc<RewriteController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ExportAuthorization>> {
        controller.guard_throttle(&auth_user, "export")?;

        let result = controller
            .rewrite_service
            .authorize_export(auth_user.user_id)
            .await;

        let authorization =
            controller.observe_outcome(&auth_user, "export", result.map_err(AppError::from))?;

        Ok(Json(authorization))
    }

    fn guard_throttle(&self, auth_user: &AuthUser, action: &str) -> AppResult<()> {
        if self.denial_limiter.is_throttled(auth_user.user_id, action) {
            return Err(AppError::RateLimitExceeded(
                "Too many rejected attempts, try again later".to_string(),
            ));
        }
        Ok(())
    }

    /// Record entitlement and quota denials against the throttle and log
    /// them for the audit trail before propagating.
    fn observe_outcome<T>(
        &self,
        auth_user: &AuthUser,
        action: &str,
        result: AppResult<T>,
    ) -> AppResult<T> {
        if let Err(err) = &result {
            if matches!(
                err,
                AppError::Forbidden(_) | AppError::PaymentRequired(_)
            ) {
                self.denial_limiter.record_denial(auth_user.user_id, action);
                tracing::warn!(
                    user_id = %auth_user.user_id,
                    action = action,
                    reason = %err,
                    "Request denied"
                );
            }
        }
        result
    }
}
