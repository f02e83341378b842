use crate::domain::entitlements::{AnalysisLevel, Limit, SubscriptionLimits};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for GET /api/me
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: String,
    pub subscription: SubscriptionDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionDto {
    pub tier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Capability set the UI uses to show or hide controls
    #[serde(skip_deserializing, default = "deny_all")]
    pub limits: SubscriptionLimits,
    pub analysis_level: AnalysisLevel,
    pub processing_priority_rank: u8,
    pub usage: UsageDto,
    pub writing_samples: WritingSamplesDto,
}

fn deny_all() -> SubscriptionLimits {
    SubscriptionLimits::none()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsageDto {
    pub tokens_remaining: i64,
    pub daily_tokens_used: i64,
    pub daily_limit: Limit,
    pub monthly_tokens_used: i64,
    pub monthly_limit: Limit,
    pub monthly_exports_used: i32,
    pub export_limit: Limit,
    pub daily_resets_at: DateTime<Utc>,
    pub monthly_resets_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WritingSamplesDto {
    pub used: i64,
    pub limit: u32,
}
