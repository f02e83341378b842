use super::model::WritingSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/samples
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSampleRequest {
    pub title: String,
    pub content: String,
}

/// Response shape for a single sample
#[derive(Debug, Serialize, Deserialize)]
pub struct SampleResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<WritingSample> for SampleResponse {
    fn from(sample: WritingSample) -> Self {
        Self {
            id: sample.id,
            title: sample.title,
            content: sample.content,
            created_at: sample.created_at,
        }
    }
}
