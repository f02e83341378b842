use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored writing sample. The style analysis that consumes these lives in
/// the analysis collaborator; here they are plain text with a per-tier cap.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WritingSample {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
