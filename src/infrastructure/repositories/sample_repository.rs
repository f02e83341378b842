use crate::domain::sample::WritingSample;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct SampleRepository {
    pool: Arc<DbPool>,
}

impl SampleRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, sample_id: Uuid) -> AppResult<Option<WritingSample>> {
        let pool = self.pool.as_ref();
        let sample =
            sqlx::query_as::<_, WritingSample>("SELECT * FROM writing_samples WHERE id = $1")
                .bind(sample_id)
                .fetch_optional(pool)
                .await?;

        Ok(sample)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<WritingSample>> {
        let pool = self.pool.as_ref();
        let samples = sqlx::query_as::<_, WritingSample>(
            "SELECT * FROM writing_samples WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(samples)
    }

    pub async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM writing_samples WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> AppResult<WritingSample> {
        let pool = self.pool.as_ref();
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let sample = sqlx::query_as::<_, WritingSample>(
            r#"
            INSERT INTO writing_samples (id, user_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(sample)
    }

    pub async fn delete(&self, sample_id: Uuid) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("DELETE FROM writing_samples WHERE id = $1")
            .bind(sample_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
