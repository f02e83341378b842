use crate::domain::entitlements::Limit;
use crate::infrastructure::db::DbPool;
use crate::{domain::user::User, error::AppResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Atomically reserve tokens for a rewrite.
    ///
    /// The guard clauses re-run the quota checks inside the UPDATE, so the
    /// check and the spend are one statement: of two racing requests only the
    /// first can match the row. Returns the updated user, or None when the
    /// guards no longer hold. Unlimited bounds bind as i64::MAX so the query
    /// shape is the same for every tier. The purse is floored at zero, which
    /// keeps the counter invariant even when the last grant was smaller than
    /// the estimate.
    pub async fn reserve_tokens(
        &self,
        user_id: Uuid,
        tokens: i64,
        daily_limit: Limit,
        monthly_limit: Limit,
    ) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET tokens_remaining = GREATEST(tokens_remaining - $2, 0),
                daily_tokens_used = daily_tokens_used + $2,
                monthly_tokens_used = monthly_tokens_used + $2,
                updated_at = $5
            WHERE id = $1
              AND tokens_remaining > 0
              AND daily_tokens_used < $3
              AND monthly_tokens_used < $4
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(tokens)
        .bind(daily_limit.as_sql_bound())
        .bind(monthly_limit.as_sql_bound())
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Atomically count one export against the monthly quota. Same
    /// conditional-update discipline as `reserve_tokens`.
    pub async fn record_export(
        &self,
        user_id: Uuid,
        export_limit: Limit,
    ) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET monthly_exports_used = monthly_exports_used + 1,
                updated_at = $3
            WHERE id = $1
              AND monthly_exports_used < $2
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(export_limit.as_sql_bound())
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
