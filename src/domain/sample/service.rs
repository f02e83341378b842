use super::dto::{CreateSampleRequest, SampleResponse};
use super::error::SampleServiceError;
use super::model::WritingSample;
use crate::domain::entitlements::resolve_limits;
use crate::domain::user::User;
use crate::infrastructure::repositories::{SampleRepository, UserRepository};
use std::sync::Arc;
use uuid::Uuid;

const MAX_SAMPLE_CHARS: usize = 50_000;

pub struct SampleService {
    sample_repo: Arc<SampleRepository>,
    user_repo: Arc<UserRepository>,
}

impl SampleService {
    pub fn new(sample_repo: Arc<SampleRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            sample_repo,
            user_repo,
        }
    }

    pub async fn get_user_samples(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SampleResponse>, SampleServiceError> {
        let samples = self
            .sample_repo
            .find_by_user(user_id)
            .await
            .map_err(|e| SampleServiceError::Dependency(e.to_string()))?;
        Ok(samples.into_iter().map(SampleResponse::from).collect())
    }

    pub async fn create_sample(
        &self,
        user_id: Uuid,
        request: CreateSampleRequest,
    ) -> Result<SampleResponse, SampleServiceError> {
        let user = self.find_user(user_id).await?;

        self.validate_content(&request)?;
        self.check_sample_limit(&user).await?;

        let sample = self
            .sample_repo
            .create(user_id, &request.title, &request.content)
            .await
            .map_err(|e| SampleServiceError::Dependency(e.to_string()))?;

        Ok(SampleResponse::from(sample))
    }

    pub async fn delete_sample(
        &self,
        user_id: Uuid,
        sample_id: Uuid,
    ) -> Result<(), SampleServiceError> {
        self.verify_sample_ownership(sample_id, user_id).await?;

        self.sample_repo
            .delete(sample_id)
            .await
            .map_err(|e| SampleServiceError::Dependency(e.to_string()))?;

        Ok(())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<User, SampleServiceError> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| SampleServiceError::Dependency(e.to_string()))?
            .ok_or_else(|| SampleServiceError::Invalid("User not found".to_string()))
    }

    fn validate_content(&self, request: &CreateSampleRequest) -> Result<(), SampleServiceError> {
        if request.title.trim().is_empty() {
            return Err(SampleServiceError::Invalid(
                "Sample title cannot be empty".to_string(),
            ));
        }
        if request.content.trim().is_empty() {
            return Err(SampleServiceError::Invalid(
                "Sample content cannot be empty".to_string(),
            ));
        }
        if request.content.len() > MAX_SAMPLE_CHARS {
            return Err(SampleServiceError::Invalid(format!(
                "Sample content must be {} characters or less",
                MAX_SAMPLE_CHARS
            )));
        }
        Ok(())
    }

    async fn check_sample_limit(&self, user: &User) -> Result<(), SampleServiceError> {
        let sample_count = self
            .sample_repo
            .count_for_user(user.id)
            .await
            .map_err(|e| SampleServiceError::Dependency(e.to_string()))?;

        let max_samples = resolve_limits(Some(user)).max_writing_samples;

        if sample_count >= max_samples as i64 {
            return Err(SampleServiceError::PaymentRequired(format!(
                "The {} tier allows up to {} writing samples. Upgrade for more.",
                user.subscription_tier, max_samples
            )));
        }

        Ok(())
    }

    async fn verify_sample_ownership(
        &self,
        sample_id: Uuid,
        user_id: Uuid,
    ) -> Result<WritingSample, SampleServiceError> {
        let sample = self
            .sample_repo
            .find_by_id(sample_id)
            .await
            .map_err(|e| SampleServiceError::Dependency(e.to_string()))?
            .ok_or(SampleServiceError::NotFound)?;

        if sample.user_id != user_id {
            return Err(SampleServiceError::NotFound);
        }

        Ok(sample)
    }
}
