use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::sample::{CreateSampleRequest, SampleResponse, SampleService},
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

pub struct SampleController {
    sample_service: Arc<SampleService>,
}

impl SampleController {
    pub fn new(sample_service: Arc<SampleService>) -> Self {
        Self { sample_service }
    }

    /// GET /api/samples - List the user's writing samples
    pub async fn list_samples(
        State(controller): State<Arc<SampleController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<Vec<SampleResponse>>> {
        let samples = controller
            .sample_service
            .get_user_samples(auth_user.user_id)
            .await
            .map_err(AppError::from)?;
        Ok(Json(samples))
    }

    /// POST /api/samples - Store a writing sample, capped per tier
    pub async fn create_sample(
        State(controller): State<Arc<SampleController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<CreateSampleRequest>,
    ) -> AppResult<(StatusCode, Json<SampleResponse>)> {
        let sample = controller
            .sample_service
            .create_sample(auth_user.user_id, request)
            .await
            .map_err(AppError::from)?;
        Ok((StatusCode::CREATED, Json(sample)))
    }

    /// DELETE /api/samples/:sampleId - Remove a writing sample
    pub async fn delete_sample(
        State(controller): State<Arc<SampleController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(sample_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller
            .sample_service
            .delete_sample(auth_user.user_id, sample_id)
            .await
            .map_err(AppError::from)?;
        Ok(StatusCode::NO_CONTENT)
    }
}
