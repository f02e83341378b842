use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    domain::user::{MeResponse, UsageDto, UserService},
    error::AppResult,
    infrastructure::auth::AuthUser,
};

pub struct UserController {
    user_service: Arc<UserService>,
}

impl UserController {
    pub fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }

    /// GET /api/me - Current user profile with resolved limits
    pub async fn get_me(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<MeResponse>> {
        let response = controller
            .user_service
            .get_user_profile(auth_user.user_id)
            .await?;
        Ok(Json(response))
    }

    /// GET /api/usage - Usage counters and limits with reset timing
    pub async fn get_usage(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<UsageDto>> {
        let response = controller.user_service.get_usage(auth_user.user_id).await?;
        Ok(Json(response))
    }
}
