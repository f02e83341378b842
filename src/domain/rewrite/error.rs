use crate::domain::entitlements::EntitlementError;
use crate::domain::tone::ToneValidationError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum RewriteServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Denied(#[from] EntitlementError),
    #[error(transparent)]
    Tone(#[from] ToneValidationError),
    #[error("{0}")]
    QuotaExhausted(String),
}

impl From<RewriteServiceError> for AppError {
    fn from(err: RewriteServiceError) -> Self {
        match err {
            RewriteServiceError::Invalid(msg) => AppError::BadRequest(msg),
            RewriteServiceError::UserNotFound => AppError::NotFound("User not found".to_string()),
            RewriteServiceError::Denied(e) => AppError::Forbidden(e.to_string()),
            RewriteServiceError::Tone(e) => AppError::Forbidden(e.to_string()),
            RewriteServiceError::QuotaExhausted(msg) => AppError::PaymentRequired(msg),
            RewriteServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
