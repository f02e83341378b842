use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SampleServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("sample not found")]
    NotFound,
    #[error("payment required: {0}")]
    PaymentRequired(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for SampleServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => SampleServiceError::Invalid(msg),
            AppError::NotFound(_) => SampleServiceError::NotFound,
            AppError::PaymentRequired(msg) => SampleServiceError::PaymentRequired(msg),
            _ => SampleServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<SampleServiceError> for AppError {
    fn from(err: SampleServiceError) -> Self {
        match err {
            SampleServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SampleServiceError::NotFound => AppError::NotFound("Sample not found".to_string()),
            SampleServiceError::PaymentRequired(msg) => AppError::PaymentRequired(msg),
            SampleServiceError::Dependency(msg) => AppError::Internal(msg),
            SampleServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
