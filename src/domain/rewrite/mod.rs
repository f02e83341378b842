pub mod error;
pub mod service;

pub use error::RewriteServiceError;
pub use service::{
    check_export_quota, check_token_quota, ExportAuthorization, RewriteAuthorization,
    RewriteService,
};
