pub mod dto;
pub mod error;
pub mod model;
pub mod service;

pub use dto::{CreateSampleRequest, SampleResponse};
pub use error::SampleServiceError;
pub use model::WritingSample;
pub use service::SampleService;
