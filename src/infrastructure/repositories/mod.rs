pub mod sample_repository;
pub mod user_repository;

pub use sample_repository::SampleRepository;
pub use user_repository::UserRepository;
