pub mod health;
pub mod rewrite;
pub mod sample;
pub mod user;
