pub mod entitlements;
pub mod rewrite;
pub mod sample;
pub mod tone;
pub mod user;
