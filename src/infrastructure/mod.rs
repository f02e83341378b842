pub mod auth;
pub mod config;
pub mod db;
pub mod http;
pub mod rate_limit;
pub mod repositories;
