pub mod article;
pub mod cache;
pub mod error;
pub mod jwt;
pub mod user;
