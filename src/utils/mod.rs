pub mod cache;
pub mod config;
pub mod constants;
pub mod hash_password;
pub mod jwt;
pub mod state;
pub mod validation;
