pub mod auth;
pub mod middleware;
pub mod news;
pub mod users;
