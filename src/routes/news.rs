use std::sync::Arc;

use axum::{extract::State, middleware::from_fn, routing::get, Router};

use crate::{
    handlers::{
        middleware::auth_middleware,
        news::{get_personalized_news, get_trending_news, search_news},
    },
    utils::state::AppState,
};

pub fn news_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/personalized", get(get_personalized_news))
        .route("/search", get(search_news))
        .route("/trending", get(get_trending_news))
        .layer(from_fn(move |req, next| {
            auth_middleware(State(state.clone()), req, next)
        }))
}
