use std::sync::Arc;

use axum::{
    extract::State,
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    handlers::{
        middleware::auth_middleware,
        users::{
            get_profile, get_saved_articles, remove_saved_article, save_article,
            update_preferences, update_profile,
        },
    },
    utils::state::AppState,
};

pub fn user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/preferences", put(update_preferences))
        .route("/saved-articles", get(get_saved_articles))
        .route("/save-article", post(save_article))
        .route("/saved-articles/{article_id}", delete(remove_saved_article))
        .layer(from_fn(move |req, next| {
            auth_middleware(State(state.clone()), req, next)
        }))
}
