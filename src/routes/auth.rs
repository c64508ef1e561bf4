use std::sync::Arc;

use axum::{
    extract::State,
    middleware::from_fn,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{
        auth::{get_me, login, logout, register},
        middleware::auth_middleware,
    },
    utils::state::AppState,
};

pub fn auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/me", get(get_me))
        .route("/logout", post(logout))
        .layer(from_fn(move |req, next| {
            auth_middleware(State(state.clone()), req, next)
        }));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}
