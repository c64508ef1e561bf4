use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use http::{header, StatusCode};
use std::sync::Arc;

use crate::{
    models::error::Error,
    utils::{jwt::jwt_decode, state::AppState},
};

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, Error> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or((StatusCode::UNAUTHORIZED, "Missing Bearer token"))?;

    let claims = jwt_decode(token, &state.config.jwt_secret).map_err(|e| {
        Error::new(
            StatusCode::UNAUTHORIZED,
            &format!("Token validation failed: {}", e),
        )
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
