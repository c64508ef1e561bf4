use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Extension, Json};
use http::StatusCode;
use serde_json::json;

use crate::{
    models::{
        error::Error,
        jwt::Claims,
        user::{LoginRequest, RegisterRequest, User},
    },
    utils::{
        hash_password::{hash_password, verify_password},
        jwt::jwt_encode,
        state::AppState,
        validation::validate_registration,
    },
};

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error> {
    if let Some(message) = validate_registration(&payload.name, &payload.email, &payload.password) {
        return Err(Error::new(StatusCode::BAD_REQUEST, message));
    }

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&state.db_pool)
        .await?;
    if existing.is_some() {
        return Err(Error::new(StatusCode::BAD_REQUEST, "User already exists"));
    }

    let hashed = hash_password(&payload.password)
        .map_err(|e| Error::new(StatusCode::INTERNAL_SERVER_ERROR, &e))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&hashed)
    .fetch_one(&state.db_pool)
    .await?;

    let token = jwt_encode(user.id, &state.config.jwt_secret)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "token": token, "user": user})),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(Error::new(
            StatusCode::BAD_REQUEST,
            "Please provide an email and password",
        ));
    }

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or((StatusCode::UNAUTHORIZED, "Invalid email or password"))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(Error::new(
            StatusCode::UNAUTHORIZED,
            "Invalid email or password",
        ));
    }

    let token = jwt_encode(user.id, &state.config.jwt_secret)?;

    Ok((
        StatusCode::OK,
        Json(json!({"success": true, "token": token, "user": user})),
    ))
}

pub async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, Error> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(claims.sub)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or((StatusCode::NOT_FOUND, "User not found"))?;

    Ok((StatusCode::OK, Json(json!({"success": true, "user": user}))))
}

pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "Logged out successfully"})),
    )
}
