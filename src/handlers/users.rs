use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use http::StatusCode;
use serde_json::json;

use crate::{
    models::{
        article::Article,
        error::Error,
        jwt::Claims,
        user::{SaveArticleRequest, UpdatePreferencesRequest, UpdateProfileRequest, User},
    },
    utils::{
        constants::{NEWS_CATEGORIES, NEWS_SOURCES},
        state::AppState,
    },
};

async fn fetch_user(state: &AppState, id: i32) -> Result<User, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or_else(|| Error::new(StatusCode::NOT_FOUND, "User not found"))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, Error> {
    let user = fetch_user(&state, claims.sub).await?;
    Ok((StatusCode::OK, Json(json!({"success": true, "user": user}))))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, Error> {
    if let Some(email) = &payload.email {
        let taken =
            sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1 AND id <> $2")
                .bind(email)
                .bind(claims.sub)
                .fetch_optional(&state.db_pool)
                .await?;
        if taken.is_some() {
            return Err(Error::new(StatusCode::BAD_REQUEST, "Email already taken"));
        }
    }

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET name = COALESCE($1, name), email = COALESCE($2, email)
         WHERE id = $3 RETURNING *",
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(claims.sub)
    .fetch_one(&state.db_pool)
    .await?;

    Ok((StatusCode::OK, Json(json!({"success": true, "user": user}))))
}

pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdatePreferencesRequest>,
) -> Result<impl IntoResponse, Error> {
    if let Some(categories) = &payload.categories {
        if let Some(bad) = categories
            .iter()
            .find(|c| !NEWS_CATEGORIES.contains(&c.as_str()))
        {
            return Err(Error::new(
                StatusCode::BAD_REQUEST,
                &format!("Unknown category: {}", bad),
            ));
        }
    }
    if let Some(sources) = &payload.sources {
        if let Some(bad) = sources.iter().find(|s| !NEWS_SOURCES.contains(&s.as_str())) {
            return Err(Error::new(
                StatusCode::BAD_REQUEST,
                &format!("Unknown source: {}", bad),
            ));
        }
    }

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET
            categories = COALESCE($1, categories),
            sources = COALESCE($2, sources),
            language = COALESCE($3, language),
            country = COALESCE($4, country)
         WHERE id = $5 RETURNING *",
    )
    .bind(&payload.categories)
    .bind(&payload.sources)
    .bind(&payload.language)
    .bind(&payload.country)
    .bind(claims.sub)
    .fetch_one(&state.db_pool)
    .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Preferences updated successfully",
            "user": user
        })),
    ))
}

pub async fn save_article(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SaveArticleRequest>,
) -> Result<impl IntoResponse, Error> {
    let exists = sqlx::query_scalar::<_, i32>("SELECT id FROM articles WHERE id = $1")
        .bind(payload.article_id)
        .fetch_optional(&state.db_pool)
        .await?;
    if exists.is_none() {
        return Err(Error::new(StatusCode::NOT_FOUND, "Article not found"));
    }

    // idempotent: saving an already-saved article leaves the list unchanged
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET saved_articles =
            CASE WHEN $1 = ANY(saved_articles) THEN saved_articles
                 ELSE array_append(saved_articles, $1) END
         WHERE id = $2 RETURNING *",
    )
    .bind(payload.article_id)
    .bind(claims.sub)
    .fetch_one(&state.db_pool)
    .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Article saved successfully",
            "user": user
        })),
    ))
}

pub async fn remove_saved_article(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(article_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET saved_articles = array_remove(saved_articles, $1)
         WHERE id = $2 RETURNING *",
    )
    .bind(article_id)
    .bind(claims.sub)
    .fetch_one(&state.db_pool)
    .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Article removed from saved",
            "user": user
        })),
    ))
}

pub async fn get_saved_articles(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, Error> {
    let articles = sqlx::query_as::<_, Article>(
        "SELECT a.* FROM articles a
         JOIN users u ON a.id = ANY(u.saved_articles)
         WHERE u.id = $1
         ORDER BY a.created_at DESC",
    )
    .bind(claims.sub)
    .fetch_all(&state.db_pool)
    .await?;

    Ok((
        StatusCode::OK,
        Json(json!({"success": true, "articles": articles})),
    ))
}
