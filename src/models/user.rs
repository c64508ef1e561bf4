use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub categories: Vec<String>,
    pub sources: Vec<String>,
    pub language: String,
    pub country: String,
}

#[derive(FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(flatten)]
    pub preferences: Preferences,
    pub saved_articles: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UpdatePreferencesRequest {
    pub categories: Option<Vec<String>>,
    pub sources: Option<Vec<String>>,
    pub language: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaveArticleRequest {
    pub article_id: i32,
}
