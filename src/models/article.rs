use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Persisted article row, keyed by its unique canonical URL.
#[derive(FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub author: Option<String>,
    pub source_id: Option<String>,
    pub source_name: Option<String>,
    pub category: String,
    pub published_at: Option<DateTime<Utc>>,
    pub language: String,
    pub country: Option<String>,
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Normalized in-flight article, the common shape both provider clients map
/// their wire formats into. Serialized camelCase to match the JSON API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: ArticleSource,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}
