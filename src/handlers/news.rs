use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Extension, Json,
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use sqlx::PgPool;

use crate::{
    models::{
        article::{Article, NewsArticle},
        error::Error,
        jwt::Claims,
        user::{Preferences, User},
    },
    services::{
        aggregate_search, aggregate_top_headlines, NewsProvider, SearchParams, TopHeadlinesParams,
    },
    utils::{
        constants::{DEFAULT_CATEGORY, DEFAULT_COUNTRY, DEFAULT_LANGUAGE},
        state::AppState,
    },
};

const PAGE_SIZE: u32 = 20;

fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Derives provider parameters from stored preferences. Empty stored values
/// fall back to the defaults, the same way absent ones do.
fn headline_params(preferences: &Preferences) -> TopHeadlinesParams {
    TopHeadlinesParams {
        category: preferences
            .categories
            .first()
            .filter(|c| !c.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        country: or_default(&preferences.country, DEFAULT_COUNTRY),
        language: or_default(&preferences.language, DEFAULT_LANGUAGE),
        page_size: PAGE_SIZE,
    }
}

fn search_params(q: String, sort_by: Option<String>, language: Option<String>) -> SearchParams {
    SearchParams {
        q,
        sort_by: sort_by
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "publishedAt".to_string()),
        language: language
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        page_size: PAGE_SIZE,
    }
}

/// Insert-or-update keyed on the article URL; `id` and `created_at` are
/// fixed at first insert.
pub(crate) async fn upsert_article(
    pool: &PgPool,
    article: &NewsArticle,
    category: &str,
    language: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO articles
            (title, description, content, url, url_to_image, author,
             source_id, source_name, category, published_at, language)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         ON CONFLICT (url) DO UPDATE SET
            title = EXCLUDED.title,
            description = EXCLUDED.description,
            content = EXCLUDED.content,
            url_to_image = EXCLUDED.url_to_image,
            author = EXCLUDED.author,
            source_id = EXCLUDED.source_id,
            source_name = EXCLUDED.source_name,
            category = EXCLUDED.category,
            published_at = EXCLUDED.published_at,
            language = EXCLUDED.language",
    )
    .bind(&article.title)
    .bind(&article.description)
    .bind(&article.content)
    .bind(&article.url)
    .bind(&article.url_to_image)
    .bind(&article.author)
    .bind(&article.source.id)
    .bind(&article.source.name)
    .bind(category)
    .bind(article.published_at)
    .bind(language)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_personalized_news(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, Error> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(claims.sub)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or((StatusCode::NOT_FOUND, "User not found"))?;

    let params = headline_params(&user.preferences);

    let providers: [&dyn NewsProvider; 2] = [&state.news_api, &state.gnews];
    let aggregation = aggregate_top_headlines(&providers, &params).await;

    // upserts are independent per article
    for article in &aggregation.articles {
        upsert_article(&state.db_pool, article, &params.category, &params.language).await?;
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "totalResults": aggregation.articles.len(),
            "articles": aggregation.articles,
            "failedProviders": aggregation.failed_providers
        })),
    ))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub language: Option<String>,
}

pub async fn search_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, Error> {
    let q = match query.q {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err(Error::new(
                StatusCode::BAD_REQUEST,
                "Please provide a search query",
            ))
        }
    };

    let params = search_params(q.clone(), query.sort_by, query.language);

    let providers: [&dyn NewsProvider; 2] = [&state.news_api, &state.gnews];
    let aggregation = aggregate_search(&providers, &params).await;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "query": q,
            "totalResults": aggregation.articles.len(),
            "articles": aggregation.articles,
            "failedProviders": aggregation.failed_providers
        })),
    ))
}

pub async fn get_trending_news(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, Error> {
    let articles = sqlx::query_as::<_, Article>(
        "SELECT * FROM articles ORDER BY published_at DESC NULLS LAST LIMIT 20",
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "totalResults": articles.len(),
            "articles": articles
        })),
    ))
}
