use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::{fingerprint, NewsProvider, ProviderError, SearchParams, TopHeadlinesParams};
use crate::models::article::{ArticleSource, NewsArticle};
use crate::utils::cache::{Cache, CACHE_TTL_MEDIUM};

const PROVIDER: &str = "gnews";

#[derive(Debug, Deserialize)]
struct GNewsResponse {
    #[serde(default)]
    articles: Vec<GNewsArticle>,
}

/// GNews wire format; field names differ from the normalized shape
/// (`image` instead of `urlToImage`, source carries a URL instead of an id).
#[derive(Debug, Deserialize)]
struct GNewsArticle {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
    url: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    source: GNewsSource,
}

#[derive(Debug, Default, Deserialize)]
struct GNewsSource {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl From<GNewsArticle> for NewsArticle {
    fn from(article: GNewsArticle) -> Self {
        NewsArticle {
            title: article.title,
            description: article.description,
            content: article.content,
            url: article.url,
            url_to_image: article.image,
            author: None,
            source: ArticleSource {
                id: article.source.url,
                name: article.source.name,
            },
            published_at: article.published_at,
        }
    }
}

pub struct GNewsClient {
    api_key: String,
    base_url: String,
    client: Client,
    cache: Arc<Cache<Vec<NewsArticle>>>,
}

impl GNewsClient {
    pub fn new(
        api_key: String,
        base_url: String,
        client: Client,
        cache: Arc<Cache<Vec<NewsArticle>>>,
    ) -> Self {
        Self {
            api_key,
            base_url,
            client,
            cache,
        }
    }

    async fn fetch(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<NewsArticle>, ProviderError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status,
            });
        }

        let body: GNewsResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Decode {
                    provider: PROVIDER,
                    source,
                })?;

        Ok(body.articles.into_iter().map(NewsArticle::from).collect())
    }
}

#[async_trait]
impl NewsProvider for GNewsClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn top_headlines(
        &self,
        params: &TopHeadlinesParams,
    ) -> Result<Vec<NewsArticle>, ProviderError> {
        let key = fingerprint(PROVIDER, "top", params);
        if self.cache.has(&key) {
            if let Some(articles) = self.cache.get(&key) {
                return Ok(articles);
            }
        }

        let query = [
            ("apikey", self.api_key.clone()),
            ("topic", params.category.clone()),
            ("lang", params.language.clone()),
            ("max", params.page_size.to_string()),
        ];
        let articles = self.fetch("top", &query).await?;

        self.cache.set(&key, articles.clone(), CACHE_TTL_MEDIUM);
        Ok(articles)
    }

    async fn search_news(&self, params: &SearchParams) -> Result<Vec<NewsArticle>, ProviderError> {
        let key = fingerprint(PROVIDER, "search", params);
        if self.cache.has(&key) {
            if let Some(articles) = self.cache.get(&key) {
                return Ok(articles);
            }
        }

        let query = [
            ("apikey", self.api_key.clone()),
            ("q", params.q.clone()),
            ("lang", params.language.clone()),
            ("max", params.page_size.to_string()),
        ];
        let articles = self.fetch("search", &query).await?;

        self.cache.set(&key, articles.clone(), CACHE_TTL_MEDIUM);
        Ok(articles)
    }
}
