use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{fingerprint, NewsProvider, ProviderError, SearchParams, TopHeadlinesParams};
use crate::models::article::NewsArticle;
use crate::utils::cache::{Cache, CACHE_TTL_MEDIUM, CACHE_TTL_SHORT};

const PROVIDER: &str = "newsapi";

/// Envelope NewsAPI wraps article lists in. The article objects themselves
/// already use the normalized field names.
#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

pub struct NewsApiClient {
    api_key: String,
    base_url: String,
    client: Client,
    cache: Arc<Cache<Vec<NewsArticle>>>,
}

impl NewsApiClient {
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

        let body: NewsApiResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Decode {
                    provider: PROVIDER,
                    source,
                })?;

        Ok(body.articles)
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn top_headlines(
        &self,
        params: &TopHeadlinesParams,
    ) -> Result<Vec<NewsArticle>, ProviderError> {
        let key = fingerprint(PROVIDER, "headlines", params);
        if self.cache.has(&key) {
            if let Some(articles) = self.cache.get(&key) {
                return Ok(articles);
            }
        }

        let query = [
            ("apiKey", self.api_key.clone()),
            ("category", params.category.clone()),
            ("country", params.country.clone()),
            ("pageSize", params.page_size.to_string()),
        ];
        let articles = self.fetch("top-headlines", &query).await?;

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
            ("apiKey", self.api_key.clone()),
            ("q", params.q.clone()),
            ("sortBy", params.sort_by.clone()),
            ("pageSize", params.page_size.to_string()),
        ];
        let articles = self.fetch("everything", &query).await?;

        // search params vary more than headline params, so cache them shorter
        self.cache.set(&key, articles.clone(), CACHE_TTL_SHORT);
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> NewsApiClient {
        NewsApiClient::new(
            "test-key".to_string(),
            server.uri(),
            Client::new(),
            Arc::new(Cache::new()),
        )
    }

    fn top_params() -> TopHeadlinesParams {
        TopHeadlinesParams {
            category: "technology".into(),
            country: "us".into(),
            language: "en".into(),
            page_size: 20,
        }
    }

    #[tokio::test]
    async fn top_headlines_sends_newsapi_wire_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(query_param("apiKey", "test-key"))
            .and(query_param("category", "technology"))
            .and(query_param("country", "us"))
            .and(query_param("pageSize", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [{
                    "source": {"id": "the-verge", "name": "The Verge"},
                    "author": "A. Writer",
                    "title": "Chips",
                    "description": "All about chips",
                    "url": "https://example.com/chips",
                    "urlToImage": "https://example.com/chips.jpg",
                    "publishedAt": "2024-05-01T12:00:00Z",
                    "content": "Body"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let articles = client(&server).top_headlines(&top_params()).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://example.com/chips");
        assert_eq!(articles[0].source.name.as_deref(), Some("The Verge"));
        assert_eq!(
            articles[0].url_to_image.as_deref(),
            Some("https://example.com/chips.jpg")
        );
    }

    #[tokio::test]
    async fn second_identical_call_is_served_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 0,
                "articles": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client.top_headlines(&top_params()).await.unwrap();
        client.top_headlines(&top_params()).await.unwrap();
    }

    #[tokio::test]
    async fn non_2xx_becomes_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client(&server)
            .search_news(&SearchParams {
                q: "rust".into(),
                sort_by: "publishedAt".into(),
                language: "en".into(),
                page_size: 20,
            })
            .await
            .unwrap_err();

        assert_eq!(err.provider(), "newsapi");
        assert!(matches!(err, ProviderError::Status { status, .. }
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS));
    }
}
