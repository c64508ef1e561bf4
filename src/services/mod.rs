pub mod gnews;
pub mod newsapi;

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::article::NewsArticle;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned status {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("{provider} response could not be decoded: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Http { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Decode { provider, .. } => provider,
        }
    }
}

/// Logical top-headlines parameters; each client translates these to its
/// provider's wire names.
#[derive(Debug, Clone)]
pub struct TopHeadlinesParams {
    pub category: String,
    pub country: String,
    pub language: String,
    pub page_size: u32,
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub q: String,
    pub sort_by: String,
    pub language: String,
    pub page_size: u32,
}

/// Deterministic key material for one parameter set. Free-text fields are
/// Debug-quoted so a delimiter inside a value cannot collide with the
/// delimiter between values.
pub trait CacheKey {
    fn cache_key(&self) -> String;
}

impl CacheKey for TopHeadlinesParams {
    fn cache_key(&self) -> String {
        format!(
            "{:?}|{:?}|{:?}|{}",
            self.category, self.country, self.language, self.page_size
        )
    }
}

impl CacheKey for SearchParams {
    fn cache_key(&self) -> String {
        format!(
            "{:?}|{:?}|{:?}|{}",
            self.q, self.sort_by, self.language, self.page_size
        )
    }
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn top_headlines(
        &self,
        params: &TopHeadlinesParams,
    ) -> Result<Vec<NewsArticle>, ProviderError>;

    async fn search_news(&self, params: &SearchParams) -> Result<Vec<NewsArticle>, ProviderError>;
}

/// Cache fingerprint for one provider operation.
pub fn fingerprint<P: CacheKey>(provider: &str, operation: &str, params: &P) -> String {
    format!("{}_{}_{}", provider, operation, params.cache_key())
}

/// Outcome of fanning a request out to every provider. A provider that
/// errored contributes zero articles and shows up in `failed_providers`.
#[derive(Debug)]
pub struct Aggregation {
    pub articles: Vec<NewsArticle>,
    pub failed_providers: Vec<&'static str>,
}

pub async fn aggregate_top_headlines(
    providers: &[&dyn NewsProvider],
    params: &TopHeadlinesParams,
) -> Aggregation {
    let names: Vec<_> = providers.iter().map(|p| p.name()).collect();
    debug!(providers = ?names, category = %params.category, "fanning out top-headlines request");
    let results = join_all(providers.iter().map(|p| p.top_headlines(params))).await;
    collect(results)
}

pub async fn aggregate_search(
    providers: &[&dyn NewsProvider],
    params: &SearchParams,
) -> Aggregation {
    let names: Vec<_> = providers.iter().map(|p| p.name()).collect();
    debug!(providers = ?names, q = %params.q, "fanning out search request");
    let results = join_all(providers.iter().map(|p| p.search_news(params))).await;
    collect(results)
}

fn collect(results: Vec<Result<Vec<NewsArticle>, ProviderError>>) -> Aggregation {
    let mut batches = Vec::new();
    let mut failed_providers = Vec::new();

    for result in results {
        match result {
            Ok(articles) => batches.push(articles),
            Err(err) => {
                warn!(provider = err.provider(), error = %err, "provider fetch failed");
                failed_providers.push(err.provider());
            }
        }
    }

    Aggregation {
        articles: merge_dedup(batches),
        failed_providers,
    }
}

/// Merges provider batches in order, deduplicating by article URL. First
/// occurrence fixes an article's position; a later duplicate overwrites its
/// fields, so on a URL collision the later provider's copy wins.
pub fn merge_dedup(batches: Vec<Vec<NewsArticle>>) -> Vec<NewsArticle> {
    let mut order: Vec<String> = Vec::new();
    let mut by_url: HashMap<String, NewsArticle> = HashMap::new();

    for article in batches.into_iter().flatten() {
        if !by_url.contains_key(&article.url) {
            order.push(article.url.clone());
        }
        by_url.insert(article.url.clone(), article);
    }

    order
        .into_iter()
        .filter_map(|url| by_url.remove(&url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::article::ArticleSource;

    fn article(url: &str, title: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: None,
            content: None,
            url: url.to_string(),
            url_to_image: None,
            author: None,
            source: ArticleSource::default(),
            published_at: None,
        }
    }

    struct FakeProvider {
        name: &'static str,
        articles: Vec<NewsArticle>,
        fail: bool,
    }

    #[async_trait]
    impl NewsProvider for FakeProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn top_headlines(
            &self,
            _params: &TopHeadlinesParams,
        ) -> Result<Vec<NewsArticle>, ProviderError> {
            if self.fail {
                return Err(ProviderError::Status {
                    provider: self.name,
                    status: reqwest::StatusCode::TOO_MANY_REQUESTS,
                });
            }
            Ok(self.articles.clone())
        }

        async fn search_news(
            &self,
            params: &SearchParams,
        ) -> Result<Vec<NewsArticle>, ProviderError> {
            let _ = params;
            self.top_headlines(&TopHeadlinesParams {
                category: "general".into(),
                country: "us".into(),
                language: "en".into(),
                page_size: 20,
            })
            .await
        }
    }

    fn top_params() -> TopHeadlinesParams {
        TopHeadlinesParams {
            category: "general".into(),
            country: "us".into(),
            language: "en".into(),
            page_size: 20,
        }
    }

    #[test]
    fn merge_keeps_first_seen_order_and_later_duplicate_fields() {
        let a = vec![article("u1", "a1"), article("u2", "a2")];
        let b = vec![article("u2", "b2"), article("u3", "b3")];

        let merged = merge_dedup(vec![a, b]);

        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.iter().map(|a| a.url.as_str()).collect::<Vec<_>>(),
            vec!["u1", "u2", "u3"]
        );
        // provider B's copy of the shared URL wins
        assert_eq!(merged[1].title, "b2");
    }

    #[test]
    fn merge_of_disjoint_batches_counts_all() {
        let a: Vec<NewsArticle> = (0..5).map(|i| article(&format!("a{i}"), "t")).collect();
        let mut b: Vec<NewsArticle> = (0..5).map(|i| article(&format!("b{i}"), "t")).collect();
        b.push(article("a0", "t"));
        b.push(article("a1", "t"));

        // 5 + 7 articles, 2 shared URLs
        assert_eq!(merge_dedup(vec![a, b]).len(), 10);
    }

    #[tokio::test]
    async fn one_failed_provider_contributes_zero_articles() {
        let failing = FakeProvider {
            name: "newsapi",
            articles: vec![],
            fail: true,
        };
        let healthy = FakeProvider {
            name: "gnews",
            articles: vec![article("u1", "t1"), article("u2", "t2")],
            fail: false,
        };

        let agg = aggregate_top_headlines(&[&failing, &healthy], &top_params()).await;

        assert_eq!(agg.articles.len(), 2);
        assert_eq!(agg.failed_providers, vec!["newsapi"]);
    }

    #[tokio::test]
    async fn all_providers_failing_yields_empty_list() {
        let a = FakeProvider {
            name: "newsapi",
            articles: vec![],
            fail: true,
        };
        let b = FakeProvider {
            name: "gnews",
            articles: vec![],
            fail: true,
        };

        let agg = aggregate_top_headlines(&[&a, &b], &top_params()).await;

        assert!(agg.articles.is_empty());
        assert_eq!(agg.failed_providers, vec!["newsapi", "gnews"]);
    }

    #[test]
    fn fingerprint_is_stable_per_params() {
        let params = top_params();
        assert_eq!(
            fingerprint("newsapi", "headlines", &params),
            fingerprint("newsapi", "headlines", &params)
        );
        let mut other = top_params();
        other.category = "science".into();
        assert_ne!(
            fingerprint("newsapi", "headlines", &params),
            fingerprint("newsapi", "headlines", &other)
        );
    }

    #[test]
    fn fingerprint_does_not_collide_across_field_boundaries() {
        let search = |q: &str, sort_by: &str| SearchParams {
            q: q.into(),
            sort_by: sort_by.into(),
            language: "en".into(),
            page_size: 20,
        };
        assert_ne!(
            fingerprint("newsapi", "search", &search("a|b", "c")),
            fingerprint("newsapi", "search", &search("a", "b|c"))
        );
    }
}
