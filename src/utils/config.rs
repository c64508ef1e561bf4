#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub newsapi_key: String,
    pub gnews_api_key: String,
    pub newsapi_base_url: String,
    pub gnews_base_url: String,
}

impl Config {
    pub fn init() -> Self {
        Config {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL not set"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET not set"),
            newsapi_key: std::env::var("NEWSAPI_KEY").expect("NEWSAPI_KEY not set"),
            gnews_api_key: std::env::var("GNEWS_API_KEY").expect("GNEWS_API_KEY not set"),
            newsapi_base_url: std::env::var("NEWSAPI_BASE_URL")
                .unwrap_or_else(|_| "https://newsapi.org/v2".to_string()),
            gnews_base_url: std::env::var("GNEWS_BASE_URL")
                .unwrap_or_else(|_| "https://gnews.io/api/v4".to_string()),
        }
    }
}
