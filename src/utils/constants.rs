pub const NEWS_CATEGORIES: &[&str] = &[
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

pub const NEWS_SOURCES: &[&str] = &["newsapi", "gnews", "newscatcher", "newsapi-ai"];

pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_COUNTRY: &str = "us";
