pub mod auth;
pub mod news;
pub mod users;

use std::{error::Error, sync::Arc, time::Duration};

use axum::{response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use http::StatusCode;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub use auth::auth_routes;
pub use news::news_routes;
pub use users::user_routes;

use crate::{
    services::{gnews::GNewsClient, newsapi::NewsApiClient},
    utils::{cache::Cache, config::Config, state::AppState},
};

const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn make_app() -> Result<Router, Box<dyn Error>> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let filter = filter::Targets::new()
        .with_target("tower_http::trace::on_response", Level::TRACE)
        .with_target("tower_http::trace::on_request", Level::TRACE)
        .with_target("tower_http::trace::make_span", Level::DEBUG)
        .with_target("axum::rejection", Level::TRACE)
        .with_target(env!("CARGO_PKG_NAME").replace('-', "_"), level)
        .with_default(Level::INFO);

    let tracing_layer = tracing_subscriber::fmt::layer();

    Registry::default().with(tracing_layer).with(filter).init();

    info!("Initializing application...");
    let config = Config::init();
    info!("Configuration loaded successfully");

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Some(Duration::from_secs(60)))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    info!("Database connection pool created successfully");

    // outbound provider calls carry an explicit total timeout
    let http_client = reqwest::Client::builder()
        .timeout(OUTBOUND_TIMEOUT)
        .build()?;

    // one process-wide response cache shared by both provider clients;
    // fingerprints are prefixed with the provider name so keys never collide
    let response_cache = Arc::new(Cache::new());
    let news_api = NewsApiClient::new(
        config.newsapi_key.clone(),
        config.newsapi_base_url.clone(),
        http_client.clone(),
        response_cache.clone(),
    );
    let gnews = GNewsClient::new(
        config.gnews_api_key.clone(),
        config.gnews_base_url.clone(),
        http_client.clone(),
        response_cache,
    );
    info!("External clients initialized successfully");

    let state = Arc::new(AppState {
        db_pool,
        config,
        news_api,
        gnews,
    });

    let app = Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/users", user_routes(state.clone()))
        .nest("/api/news", news_routes(state.clone()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    info!("Application initialized successfully");

    Ok(app)
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "API is running",
            "timestamp": Utc::now().to_rfc3339()
        })),
    )
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"success": false, "message": "Route not found"})),
    )
}
