use sqlx::PgPool;

use crate::services::gnews::GNewsClient;
use crate::services::newsapi::NewsApiClient;
use crate::utils::config::Config;

pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,
    pub news_api: NewsApiClient,
    pub gnews: GNewsClient,
}
