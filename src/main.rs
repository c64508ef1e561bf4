mod handlers;
mod models;
mod routes;
mod services;
mod utils;

use tokio::net::TcpListener;
use tracing::info;

use routes::make_app;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let app = match make_app().await {
        Ok(app) => app,
        Err(err) => panic!("Failed to initialize application: {}", err),
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(5000);

    let listener = TcpListener::bind(("0.0.0.0", port)).await;
    info!("Listening on http://0.0.0.0:{}", port);

    match listener {
        Ok(res) => axum::serve(res, app).await.unwrap(),
        Err(err) => panic!("{}", err),
    }
}
