use std::net::SocketAddr;

use axum::{Router, routing::get, response::Html};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use solar_yield_sim::api_docs::ApiDoc;
use solar_yield_sim::config::Config;
use solar_yield_sim::routes::estimation_routes::api_routes;
use solar_yield_sim::shared_state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("solar_yield_sim=info,tower_http=info")),
        )
        .init();

    // 1. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load config.json: {}", e);
            return;
        }
    };
    tracing::info!(
        month = %config.defaults.month,
        seeded = config.engine.seed.is_some(),
        "Configuration loaded"
    );

    // 2. Initialize shared state with the first regeneration
    let state = match AppState::new(config.defaults.clone(), config.filter.clone(), config.engine.seed) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Invalid default configuration: {}", e);
            return;
        }
    };

    // 3. Start Axum HTTP server
    let app = Router::new()
        .nest("/api", api_routes(state))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("API Server listening on http://{}", addr);
    tracing::info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("Server error: {}", e);
    }
}
