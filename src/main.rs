use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cache;
mod config;
mod errors;
mod providers;
mod routes;

use cache::{TtlCache, FRESHNESS_WINDOW_MS};
use config::Config;
use providers::{alphavantage::AlphaVantageClient, openweather::OpenWeatherClient};
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_stocks_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize upstream clients
    let weather_provider = Arc::new(OpenWeatherClient::new(config.clone()));
    let quote_provider = Arc::new(AlphaVantageClient::new(config.clone()));

    // One cache per resource kind, both with the same one-minute window
    let weather_cache = Arc::new(TtlCache::new(FRESHNESS_WINDOW_MS));
    let quote_cache = Arc::new(TtlCache::new(FRESHNESS_WINDOW_MS));

    let bind_addr = config.bind_addr.clone();

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        weather_provider,
        quote_provider,
        weather_cache,
        quote_cache,
    };

    let app = create_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server starting on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
