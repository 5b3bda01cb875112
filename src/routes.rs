use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::{
    cache::{self, TtlCache},
    config::Config,
    errors::ApiError,
    providers::{
        types::{DailyQuote, WeatherReport},
        QuoteProvider, WeatherProvider,
    },
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather_provider: Arc<dyn WeatherProvider>,
    pub quote_provider: Arc<dyn QuoteProvider>,
    pub weather_cache: Arc<TtlCache<WeatherReport>>,
    pub quote_cache: Arc<TtlCache<DailyQuote>>,
}

/// Serve-or-refresh for weather: a fresh cache entry is returned verbatim;
/// otherwise one upstream fetch, transform, and overwrite. A failed fetch
/// never populates the cache, so the next request retries upstream.
pub async fn lookup_weather(
    state: &AppState,
    zipcode: &str,
    now_ms: u64,
) -> Result<WeatherReport, ApiError> {
    if zipcode.trim().is_empty() {
        return Err(ApiError::MissingParameter("zipcode"));
    }

    if let Some(cached) = state.weather_cache.get_fresh(zipcode, now_ms) {
        tracing::debug!(zipcode, "weather cache hit");
        return Ok(cached);
    }

    let raw = state.weather_provider.fetch_by_zip(zipcode).await?;
    let report = WeatherReport::from_upstream(&raw, &state.config.public_base_url)?;
    state.weather_cache.put(zipcode, report.clone(), cache::now_ms());
    tracing::debug!(zipcode, "weather cache refreshed");
    Ok(report)
}

/// Serve-or-refresh for stock quotes, same shape as `lookup_weather`.
pub async fn lookup_quote(
    state: &AppState,
    symbol: &str,
    now_ms: u64,
) -> Result<DailyQuote, ApiError> {
    if symbol.trim().is_empty() {
        return Err(ApiError::MissingParameter("symbol"));
    }

    if let Some(cached) = state.quote_cache.get_fresh(symbol, now_ms) {
        tracing::debug!(symbol, "quote cache hit");
        return Ok(cached);
    }

    let raw = state.quote_provider.fetch_daily_series(symbol).await?;
    let quote = DailyQuote::from_series(&raw)?;
    state.quote_cache.put(symbol, quote.clone(), cache::now_ms());
    tracing::debug!(symbol, "quote cache refreshed");
    Ok(quote)
}

// Route handlers
pub async fn hello() -> &'static str {
    "HELLO WORLD!"
}

pub async fn weather_by_zip(
    State(state): State<AppState>,
    Path(zipcode): Path<String>,
) -> Result<Json<WeatherReport>, ApiError> {
    let report = lookup_weather(&state, &zipcode, cache::now_ms()).await?;
    Ok(Json(report))
}

pub async fn stock_by_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<DailyQuote>, ApiError> {
    let quote = lookup_quote(&state, &symbol, cache::now_ms()).await?;
    Ok(Json(quote))
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    let image_dir = state.config.weather_image_dir.clone();

    Router::new()
        .route("/", get(hello))
        .route("/weather/zip/:zipcode", get(weather_by_zip))
        .route("/stocks/symbol/:symbol", get(stock_by_symbol))
        .nest_service("/weather/image", ServeDir::new(image_dir))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FRESHNESS_WINDOW_MS;
    use crate::providers::mock::{MockQuoteProvider, MockWeatherProvider};

    fn test_state(
        weather: Arc<MockWeatherProvider>,
        quotes: Arc<MockQuoteProvider>,
    ) -> AppState {
        AppState {
            config: Arc::new(Config::for_tests()),
            weather_provider: weather,
            quote_provider: quotes,
            weather_cache: Arc::new(TtlCache::new(FRESHNESS_WINDOW_MS)),
            quote_cache: Arc::new(TtlCache::new(FRESHNESS_WINDOW_MS)),
        }
    }

    #[tokio::test]
    async fn test_fresh_weather_entry_skips_upstream() {
        let weather = Arc::new(MockWeatherProvider::new());
        let state = test_state(weather.clone(), Arc::new(MockQuoteProvider::new()));

        let cached = WeatherReport {
            name: "Seattle".to_string(),
            condition: "Clouds".to_string(),
            description: "overcast".to_string(),
            icon_url: "http://localhost:8080/weather/image/04d.jpg".to_string(),
            temp: 280.1,
            temp_min: 278.0,
            temp_max: 282.0,
        };
        let now = cache::now_ms();
        state.weather_cache.put("98101", cached.clone(), now);

        let report = lookup_weather(&state, "98101", now + 59_999).await.unwrap();
        assert_eq!(report, cached);
        assert_eq!(weather.call_count(), 0);
    }

    #[tokio::test]
    async fn test_weather_miss_fetches_once_and_caches() {
        let weather = Arc::new(MockWeatherProvider::new());
        let state = test_state(weather.clone(), Arc::new(MockQuoteProvider::new()));

        let before = cache::now_ms();
        let report = lookup_weather(&state, "98101", before).await.unwrap();
        assert_eq!(weather.call_count(), 1);
        assert_eq!(report.condition, "Clear");
        assert_eq!(
            report.icon_url,
            "http://localhost:8080/weather/image/01d.jpg"
        );

        let (stored, fetched_at) = state.weather_cache.get("98101").unwrap();
        assert_eq!(stored, report);
        assert!(fetched_at >= before);
    }

    #[tokio::test]
    async fn test_stale_weather_entry_refetches() {
        let weather = Arc::new(MockWeatherProvider::new());
        let state = test_state(weather.clone(), Arc::new(MockQuoteProvider::new()));

        let stale_report = WeatherReport {
            name: "Old".to_string(),
            condition: "Rain".to_string(),
            description: "drizzle".to_string(),
            icon_url: "http://localhost:8080/weather/image/09d.jpg".to_string(),
            temp: 270.0,
            temp_min: 269.0,
            temp_max: 271.0,
        };
        let now = cache::now_ms();
        state
            .weather_cache
            .put("98101", stale_report, now - FRESHNESS_WINDOW_MS);

        let report = lookup_weather(&state, "98101", now).await.unwrap();
        assert_eq!(weather.call_count(), 1);
        assert_eq!(report.condition, "Clear");

        // The stale entry was overwritten together with its timestamp.
        let (stored, fetched_at) = state.weather_cache.get("98101").unwrap();
        assert_eq!(stored.condition, "Clear");
        assert!(fetched_at >= now);
    }

    #[tokio::test]
    async fn test_quote_miss_fetches_once_and_caches() {
        let quotes = Arc::new(MockQuoteProvider::new());
        let state = test_state(Arc::new(MockWeatherProvider::new()), quotes.clone());

        let before = cache::now_ms();
        let quote = lookup_quote(&state, "ABC", before).await.unwrap();
        assert_eq!(quotes.call_count(), 1);
        assert_eq!(quote.symbol, "ABC");
        assert_eq!(quote.close, 11.0);

        let (stored, fetched_at) = state.quote_cache.get("ABC").unwrap();
        assert_eq!(stored, quote);
        assert!(fetched_at >= before);

        // A second request inside the window is served from the cache.
        let again = lookup_quote(&state, "ABC", cache::now_ms()).await.unwrap();
        assert_eq!(again, quote);
        assert_eq!(quotes.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_parameter_is_rejected() {
        let state = test_state(
            Arc::new(MockWeatherProvider::new()),
            Arc::new(MockQuoteProvider::new()),
        );

        let err = lookup_weather(&state, "  ", cache::now_ms()).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingParameter("zipcode")));

        let err = lookup_quote(&state, "", cache::now_ms()).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingParameter("symbol")));
    }

    #[tokio::test]
    async fn test_failed_fetch_does_not_populate_cache() {
        let weather = Arc::new(MockWeatherProvider::failing());
        let state = test_state(weather.clone(), Arc::new(MockQuoteProvider::new()));

        let err = lookup_weather(&state, "98101", cache::now_ms()).await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
        assert!(state.weather_cache.get("98101").is_none());

        // No negative caching: the next request goes upstream again.
        let _ = lookup_weather(&state, "98101", cache::now_ms()).await;
        assert_eq!(weather.call_count(), 2);
    }

    #[tokio::test]
    async fn test_caches_are_independent_per_key() {
        let weather = Arc::new(MockWeatherProvider::new());
        let state = test_state(weather.clone(), Arc::new(MockQuoteProvider::new()));

        let now = cache::now_ms();
        lookup_weather(&state, "98101", now).await.unwrap();
        lookup_weather(&state, "10001", now).await.unwrap();
        lookup_weather(&state, "98101", now).await.unwrap();

        assert_eq!(weather.call_count(), 2);
    }
}
