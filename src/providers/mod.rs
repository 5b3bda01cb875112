pub mod alphavantage;
pub mod mock;
pub mod openweather;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use self::types::{DailySeriesResponse, OpenWeatherZipResponse};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Fetches current weather for a US postal code.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_by_zip(&self, zip: &str) -> Result<OpenWeatherZipResponse, ProviderError>;
}

/// Fetches the full daily time series for a ticker symbol.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_daily_series(&self, symbol: &str)
        -> Result<DailySeriesResponse, ProviderError>;
}
