use super::types::*;
use super::{ProviderError, QuoteProvider};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub struct AlphaVantageClient {
    client: Client,
    config: Config,
}

impl AlphaVantageClient {
    pub fn new(config: Config) -> Self {
        let client = Client::builder()
            .user_agent("WeatherStocksServer/1.0")
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageClient {
    async fn fetch_daily_series(
        &self,
        symbol: &str,
    ) -> Result<DailySeriesResponse, ProviderError> {
        let url = format!("{}/query", self.config.alphavantage_base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("apikey", &self.config.alphavantage_api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        // Alpha Vantage answers 200 even for bad symbols or a spent quota,
        // with a body missing the time-series section; that surfaces here as
        // a parse failure.
        let json: Value = response.json().await?;
        let series: DailySeriesResponse = serde_json::from_value(json)?;
        Ok(series)
    }
}

impl DailyQuote {
    /// Selects the most recent trading day from the series: the date part of
    /// the "Last Refreshed" metadata field, truncated at the first space.
    pub fn from_series(raw: &DailySeriesResponse) -> Result<Self, ProviderError> {
        let meta = &raw.meta_data;
        let refresh_date = meta
            .last_refreshed
            .split(' ')
            .next()
            .unwrap_or(&meta.last_refreshed);

        let bar = raw.time_series.get(refresh_date).ok_or_else(|| {
            ProviderError::UnexpectedShape(format!(
                "no daily bar for last-refreshed date {}",
                refresh_date
            ))
        })?;

        Ok(Self {
            symbol: meta.symbol.clone(),
            open: parse_price(&bar.open, "open")?,
            high: parse_price(&bar.high, "high")?,
            low: parse_price(&bar.low, "low")?,
            close: parse_price(&bar.close, "close")?,
            volume: parse_price(&bar.volume, "volume")?,
        })
    }
}

fn parse_price(value: &str, field: &str) -> Result<f64, ProviderError> {
    value.parse().map_err(|_| {
        ProviderError::UnexpectedShape(format!("non-numeric {} value: {}", field, value))
    })
}
