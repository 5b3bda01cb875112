use super::types::*;
use super::{ProviderError, QuoteProvider, WeatherProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned weather provider. Counts invocations so tests can assert exactly
/// how many upstream calls a request path issued.
pub struct MockWeatherProvider {
    calls: AtomicUsize,
    fail: bool,
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn canned_response(zip: &str) -> OpenWeatherZipResponse {
        OpenWeatherZipResponse {
            name: format!("City {}", zip),
            weather: vec![WeatherCondition {
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
            main: WeatherMain {
                temp: 285.0,
                temp_min: 283.0,
                temp_max: 287.0,
            },
        }
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn fetch_by_zip(&self, zip: &str) -> Result<OpenWeatherZipResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::Api("HTTP 401: invalid api key".to_string()));
        }
        Ok(Self::canned_response(zip))
    }
}

/// Canned quote provider with the same call-counting scheme.
pub struct MockQuoteProvider {
    calls: AtomicUsize,
    fail: bool,
}

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn canned_response(symbol: &str) -> DailySeriesResponse {
        let mut time_series = HashMap::new();
        time_series.insert(
            "2021-05-01".to_string(),
            DailyBar {
                open: "10.0".to_string(),
                high: "12.0".to_string(),
                low: "9.5".to_string(),
                close: "11.0".to_string(),
                volume: "1000".to_string(),
            },
        );

        DailySeriesResponse {
            meta_data: SeriesMetaData {
                symbol: symbol.to_string(),
                last_refreshed: "2021-05-01 16:00:00".to_string(),
            },
            time_series,
        }
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    async fn fetch_daily_series(
        &self,
        symbol: &str,
    ) -> Result<DailySeriesResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::Api("HTTP 503: service unavailable".to_string()));
        }
        Ok(Self::canned_response(symbol))
    }
}
