use super::types::*;
use super::{ProviderError, WeatherProvider};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub struct OpenWeatherClient {
    client: Client,
    config: Config,
}

impl OpenWeatherClient {
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
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_by_zip(&self, zip: &str) -> Result<OpenWeatherZipResponse, ProviderError> {
        let url = format!("{}/data/2.5/weather", self.config.openweather_base_url);
        let zip_country = format!("{},us", zip);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("zip", zip_country.as_str()),
                ("appid", &self.config.openweather_api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let json: Value = response.json().await?;
        let weather: OpenWeatherZipResponse = serde_json::from_value(json)?;
        Ok(weather)
    }
}

// Translate the raw provider body into the shape we serve.
impl WeatherReport {
    pub fn from_upstream(
        raw: &OpenWeatherZipResponse,
        public_base_url: &str,
    ) -> Result<Self, ProviderError> {
        let condition = raw.weather.first().ok_or_else(|| {
            ProviderError::UnexpectedShape("weather condition list is empty".to_string())
        })?;

        // The icon image is served by our own static route, not upstream.
        let icon_url = format!("{}/weather/image/{}.jpg", public_base_url, condition.icon);

        Ok(Self {
            name: raw.name.clone(),
            condition: condition.main.clone(),
            description: condition.description.clone(),
            icon_url,
            temp: raw.main.temp,
            temp_min: raw.main.temp_min,
            temp_max: raw.main.temp_max,
        })
    }
}
