use serde::{Deserialize, Serialize};
use std::env;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub alphavantage_api_key: String,
    pub alphavantage_base_url: String,
    pub public_base_url: String,
    pub weather_image_dir: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Missing API keys are not a startup error: the upstream call is
        // simply sent with an empty key and rejected by the provider.
        let openweather_api_key = env::var("OPEN_WEATHER_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("OPEN_WEATHER_API_KEY not set, weather lookups will fail upstream");
            String::new()
        });
        let alphavantage_api_key = env::var("ALPHA_VANTAGE_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("ALPHA_VANTAGE_API_KEY not set, stock lookups will fail upstream");
            String::new()
        });

        Ok(Config {
            openweather_api_key,
            openweather_base_url: env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| "http://api.openweathermap.org".to_string()),
            alphavantage_api_key,
            alphavantage_base_url: env::var("ALPHAVANTAGE_BASE_URL")
                .unwrap_or_else(|_| "https://www.alphavantage.co".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            weather_image_dir: env::var("WEATHER_IMAGE_DIR")
                .unwrap_or_else(|_| "weather/image".to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            openweather_api_key: "test-ow-key".to_string(),
            openweather_base_url: "http://api.openweathermap.org".to_string(),
            alphavantage_api_key: "test-av-key".to_string(),
            alphavantage_base_url: "https://www.alphavantage.co".to_string(),
            public_base_url: "http://localhost:8080".to_string(),
            weather_image_dir: "weather/image".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
        }
    }
}
