use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Raw OpenWeather current-weather-by-zip shape. Only the fields we translate
// are modeled; the provider sends plenty more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherZipResponse {
    pub name: String,
    pub weather: Vec<WeatherCondition>,
    pub main: WeatherMain,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

// Raw Alpha Vantage TIME_SERIES_DAILY shape. The provider keys everything
// with numbered labels and sends all prices as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySeriesResponse {
    #[serde(rename = "Meta Data")]
    pub meta_data: SeriesMetaData,
    #[serde(rename = "Time Series (Daily)")]
    pub time_series: HashMap<String, DailyBar>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesMetaData {
    #[serde(rename = "2. Symbol")]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed")]
    pub last_refreshed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

/// Weather payload served to clients. Temperatures stay in the provider's
/// raw units (Kelvin); field names stay camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub name: String,
    pub condition: String,
    pub description: String,
    pub icon_url: String,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

/// Most-recent-trading-day quote served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyQuote {
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}
