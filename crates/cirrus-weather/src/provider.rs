//! OpenWeatherMap current-weather client.

use async_trait::async_trait;
use cirrus_core::{ReqwestErrorExt, WeatherApiConfig, WeatherError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{WeatherQuery, WeatherReport};

const WEATHER_PATH: &str = "/data/2.5/weather";
const UNITS: &str = "metric";

/// Source of current weather reports.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError>;
}

#[derive(Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for WeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeatherProvider {
    pub fn new(config: &WeatherApiConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        Ok(Self {
            client: Arc::new(client),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the request URL for a query.
    pub fn request_url(&self, query: &WeatherQuery) -> String {
        match query {
            WeatherQuery::City(name) => format!(
                "{}{}?q={}&appid={}&units={}",
                self.base_url,
                WEATHER_PATH,
                urlencoding::encode(name),
                urlencoding::encode(&self.api_key),
                UNITS
            ),
            WeatherQuery::Coordinates(c) => format!(
                "{}{}?lat={}&lon={}&appid={}&units={}",
                self.base_url,
                WEATHER_PATH,
                c.latitude,
                c.longitude,
                urlencoding::encode(&self.api_key),
                UNITS
            ),
        }
    }
}

#[async_trait]
impl WeatherApi for WeatherProvider {
    #[instrument(skip(self, query), fields(query = %query), level = "info")]
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError> {
        let url = self.request_url(query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Weather API returned status {}", status);
            return Err(WeatherError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let report: WeatherReport =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        if report.weather.is_empty() {
            return Err(WeatherError::Parse(
                "response has no weather conditions".to_string(),
            ));
        }

        tracing::debug!("Fetched weather for {}", report.name);
        Ok(report)
    }
}
