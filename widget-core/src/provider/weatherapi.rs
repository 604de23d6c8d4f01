use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::ProviderSettings,
    model::{TemperatureUnit, WeatherReading},
};

use super::WeatherProvider;

const CURRENT_PATH: &str = "/v1/current.json";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    url: String,
    unit: TemperatureUnit,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        if settings.api_key.is_empty() {
            warn!("No WeatherAPI key configured; requests will be rejected by the provider");
        }

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        let url = format!("{}{}", settings.base_url.trim_end_matches('/'), CURRENT_PATH);

        Ok(Self { api_key: settings.api_key, url, unit: settings.unit, http })
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    temp_f: Option<f64>,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl WaResponse {
    fn into_reading(self, unit: TemperatureUnit) -> WeatherReading {
        let temperature = match unit {
            TemperatureUnit::Celsius => self.current.temp_c,
            TemperatureUnit::Fahrenheit => self
                .current
                .temp_f
                .unwrap_or_else(|| self.current.temp_c * 9.0 / 5.0 + 32.0),
        };

        WeatherReading {
            temperature,
            description: self.current.condition.text,
            location: self.location.name,
            unit,
            local_time: self.location.localtime,
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, location: &str) -> Result<WeatherReading> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("key", self.api_key.as_str()), ("q", location)])
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (current)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read WeatherAPI current response body")?;

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "City not found: WeatherAPI responded with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: WaResponse =
            serde_json::from_str(&body).context("Failed to parse WeatherAPI current JSON")?;

        let reading = parsed.into_reading(self.unit);
        debug!(?reading, "WeatherAPI reading parsed");

        Ok(reading)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
