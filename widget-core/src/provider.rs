use crate::{ProviderSettings, WeatherReading, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// Source of current conditions for a location query.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for an already trimmed, non-empty query.
    async fn current(&self, location: &str) -> anyhow::Result<WeatherReading>;
}

/// Construct the weatherapi.com provider from resolved settings.
pub fn provider_from_settings(settings: ProviderSettings) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    Ok(Arc::new(WeatherApiProvider::new(settings)?))
}
