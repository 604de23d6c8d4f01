use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Unit a reading's temperature is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Short label shown after the degree sign.
    pub fn label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: celsius (c), fahrenheit (f)."
            )),
        }
    }
}

/// Current conditions at a location, normalised from the provider response.
///
/// A reading is only ever stored whole: the widget either holds the result of
/// the last successful search or nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: f64,
    pub description: String,
    /// Place name as resolved by the provider, which may differ from the query.
    pub location: String,
    pub unit: TemperatureUnit,
    /// Provider local timestamp at the location, e.g. `2024-06-01 7:05`.
    pub local_time: String,
}
