//! Pure mapping from a [`WeatherReading`](crate::WeatherReading) to the strings
//! and backdrop the widget displays.

use chrono::{NaiveDateTime, Timelike};

use crate::model::TemperatureUnit;

/// First hour counted as daytime.
pub const DAY_START_HOUR: u32 = 6;
/// First hour counted as night again.
pub const NIGHT_START_HOUR: u32 = 18;

/// Canned sentences keyed by lower-cased provider condition text.
const WEATHER_MESSAGES: &[(&str, &str)] = &[
    ("sunny", "It's a beautiful sunny day!"),
    ("partly cloudy", "Expect some clouds and sunshine."),
    ("cloudy", "It's cloudy today."),
    ("overcast", "The sky is overcast."),
    ("rain", "Don't forget your umbrella! It's raining."),
    ("thunderstorm", "Thunderstorms are expected today."),
    ("snow", "Bundle up! It's snowing."),
    ("mist", "It's misty outside."),
    ("fog", "Be careful, there's fog outside."),
];

const LOCAL_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub fn temperature_message(temperature: f64, unit: TemperatureUnit) -> String {
    // -0.0 prints as "-0"
    let temperature = temperature + 0.0;

    match unit {
        TemperatureUnit::Celsius => {
            if temperature < 0.0 {
                format!("It's freezing at {temperature}°C! Bundle up!")
            } else if temperature < 10.0 {
                format!("It's quite cold at {temperature}°C. Wear warm clothes.")
            } else if temperature < 20.0 {
                format!("The temperature is {temperature}°C. Comfortable for a light jacket.")
            } else if temperature < 30.0 {
                format!("It's a pleasant {temperature}°C. Enjoy the nice weather!")
            } else {
                format!("It's hot at {temperature}°C. Stay hydrated!")
            }
        }
        other => format!("{temperature}°{}", other.label()),
    }
}

/// Case-insensitive lookup; unknown descriptions come back unchanged.
pub fn weather_message(description: &str) -> String {
    let lower = description.to_lowercase();

    WEATHER_MESSAGES
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, message)| (*message).to_string())
        .unwrap_or_else(|| description.to_string())
}

pub fn location_message(location: &str, is_day_time: bool) -> String {
    if is_day_time {
        format!("{location} During the Day")
    } else {
        format!("{location} at Night")
    }
}

/// Local hour of a provider timestamp, if it parses.
pub fn local_hour(local_time: &str) -> Option<u32> {
    let trimmed = local_time.trim();

    LOCAL_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.hour())
}

/// Daytime is `[06:00, 18:00)` local. Unparseable timestamps count as night.
pub fn is_day_time(local_time: &str) -> bool {
    local_hour(local_time).is_some_and(|hour| (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour))
}

/// Background art behind the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Day,
    Night,
}

impl Backdrop {
    pub fn for_daylight(is_day_time: bool) -> Self {
        if is_day_time { Backdrop::Day } else { Backdrop::Night }
    }

    /// Asset name the host resolves; loading it is the host's business.
    pub fn asset(&self) -> &'static str {
        match self {
            Backdrop::Day => "images/day.jpg",
            Backdrop::Night => "images/night.jpg",
        }
    }
}
