use crate::{
    presentation::{self, Backdrop},
    widget::WeatherWidget,
};

pub const TITLE: &str = "Weather Widget";
pub const SUBTITLE: &str = "Search for the current weather conditions in your city.";
pub const PLACEHOLDER: &str = "Enter a city name";

/// The three lines painted on the card for a stored reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingCard {
    pub temperature: String,
    pub weather: String,
    pub location: String,
}

/// Everything a render surface needs to paint the widget, already mapped to
/// display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub placeholder: &'static str,
    pub input: String,
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub error: Option<String>,
    pub card: Option<ReadingCard>,
    pub backdrop: Backdrop,
}

impl WidgetView {
    pub fn from_widget(widget: &WeatherWidget) -> Self {
        let is_day_time = widget.is_day_time();

        let card = widget.reading().map(|reading| ReadingCard {
            temperature: presentation::temperature_message(reading.temperature, reading.unit),
            weather: presentation::weather_message(&reading.description),
            location: presentation::location_message(&reading.location, is_day_time),
        });

        Self {
            title: TITLE,
            subtitle: SUBTITLE,
            placeholder: PLACEHOLDER,
            input: widget.input().to_owned(),
            button_label: if widget.is_loading() { "Loading..." } else { "Search" },
            button_enabled: !widget.is_loading(),
            error: widget.error().map(|e| e.to_string()),
            card,
            backdrop: Backdrop::for_daylight(is_day_time),
        }
    }
}
