//! Core library for the `weather-widget` front-end.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and the weatherapi.com client
//! - The widget state (input, loading, error, last reading)
//! - Pure presentation mapping and the render-ready view
//!
//! It is used by the `weather-widget` binary, but can be embedded by any other
//! render surface.

pub mod config;
pub mod error;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod view;
pub mod widget;

pub use config::{Config, ProviderSettings};
pub use error::WidgetError;
pub use model::{TemperatureUnit, WeatherReading};
pub use presentation::Backdrop;
pub use provider::{WeatherProvider, provider_from_settings};
pub use view::{ReadingCard, WidgetView};
pub use widget::{Completion, SearchTicket, WeatherWidget};
