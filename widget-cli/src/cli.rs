use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use weather_widget_core::{
    Config, TemperatureUnit, WeatherProvider, WeatherWidget, provider_from_settings,
    view::PLACEHOLDER,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather, one city at a time")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and preferred unit.
    Configure,

    /// Show current weather for a location.
    Show {
        /// City or location name.
        location: String,

        /// Temperature unit: "celsius" or "fahrenheit".
        #[arg(long)]
        unit: Option<String>,
    },

    /// Prompt for cities until cancelled (Esc or Ctrl-C).
    Interactive {
        /// Temperature unit: "celsius" or "fahrenheit".
        #[arg(long)]
        unit: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, unit } => {
                let mut widget = build_widget(unit.as_deref())?;
                widget.set_input(location);
                widget.search().await;
                print!("{}", render::render(&widget.view()));
                Ok(())
            }
            Command::Interactive { unit } => {
                let widget = build_widget(unit.as_deref())?;
                interactive(widget).await
            }
        }
    }
}

/// Load config, apply environment and flag overrides, and wire the widget.
fn build_widget(unit: Option<&str>) -> anyhow::Result<WeatherWidget> {
    let mut config = Config::load()?.with_env_overrides()?;

    if let Some(unit) = unit {
        config.unit = Some(TemperatureUnit::try_from(unit)?);
    }

    if config.api_key().is_none() {
        eprintln!(
            "No WeatherAPI key configured; searches will fail.\n\
             Hint: run `weather-widget configure` or set WEATHER_API_KEY."
        );
    }

    let provider = provider_from_settings(config.provider_settings())?;
    Ok(WeatherWidget::new(provider))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_owned());

    let current = config.unit();
    let start = TemperatureUnit::all().iter().position(|u| *u == current).unwrap_or(0);
    let unit = Select::new("Temperature unit:", TemperatureUnit::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read temperature unit")?;
    config.unit = Some(unit);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

/// One prompt per submission; the next prompt only appears once the previous
/// search has settled, so there is never more than one request in flight.
async fn interactive(mut widget: WeatherWidget) -> anyhow::Result<()> {
    print!("{}", render::render(&widget.view()));

    loop {
        let input = match Text::new("City:").with_placeholder(PLACEHOLDER).prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read location"),
        };

        widget.set_input(input);

        if let Some(ticket) = widget.begin_search() {
            println!("{}", render::status_line(&widget.view()));
            let result = widget.provider().current(ticket.query()).await;
            widget.complete(ticket, result);
        }

        print!("{}", render::render(&widget.view()));
    }

    Ok(())
}
