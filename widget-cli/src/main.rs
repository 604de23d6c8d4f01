//! Binary crate for the `weather-widget` terminal front-end.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the search prompt
//! - Painting the widget view in the terminal

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}

/// `RUST_LOG` wins; otherwise verbosity picks the level. Logs go to stderr so
/// they never interleave with the rendered card.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "off",
        1 => "weather_widget=info,weather_widget_core=info",
        _ => "weather_widget=debug,weather_widget_core=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
