//! Binary crate for the `weather-action` GitHub action step.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Setting up logging on stderr, leaving stdout to the result line
//! - Handing off to `weather_core::action`

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cmd.log_level().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    cmd.run().await
}
