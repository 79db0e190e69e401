//! Core library for the `weather-action` GitHub action.
//!
//! This crate defines:
//! - The weather fetcher abstraction and its OpenWeather implementation
//! - Shared domain models (query, report) and the failure taxonomy
//! - The action output sink and the single-run orchestration
//! - Optional on-disk configuration
//!
//! The fetcher is independent of the sink, so it can be reused by other
//! binaries or services.

pub mod action;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod sink;

pub use action::Outcome;
pub use config::{Config, OpenWeatherConfig};
pub use error::FetchError;
pub use model::{WeatherQuery, WeatherReport};
pub use provider::{WeatherFetcher, fetcher_from_config, openweather::OpenWeatherClient};
pub use sink::{GithubOutputFile, OutputSink};
