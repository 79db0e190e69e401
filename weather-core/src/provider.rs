use crate::{
    Config, FetchError, WeatherQuery, WeatherReport, provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Something that turns a query into current conditions.
///
/// Implementations make at most one upstream request per call and never retry.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReport, FetchError>;
}

/// Construct the fetcher described by `config`.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherFetcher>> {
    let client = OpenWeatherClient::new(&config.openweather)?;
    Ok(Box::new(client))
}
