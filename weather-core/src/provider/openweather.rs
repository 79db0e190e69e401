use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::{debug, info, instrument};

use crate::{FetchError, WeatherQuery, WeatherReport, config::OpenWeatherConfig};

use super::WeatherFetcher;

/// Unit system sent with every request; temperatures come back in Celsius.
const UNITS: &str = "metric";

/// Application status OpenWeather embeds in a successful body.
const SUCCESS_CODE: f64 = 200.0;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    /// Requests use the HTTP client's own timeouts; none are configured here.
    pub fn new(config: &OpenWeatherConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn current_weather_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    #[instrument(skip_all, fields(city = %query.city))]
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReport, FetchError> {
        let url = self.current_weather_url();
        debug!(url = %url, units = UNITS, "Requesting current weather");

        let body = self
            .http
            .get(&url)
            .query(&[
                ("q", query.city.as_str()),
                ("appid", query.api_key.as_str()),
                ("units", UNITS),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let report = parse_current(&body)?;
        info!(condition = %report.weather, temp = %report.temperature, "Received current weather");

        Ok(report)
    }
}

#[derive(Debug, Deserialize)]
struct OwStatus {
    #[serde(default)]
    cod: Value,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Number,
    temp_min: Number,
    temp_max: Number,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

/// Classify a body the transport layer accepted.
///
/// `cod` is a number on success but OpenWeather sends it as a string on some
/// errors (`"404"`); anything other than 200 is an upstream error.
fn parse_current(body: &str) -> Result<WeatherReport, FetchError> {
    let doc: Value = serde_json::from_str(body)?;

    let status = OwStatus::deserialize(&doc)?;
    if !is_success(&status.cod) {
        let message = status.message.ok_or_else(|| {
            FetchError::MalformedResponse(format!(
                "application status {} without a message",
                status.cod
            ))
        })?;
        return Err(FetchError::Upstream(message));
    }

    let parsed = OwCurrentResponse::deserialize(&doc)?;

    let weather = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .ok_or_else(|| FetchError::MalformedResponse("empty `weather` list".to_string()))?;

    Ok(WeatherReport {
        weather,
        temperature: parsed.main.temp,
        min_temperature: parsed.main.temp_min,
        max_temperature: parsed.main.temp_max,
    })
}

fn is_success(cod: &Value) -> bool {
    cod.as_f64() == Some(SUCCESS_CODE)
}
