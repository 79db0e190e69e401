use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One lookup: the location query and the credential it is made with.
#[derive(Clone)]
pub struct WeatherQuery {
    pub city: String,
    pub api_key: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            api_key: api_key.into(),
        }
    }
}

// Keep the credential out of logs and panic messages.
impl fmt::Debug for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherQuery")
            .field("city", &self.city)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Current conditions for a city, temperatures in Celsius.
///
/// Temperatures keep the upstream JSON number as sent: an integer stays an
/// integer when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub weather: String,
    pub temperature: Number,
    pub min_temperature: Number,
    pub max_temperature: Number,
}

/// Renders the report as a mapping literal, the format consumers of the
/// `result` output already parse:
///
/// `{'weather': 'Clear', 'temperature': 15.0, 'min_temperature': 13.0, 'max_temperature': 17.0}`
impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'weather': {}, 'temperature': {}, 'min_temperature': {}, 'max_temperature': {}}}",
            quote_str(&self.weather),
            self.temperature,
            self.min_temperature,
            self.max_temperature,
        )
    }
}

/// Quote a string literal: single quotes unless the text contains a single
/// quote and no double quote.
fn quote_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
