use std::{ffi::OsString, io, path::PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, builder::NonEmptyStringValueParser};
use tracing::debug;
use weather_core::{
    Config, GithubOutputFile, WeatherQuery, action, fetcher_from_config,
    sink::GITHUB_OUTPUT_ENV,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-action",
    version,
    about = "Fetch weather details for a city"
)]
pub struct Cli {
    /// Name of the city.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub city: String,

    /// API key for OpenWeatherMap.
    #[arg(
        long = "api_key",
        visible_alias = "api-key",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub api_key: String,

    /// Config file; defaults to config.toml in the platform config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the requested verbosity; `RUST_LOG` wins over it.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        self.run_with_output(std::env::var_os(GITHUB_OUTPUT_ENV)).await
    }

    /// Run against the given `GITHUB_OUTPUT` value. Everything fallible is
    /// resolved before the network is touched.
    async fn run_with_output(self, output: Option<OsString>) -> anyhow::Result<()> {
        let mut sink = GithubOutputFile::from_env_value(output)?;
        let config = Config::load(self.config.as_deref())?;
        let fetcher = fetcher_from_config(&config)?;

        debug!(output = %sink.path().display(), "Resolved action outputs file");

        let query = WeatherQuery::new(self.city, self.api_key);
        let mut stdout = io::stdout().lock();

        action::run(fetcher.as_ref(), &mut sink, &query, &mut stdout)
            .await
            .context("Failed to report weather result")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::fs;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn write_config(dir: &std::path::Path, mock_server: &MockServer) -> PathBuf {
        let config_path = dir.join("config.toml");
        fs::write(
            &config_path,
            format!("[openweather]\nbase_url = \"{}/data/2.5\"\n", mock_server.uri()),
        )
        .expect("write config");
        config_path
    }

    fn cli_with_config(config_path: &std::path::Path) -> Cli {
        let config_arg = config_path.to_str().expect("utf-8 temp path");
        Cli::try_parse_from([
            "weather-action",
            "--city",
            "London",
            "--api_key",
            "valid",
            "--config",
            config_arg,
        ])
        .expect("valid arguments")
    }

    #[tokio::test]
    async fn missing_output_env_stops_before_any_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let cli = cli_with_config(&write_config(dir.path(), &mock_server));

        let err = cli.run_with_output(None).await.unwrap_err();
        assert!(err.to_string().contains("GITHUB_OUTPUT is not set"));
    }

    #[tokio::test]
    async fn run_records_result_in_outputs_file() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"cod":200,"weather":[{"main":"Clear"}],"main":{"temp":15.0,"temp_min":13.0,"temp_max":17.0}}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let output_path = dir.path().join("github_output");
        let cli = cli_with_config(&write_config(dir.path(), &mock_server));

        cli.run_with_output(Some(output_path.clone().into_os_string()))
            .await
            .expect("run completes");

        assert_eq!(
            fs::read_to_string(&output_path).expect("outputs file"),
            "result={'weather': 'Clear', 'temperature': 15.0, 'min_temperature': 13.0, 'max_temperature': 17.0}\n"
        );
    }

    #[test]
    fn parses_required_flags() {
        let cli = Cli::try_parse_from(["weather-action", "--city", "London", "--api_key", "KEY"])
            .expect("valid arguments");

        assert_eq!(cli.city, "London");
        assert_eq!(cli.api_key, "KEY");
        assert_eq!(cli.config, None);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn accepts_dashed_api_key_alias() {
        let cli = Cli::try_parse_from(["weather-action", "--city", "Paris", "--api-key", "KEY"])
            .expect("valid arguments");

        assert_eq!(cli.api_key, "KEY");
    }

    #[test]
    fn missing_city_is_a_usage_error() {
        let err = Cli::try_parse_from(["weather-action", "--api_key", "KEY"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn missing_api_key_is_a_usage_error() {
        let err = Cli::try_parse_from(["weather-action", "--city", "London"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn empty_city_is_rejected() {
        let err = Cli::try_parse_from(["weather-action", "--city", "", "--api_key", "KEY"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn verbosity_counts_up() {
        let cli = Cli::try_parse_from([
            "weather-action",
            "--city",
            "London",
            "--api_key",
            "KEY",
            "-vv",
        ])
        .expect("valid arguments");

        assert_eq!(cli.log_level(), "debug");
    }
}
