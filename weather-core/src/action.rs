//! One run of the action: fetch, report on stdout, record the `result` output.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::{info, warn};

use crate::{FetchError, OutputSink, WeatherFetcher, WeatherQuery, WeatherReport};

/// Name of the action output.
pub const RESULT_OUTPUT: &str = "result";

/// Value recorded for any recognized failure; the cause only goes to stdout.
pub const FAILURE_TOKEN: &str = "failure";

pub type Outcome = Result<WeatherReport, FetchError>;

/// Fetch once, print one line to `stdout`, and write one `result` output.
///
/// Recognized fetch failures are part of the returned [`Outcome`]; the error
/// side of the outer `Result` is only for stdout or sink I/O.
pub async fn run<F, S, W>(
    fetcher: &F,
    sink: &mut S,
    query: &WeatherQuery,
    stdout: &mut W,
) -> Result<Outcome>
where
    F: WeatherFetcher + ?Sized,
    S: OutputSink + ?Sized,
    W: Write,
{
    let outcome = fetcher.fetch(query).await;

    match &outcome {
        Ok(report) => {
            info!(city = %query.city, "Weather lookup succeeded");
            writeln!(stdout, "Weather in {}: {}", query.city, report)
                .context("Failed to write to stdout")?;
            sink.set_output(RESULT_OUTPUT, &report.to_string())?;
        }
        Err(err) => {
            warn!(city = %query.city, error = %err, "Weather lookup failed");
            writeln!(stdout, "{err}").context("Failed to write to stdout")?;
            sink.set_output(RESULT_OUTPUT, FAILURE_TOKEN)?;
        }
    }

    Ok(outcome)
}
