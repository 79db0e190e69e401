use anyhow::{Context, Result, bail};
use std::{
    env,
    ffi::OsString,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

/// Environment variable through which the runner names the outputs file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Destination for named action outputs.
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// The append-only `name=value` file the Actions runner reads after the step.
///
/// Refs: <https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions#setting-an-output-parameter>
#[derive(Debug, Clone)]
pub struct GithubOutputFile {
    path: PathBuf,
}

impl GithubOutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the file from `GITHUB_OUTPUT`. Unset or empty is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(env::var_os(GITHUB_OUTPUT_ENV))
    }

    /// Resolve the file from an already-read `GITHUB_OUTPUT` value.
    pub fn from_env_value(value: Option<OsString>) -> Result<Self> {
        match value {
            Some(v) if !v.is_empty() => Ok(Self::new(v)),
            Some(_) => bail!("{GITHUB_OUTPUT_ENV} is set but empty"),
            None => bail!(
                "{GITHUB_OUTPUT_ENV} is not set.\n\
                 Hint: this binary is meant to run as a GitHub Actions step."
            ),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for GithubOutputFile {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        // Multi-line values need the heredoc form, which we never emit.
        if name.contains(['=', '\n']) || value.contains('\n') {
            bail!("Output {name:?} cannot be written as a single name=value line");
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open outputs file: {}", self.path.display()))?;

        writeln!(file, "{name}={value}")
            .with_context(|| format!("Failed to write outputs file: {}", self.path.display()))?;

        Ok(())
    }
}
