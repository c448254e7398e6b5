//! Request resolution from command-line flags and the environment.
//!
//! Each setting is resolved once, from an ordered list of sources, into an
//! immutable [`GenerationRequest`]. The first source that provides a
//! non-empty value wins:
//!
//! | Setting | 1st | 2nd | 3rd |
//! |---|---|---|---|
//! | payload | `--url` | `QR_URL` | *(error)* |
//! | directory | `--dir` | `QR_OUTPUT_DIR` | `qr_codes` |
//! | filename | `--output` | *(none)* | *(generated)* |
//!
//! `--dir` carries no clap default, so an omitted flag and a flag explicitly
//! set to `qr_codes` are different: only the omitted one lets
//! `QR_OUTPUT_DIR` through.
//!
//! Resolution is a pure function over a [`CliSource`] and an [`Environment`]
//! snapshot. Nothing here touches the filesystem.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Payload fallback when `--url` is absent.
pub const PAYLOAD_ENV: &str = "QR_URL";

/// Directory override when `--dir` is absent.
pub const DIRECTORY_ENV: &str = "QR_OUTPUT_DIR";

/// Directory used when neither `--dir` nor `QR_OUTPUT_DIR` is set.
pub const DEFAULT_OUTPUT_DIR: &str = "qr_codes";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("URL is required either via --url argument or QR_URL environment variable")]
    MissingPayload,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Environment,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Flag => f.write_str("flag"),
            Source::Environment => f.write_str("environment"),
            Source::Default => f.write_str("default"),
        }
    }
}

/// Values as given on the command line. `None` means the flag was omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliSource {
    pub url: Option<String>,
    pub dir: Option<PathBuf>,
    pub output: Option<String>,
}

/// Snapshot of the process environment, taken once at startup.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment. Non-UTF-8 entries are skipped.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `name`, treating an empty value as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// One fully resolved invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    payload: String,
    output_directory: PathBuf,
    filename: Option<String>,
    payload_source: Source,
    directory_source: Source,
}

impl GenerationRequest {
    /// Build a request directly, e.g. from library callers.
    ///
    /// Fails with [`ConfigError::MissingPayload`] if `payload` is empty.
    pub fn new(
        payload: impl Into<String>,
        output_directory: impl Into<PathBuf>,
        filename: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::with_sources(
            payload.into(),
            output_directory.into(),
            filename,
            Source::Flag,
            Source::Flag,
        )
    }

    fn with_sources(
        payload: String,
        output_directory: PathBuf,
        filename: Option<String>,
        payload_source: Source,
        directory_source: Source,
    ) -> Result<Self, ConfigError> {
        if payload.is_empty() {
            return Err(ConfigError::MissingPayload);
        }
        Ok(Self {
            payload,
            output_directory,
            filename,
            payload_source,
            directory_source,
        })
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn output_directory(&self) -> &std::path::Path {
        &self.output_directory
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn payload_source(&self) -> Source {
        self.payload_source
    }

    pub fn directory_source(&self) -> Source {
        self.directory_source
    }
}

/// First layer with a value, tagged with its source.
fn first_layer<T>(layers: impl IntoIterator<Item = (Source, Option<T>)>) -> Option<(Source, T)> {
    layers
        .into_iter()
        .find_map(|(source, value)| value.map(|v| (source, v)))
}

/// Resolve flags and environment into a [`GenerationRequest`].
pub fn resolve(cli: &CliSource, env: &Environment) -> Result<GenerationRequest, ConfigError> {
    let (payload_source, payload) = first_layer([
        (Source::Flag, cli.url.clone().filter(|u| !u.is_empty())),
        (Source::Environment, env.get(PAYLOAD_ENV).map(str::to_string)),
    ])
    .ok_or(ConfigError::MissingPayload)?;

    let (directory_source, directory) = first_layer([
        (
            Source::Flag,
            cli.dir.clone().filter(|d| !d.as_os_str().is_empty()),
        ),
        (Source::Environment, env.get(DIRECTORY_ENV).map(PathBuf::from)),
    ])
    .unwrap_or_else(|| (Source::Default, PathBuf::from(DEFAULT_OUTPUT_DIR)));

    let filename = cli.output.clone().filter(|f| !f.is_empty());

    GenerationRequest::with_sources(
        payload,
        directory,
        filename,
        payload_source,
        directory_source,
    )
}
