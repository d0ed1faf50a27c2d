//! The configuration for the calculator.

use config::ConfigError;
use matrix_engine::{format::DEFAULT_PRECISION, EngineConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The top level configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The engine configuration.
    pub engine: EngineConfig,

    /// The output configuration.
    pub output: OutputConfig,

    /// The tracing configuration.
    pub tracing: TracingConfig,
}

impl Config {
    /// Load the configuration from an optional YAML file.
    ///
    /// Any of the configuration properties can also be overridden by using environment variables prefixed
    /// with `MATRIX_CALC`. For example, `engine.singularity_epsilon` can be set with
    /// `MATRIX_CALC__ENGINE__SINGULARITY_EPSILON=1e-12`. Note the double underscores to delimit segments and
    /// single underscores to refer to fields.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Yaml));
        }
        let config = builder
            .add_source(config::Environment::with_prefix("MATRIX_CALC").separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}

/// The output configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Number of decimals printed for each cell.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { precision: default_precision() }
    }
}

/// The tracing configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct TracingConfig {
    /// The path where to store the JSON traces.
    pub json_path: Option<PathBuf>,

    /// Whether to print traces to standard error.
    #[serde(default = "default_stderr")]
    pub stderr: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self { json_path: None, stderr: default_stderr() }
    }
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

fn default_stderr() -> bool {
    true
}
