//! Tracing setup.

use crate::config::TracingConfig;
use anyhow::{Context, Error};
use std::{io, path::Path};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    fmt::{
        format::{FmtSpan, Format, Json, JsonFields},
        Layer,
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

type JsonLayer<S> = Layer<S, JsonFields, Format<Json>, NonBlocking>;

/// Helper to set up tracing. Keep it alive until the process ends so buffered JSON traces get flushed.
#[must_use]
pub struct TracingConsumer {
    _json_appender_guard: Option<WorkerGuard>,
}

impl TracingConsumer {
    /// Set up tracing. Standard output is reserved for results, so human readable traces go to stderr.
    pub fn new(config: &TracingConfig) -> Result<Self, Error> {
        let (json_layer, json_guard) = Self::setup_json_layer(config.json_path.as_deref())?;
        let flat = match config.stderr {
            true => Some(tracing_subscriber::fmt::layer().with_writer(io::stderr)),
            false => None,
        };

        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(json_layer)
            .with(flat)
            .try_init()
            .context("failed to install tracing subscriber")?;
        Ok(Self { _json_appender_guard: json_guard })
    }

    fn setup_json_layer<S>(json_path: Option<&Path>) -> Result<(Option<JsonLayer<S>>, Option<WorkerGuard>), Error> {
        let Some(json_log) = json_path else {
            return Ok((None, None));
        };
        let directory = match json_log.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = json_log.file_name().with_context(|| format!("failed to start log on file {json_log:?}"))?;
        let appender = tracing_appender::rolling::never(directory, file_name);

        let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);
        let json_layer =
            tracing_subscriber::fmt::layer().json().with_span_events(FmtSpan::CLOSE).with_writer(non_blocking_appender);
        Ok((Some(json_layer), Some(guard)))
    }
}
