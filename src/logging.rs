//! Subscriber setup for the binary. Library code only emits `tracing` events.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::OboGraphError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Builds the event filter. `RUST_LOG` wins over `level` when set.
pub fn filter(level: &str) -> Result<EnvFilter, OboGraphError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| OboGraphError::invalid_input(format!("log level {level}: {e}"))),
    }
}

/// Installs the global subscriber writing to stderr.
pub fn init(level: &str, format: LogFormat) -> Result<(), OboGraphError> {
    let filter = filter(level)?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    installed.map_err(|e| OboGraphError::invalid_input(format!("logger: {e}")))
}
