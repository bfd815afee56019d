//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use doclocale_core::CoreError;

use crate::host::HostError;
use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("no workspace folder is open")]
    NoWorkspace,
    #[error("no document is open")]
    NoDocument,
    #[error(transparent)]
    Lookup(#[from] CoreError),
    #[error("no localized document is available for locale '{locale}'")]
    UnknownLocale { locale: String },
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
