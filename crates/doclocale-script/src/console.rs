//! The `console` binding exposed to evaluated modules.
//!
//! Calls are forwarded to `tracing` so messages printed by a configuration
//! module show up in the tool's own log stream instead of on stdout.

use std::str::FromStr;

use serde_json::Value;

use crate::literal::display_value;

/// Name of the global the binding is installed under.
pub(crate) const CONSOLE_GLOBAL: &str = "console";

/// Console methods the sandbox understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConsoleMethod {
    Trace,
    Debug,
    Log,
    Info,
    Warn,
    Error,
}

impl FromStr for ConsoleMethod {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "log" => Ok(Self::Log),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(()),
        }
    }
}

/// Emits a console call as a `tracing` event.
pub(crate) fn emit(method: ConsoleMethod, arguments: &[Value]) {
    let message = arguments
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(" ");
    match method {
        ConsoleMethod::Trace => tracing::trace!(target: "doclocale::config_module", "{message}"),
        ConsoleMethod::Debug => tracing::debug!(target: "doclocale::config_module", "{message}"),
        ConsoleMethod::Log | ConsoleMethod::Info => {
            tracing::info!(target: "doclocale::config_module", "{message}");
        }
        ConsoleMethod::Warn => tracing::warn!(target: "doclocale::config_module", "{message}"),
        ConsoleMethod::Error => tracing::error!(target: "doclocale::config_module", "{message}"),
    }
}
