//! Command-line argument definitions.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Opens the localized counterparts of Docusaurus documents.
///
/// Without a subcommand the `open` action runs.
#[derive(Parser, Debug)]
#[command(
    name = "doclocale",
    version,
    disable_help_subcommand = true,
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// Workspace folder holding the site (defaults to the current directory).
    #[arg(long, value_name = "DIR", global = true)]
    pub(crate) workspace: Option<Utf8PathBuf>,
    /// Controls how results are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto, global = true)]
    pub(crate) output: OutputFormat,
    /// Action to run.
    #[command(subcommand)]
    pub(crate) command: Option<CliCommand>,
    /// Arguments of the implicit `open` action.
    #[command(flatten)]
    pub(crate) open: OpenArgs,
}

impl Cli {
    /// The action to run, defaulting to `open`.
    pub(crate) fn into_command(self) -> CliCommand {
        self.command.unwrap_or(CliCommand::Open(self.open))
    }
}

/// Structured subcommands.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Picks a localized version of the document and opens it.
    Open(OpenArgs),
    /// Lists the localized versions of the document.
    List(ListArgs),
}

/// Arguments of `doclocale open`.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct OpenArgs {
    /// Document currently being edited.
    #[arg(value_name = "DOCUMENT")]
    pub(crate) document: Option<Utf8PathBuf>,
    /// Zero-based line the cursor is on.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub(crate) line: u32,
    /// Opens this locale instead of prompting.
    #[arg(long, value_name = "CODE")]
    pub(crate) locale: Option<String>,
}

/// Arguments of `doclocale list`.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ListArgs {
    /// Document currently being edited.
    #[arg(value_name = "DOCUMENT")]
    pub(crate) document: Option<Utf8PathBuf>,
}
