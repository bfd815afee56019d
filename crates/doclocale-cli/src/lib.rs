//! Command-line runtime for opening localized Docusaurus documents.
//!
//! The module owns argument parsing, configuration bootstrapping and the
//! hand-off to the open and list actions. The runtime can be driven from the
//! binary entrypoint or from tests, where configuration loading and IO
//! streams are substituted.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;

use doclocale_config::Config;

mod cli;
mod command;
mod config;
mod errors;
pub mod host;
mod localizer;
pub mod output;
mod telemetry;

use cli::{Cli, CliCommand};
use command::{CommandContext, list_localized_documents, open_localized_document, report};
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;
pub use host::{ActiveDocument, DocumentView, EditorHost, HostError, TerminalHost, ViewColumn};
use localizer::build_localizer;
pub use output::{Opened, OutputFormat, ResolvedOutputFormat};
use output::{write_candidates, write_opened};

/// Bundles the IO streams provided to the CLI runtime.
///
/// `stdin` feeds the picker, `stdout` receives results and `stderr` carries
/// the picker prompt and error messages.
pub(crate) struct IoStreams<'a, R: BufRead, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, R: BufRead, W: Write, E: Write> IoStreams<'a, R, W, E> {
    pub(crate) const fn new(
        stdin: &'a mut R,
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

/// Result of a successful action, waiting to be rendered.
enum Outcome {
    Opened(Option<Opened>),
    Listed(Vec<doclocale_core::LocalizedCandidate>),
}

struct CliRunner<'r, 's, R: BufRead, W: Write, E: Write, L: ConfigLoader> {
    io: &'r mut IoStreams<'s, R, W, E>,
    loader: &'r L,
}

impl<'r, 's, R, W, E, L> CliRunner<'r, 's, R, W, E, L>
where
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'r mut IoStreams<'s, R, W, E>, loader: &'r L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let cli = match Cli::try_parse_from(split.command_arguments.iter().cloned()) {
            Ok(cli) => cli,
            Err(error) if !error.use_stderr() => {
                let _ = write!(self.io.stdout, "{error}");
                return ExitCode::SUCCESS;
            }
            Err(error) => return self.fail(&AppError::CliUsage(error)),
        };

        let config = match self
            .loader
            .load(&split.config_arguments)
            .and_then(|config| {
                telemetry::initialise(&config)?;
                Ok(config)
            }) {
            Ok(config) => config,
            Err(error) => return self.fail(&error),
        };

        tracing::debug!("doclocale is now active");
        self.dispatch(cli, &config)
    }

    fn dispatch(&mut self, cli: Cli, config: &Config) -> ExitCode {
        let localizer = build_localizer();
        let context = CommandContext::from_config(config, localizer.as_ref());
        let format = cli.output.resolve(self.io.stdout_is_terminal());
        let cwd = current_dir();
        let workspace = cli
            .workspace
            .as_deref()
            .and_then(|path| absolutise_against(cwd.as_deref(), path))
            .or_else(|| cwd.clone());
        let command = cli.into_command();
        let (document, line) = match &command {
            CliCommand::Open(args) => (args.document.as_deref(), args.line),
            CliCommand::List(args) => (args.document.as_deref(), 0),
        };
        let active = document
            .and_then(|path| absolutise_against(cwd.as_deref(), path))
            .map(|path| ActiveDocument { path, line });

        let mut host = TerminalHost::new(
            workspace,
            active,
            &mut *self.io.stdin,
            &mut *self.io.stderr,
        );
        let outcome = match &command {
            CliCommand::Open(args) => {
                let locale = args.locale.as_deref();
                let result = open_localized_document(&mut host, &context, locale);
                report(&mut host, &context, result).map(Outcome::Opened)
            }
            CliCommand::List(_) => {
                let result = list_localized_documents(&host, &context);
                report(&mut host, &context, result).map(Outcome::Listed)
            }
        };

        let rendered = match outcome {
            Ok(Outcome::Opened(Some(opened))) => {
                write_opened(&mut *self.io.stdout, format, &opened)
            }
            Ok(Outcome::Opened(None)) => Ok(()),
            Ok(Outcome::Listed(candidates)) => {
                write_candidates(&mut *self.io.stdout, format, &candidates)
            }
            Err(_) => return ExitCode::FAILURE,
        };
        match rendered {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => self.fail(&error),
        }
    }

    fn fail(&mut self, error: &AppError) -> ExitCode {
        let _ = writeln!(self.io.stderr, "{error}");
        ExitCode::FAILURE
    }
}

/// The process working directory, when it is valid UTF-8.
fn current_dir() -> Option<Utf8PathBuf> {
    match std::env::current_dir().map(Utf8PathBuf::try_from) {
        Ok(Ok(dir)) => Some(dir),
        Ok(Err(error)) => {
            tracing::warn!(%error, "working directory is not valid UTF-8");
            None
        }
        Err(error) => {
            tracing::warn!(%error, "working directory is unavailable");
            None
        }
    }
}

/// Makes `path` absolute against `cwd`.
///
/// Relative paths are dropped when the working directory is unknown.
fn absolutise_against(cwd: Option<&Utf8Path>, path: &Utf8Path) -> Option<Utf8PathBuf> {
    match cwd {
        Some(base) => Some(host::absolutise(base, path)),
        None if path.is_absolute() => Some(path.to_owned()),
        None => None,
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, R, W, E>(
    args: I,
    stdin: &mut R,
    stdout: &mut W,
    stderr: &mut E,
    stdout_is_terminal: bool,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdin, stdout, stderr, stdout_is_terminal);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

#[cfg(test)]
mod tests;
