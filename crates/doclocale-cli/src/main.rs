//! CLI entrypoint for `doclocale`.
//!
//! The binary delegates to [`doclocale_cli::run`], which loads configuration,
//! parses the command line, prompts for a locale and prints the chosen
//! document.

use std::io::{self, IsTerminal, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout_is_terminal = io::stdout().is_terminal();
    let mut stdin: StdinLock<'_> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    doclocale_cli::run(
        std::env::args_os(),
        &mut stdin,
        &mut stdout,
        &mut stderr,
        stdout_is_terminal,
    )
}
