//! Rendering of command results.
//!
//! Human output is meant for people and for editors that accept
//! `path:line` arguments; JSON output is meant for tooling.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::ValueEnum;
use serde::Serialize;

use doclocale_core::LocalizedCandidate;

use crate::errors::AppError;
use crate::host::ViewColumn;

/// Output format selection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit JSON.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Human-readable output.
    Human,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

/// The document the open command showed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Opened {
    /// Locale of the opened document.
    pub locale: String,
    /// Path of the opened document.
    pub path: Utf8PathBuf,
    /// Zero-based line that was revealed, if any.
    pub line: Option<u32>,
    /// Column the document is shown in.
    pub column: Option<ViewColumn>,
    /// Whether an existing view was focused instead of opening a new one.
    pub reused_view: bool,
}

/// Writes the outcome of `open`.
///
/// Human output is `path` or `path:line` with a one-based line.
pub(crate) fn write_opened<W: Write>(
    writer: &mut W,
    format: ResolvedOutputFormat,
    opened: &Opened,
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Human => {
            let location = opened.line.map_or_else(
                || opened.path.to_string(),
                |line| format!("{}:{}", opened.path, u64::from(line) + 1),
            );
            writeln!(writer, "{location}").map_err(AppError::WriteOutput)
        }
        ResolvedOutputFormat::Json => write_json(writer, opened),
    }
}

/// Writes the candidate list of `list`.
pub(crate) fn write_candidates<W: Write>(
    writer: &mut W,
    format: ResolvedOutputFormat,
    candidates: &[LocalizedCandidate],
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Human => {
            render_table(writer, candidates).map_err(AppError::WriteOutput)
        }
        ResolvedOutputFormat::Json => write_json(writer, candidates),
    }
}

fn render_table<W: Write>(
    writer: &mut W,
    candidates: &[LocalizedCandidate],
) -> std::io::Result<()> {
    let label_width = column_width(candidates, |c| &c.display_label);
    let description_width = column_width(candidates, |c| &c.description);
    for candidate in candidates {
        writeln!(
            writer,
            "{:<label_width$}  {:<description_width$}  {}",
            candidate.display_label, candidate.description, candidate.resolved_path
        )?;
    }
    Ok(())
}

fn column_width(
    candidates: &[LocalizedCandidate],
    field: impl Fn(&LocalizedCandidate) -> &String,
) -> usize {
    candidates
        .iter()
        .map(|candidate| field(candidate).chars().count())
        .max()
        .unwrap_or(0)
}

fn write_json<W, T>(writer: &mut W, value: &T) -> Result<(), AppError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *writer, value).map_err(AppError::SerialiseOutput)?;
    writer.write_all(b"\n").map_err(AppError::WriteOutput)?;
    writer.flush().map_err(AppError::WriteOutput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn candidate(locale: &str, label: &str, is_current: bool) -> LocalizedCandidate {
        LocalizedCandidate {
            locale: locale.to_owned(),
            display_label: label.to_owned(),
            description: if is_current {
                format!("{locale} (current)")
            } else {
                locale.to_owned()
            },
            is_current,
            resolved_path: Utf8PathBuf::from(format!("/site/{locale}.mdx")),
        }
    }

    fn opened(line: Option<u32>) -> Opened {
        Opened {
            locale: "pl".to_owned(),
            path: Utf8PathBuf::from("/site/i18n/pl/guide.mdx"),
            line,
            column: Some(ViewColumn::Beside),
            reused_view: false,
        }
    }

    fn render(result: impl FnOnce(&mut Vec<u8>) -> Result<(), AppError>) -> String {
        let mut buffer = Vec::new();
        result(&mut buffer).expect("render");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[rstest]
    #[case(false, ResolvedOutputFormat::Json)]
    #[case(true, ResolvedOutputFormat::Human)]
    fn auto_follows_the_terminal(#[case] terminal: bool, #[case] expected: ResolvedOutputFormat) {
        assert_eq!(OutputFormat::Auto.resolve(terminal), expected);
        assert_eq!(OutputFormat::Json.resolve(terminal), ResolvedOutputFormat::Json);
        assert_eq!(OutputFormat::Human.resolve(terminal), ResolvedOutputFormat::Human);
    }

    #[rstest]
    #[case(Some(9), "/site/i18n/pl/guide.mdx:10\n")]
    #[case(None, "/site/i18n/pl/guide.mdx\n")]
    fn human_open_output_is_an_editor_argument(
        #[case] line: Option<u32>,
        #[case] expected: &str,
    ) {
        let output =
            render(|buffer| write_opened(buffer, ResolvedOutputFormat::Human, &opened(line)));
        assert_eq!(output, expected);
    }

    #[test]
    fn json_open_output_carries_the_view() {
        let output =
            render(|buffer| write_opened(buffer, ResolvedOutputFormat::Json, &opened(Some(3))));
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value["locale"], "pl");
        assert_eq!(value["line"], 3);
        assert_eq!(value["column"], "beside");
        assert_eq!(value["reused_view"], false);
    }

    #[test]
    fn human_list_output_aligns_columns() {
        let candidates = [candidate("en", "English", true), candidate("pl", "Polish", false)];
        let output =
            render(|buffer| write_candidates(buffer, ResolvedOutputFormat::Human, &candidates));
        assert_eq!(
            output,
            "English  en (current)  /site/en.mdx\nPolish   pl            /site/pl.mdx\n"
        );
    }

    #[test]
    fn json_list_output_is_an_array_of_candidates() {
        let candidates = [candidate("en", "English", false)];
        let output =
            render(|buffer| write_candidates(buffer, ResolvedOutputFormat::Json, &candidates));
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value[0]["display_label"], "English");
        assert_eq!(value[0]["resolved_path"], "/site/en.mdx");
        assert_eq!(value[0]["is_current"], false);
    }
}
