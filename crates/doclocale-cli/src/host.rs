//! Editor surface driven by the open command.
//!
//! [`EditorHost`] is the seam between the command flow and whatever shows
//! documents to the user. The binary ships [`TerminalHost`], which treats the
//! shell as the editor: the workspace and active document come from the
//! command line, errors go to stderr, and the picker is a numbered prompt.

use std::io::{self, BufRead, Write};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use serde::Serialize;
use thiserror::Error;

use doclocale_core::LocalePicker;

/// Column a document is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewColumn {
    /// The column holding the active document.
    Active,
    /// A new column next to the active one.
    Beside,
    /// A specific column, counted from one.
    Index(u8),
}

/// The document the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    /// Absolute path of the document.
    pub path: Utf8PathBuf,
    /// Zero-based line of the cursor.
    pub line: u32,
}

/// A document shown in some column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    /// Absolute path of the document.
    pub path: Utf8PathBuf,
    /// Column it is shown in, when the host knows.
    pub column: Option<ViewColumn>,
}

/// Failures reported by a host while showing documents.
#[derive(Debug, Error)]
pub enum HostError {
    /// The document could not be opened.
    #[error("failed to open '{path}': {source}")]
    Open {
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The line could not be revealed.
    #[error("failed to reveal line {line} of '{path}'")]
    Reveal {
        /// Document path.
        path: Utf8PathBuf,
        /// Zero-based line.
        line: u32,
    },
}

/// Operations the open command needs from an editor.
pub trait EditorHost {
    /// Root folder of the open workspace.
    fn workspace_root(&self) -> Option<Utf8PathBuf>;

    /// The document currently being edited.
    fn active_document(&self) -> Option<ActiveDocument>;

    /// Documents already shown somewhere.
    fn open_documents(&self) -> Vec<DocumentView>;

    /// Shows `path` in `column` and gives it focus.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Open`] when the document cannot be shown.
    fn open_and_focus(
        &mut self,
        path: &Utf8Path,
        column: Option<ViewColumn>,
    ) -> Result<DocumentView, HostError>;

    /// Scrolls `line` into view and selects it.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Reveal`] when the line cannot be shown.
    fn reveal_and_select_line(&mut self, view: &DocumentView, line: u32) -> Result<(), HostError>;

    /// Tells the user something went wrong.
    fn show_error(&mut self, message: &str);

    /// Offers the picker's candidates and waits for a choice.
    ///
    /// Returns the chosen index, or `None` when the user dismissed the list.
    fn show_selectable_list(&mut self, picker: &LocalePicker) -> Option<usize>;
}

/// Host backed by the command line and the terminal.
pub struct TerminalHost<'a, R: BufRead, E: Write> {
    workspace: Option<Utf8PathBuf>,
    document: Option<ActiveDocument>,
    stdin: &'a mut R,
    stderr: &'a mut E,
}

impl<'a, R: BufRead, E: Write> TerminalHost<'a, R, E> {
    /// Creates a host for the given workspace and document.
    pub fn new(
        workspace: Option<Utf8PathBuf>,
        document: Option<ActiveDocument>,
        stdin: &'a mut R,
        stderr: &'a mut E,
    ) -> Self {
        Self {
            workspace,
            document,
            stdin,
            stderr,
        }
    }
}

impl<R: BufRead, E: Write> EditorHost for TerminalHost<'_, R, E> {
    fn workspace_root(&self) -> Option<Utf8PathBuf> {
        self.workspace.clone()
    }

    fn active_document(&self) -> Option<ActiveDocument> {
        self.document.clone()
    }

    fn open_documents(&self) -> Vec<DocumentView> {
        Vec::new()
    }

    fn open_and_focus(
        &mut self,
        path: &Utf8Path,
        column: Option<ViewColumn>,
    ) -> Result<DocumentView, HostError> {
        if !path.is_file() {
            return Err(HostError::Open {
                path: path.to_owned(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        tracing::debug!(path = %path, ?column, "opening document");
        Ok(DocumentView {
            path: path.to_owned(),
            column,
        })
    }

    fn reveal_and_select_line(&mut self, view: &DocumentView, line: u32) -> Result<(), HostError> {
        tracing::debug!(path = %view.path, line, "revealing line");
        Ok(())
    }

    fn show_error(&mut self, message: &str) {
        let _ = writeln!(self.stderr, "{message}");
    }

    fn show_selectable_list(&mut self, picker: &LocalePicker) -> Option<usize> {
        let mut session = PickerSession::open(&mut *self.stderr);
        match prompt(&mut session, &mut *self.stdin, picker) {
            Ok(choice) => choice,
            Err(error) => {
                tracing::warn!(%error, "picker prompt failed");
                None
            }
        }
    }
}

/// Terminal resources held while the picker is shown.
///
/// Dropping the session finishes the prompt line when no answer was read
/// and flushes the stream, whichever way the picker was left.
pub(crate) struct PickerSession<'a, E: Write> {
    writer: &'a mut E,
    answered: bool,
}

impl<'a, E: Write> PickerSession<'a, E> {
    pub(crate) fn open(writer: &'a mut E) -> Self {
        Self {
            writer,
            answered: false,
        }
    }

    fn writer(&mut self) -> &mut E {
        &mut *self.writer
    }
}

impl<E: Write> Drop for PickerSession<'_, E> {
    fn drop(&mut self) {
        if !self.answered {
            let _ = writeln!(self.writer);
        }
        let _ = self.writer.flush();
    }
}

fn prompt<R: BufRead, E: Write>(
    session: &mut PickerSession<'_, E>,
    stdin: &mut R,
    picker: &LocalePicker,
) -> io::Result<Option<usize>> {
    let writer = session.writer();
    writeln!(writer, "{}", picker.placeholder())?;
    for (index, candidate) in picker.candidates().iter().enumerate() {
        writeln!(
            writer,
            "{:>3}) {}  {}",
            index + 1,
            candidate.display_label,
            candidate.description
        )?;
        writeln!(writer, "     {}", candidate.resolved_path)?;
    }
    write!(writer, "> ")?;
    writer.flush()?;

    let mut answer = String::new();
    if stdin.read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    session.answered = true;
    Ok(parse_choice(answer.trim(), picker))
}

/// Interprets a picker answer: a one-based number or a locale code.
fn parse_choice(answer: &str, picker: &LocalePicker) -> Option<usize> {
    if answer.is_empty() {
        return None;
    }
    answer.parse::<usize>().map_or_else(
        |_| picker.position_of(answer),
        |number| number.checked_sub(1).filter(|index| *index < picker.len()),
    )
}

/// Makes `path` absolute against `base` and folds `.` and `..` segments.
#[must_use]
pub fn absolutise(base: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    let joined = if path.is_absolute() {
        path.to_owned()
    } else {
        base.join(path)
    };
    let mut normalised = Utf8PathBuf::new();
    for component in joined.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                normalised.pop();
            }
            other => normalised.push(other),
        }
    }
    normalised
}
