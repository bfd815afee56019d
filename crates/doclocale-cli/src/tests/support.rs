//! Scratch sites and a scripted editor for CLI tests.

use std::ffi::OsString;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use doclocale_config::Config;
use doclocale_core::LocalePicker;

use crate::config::ConfigLoader;
use crate::errors::AppError;
use crate::host::{ActiveDocument, DocumentView, EditorHost, HostError, ViewColumn};

/// A temporary workspace, removed on drop.
pub(crate) struct SiteFixture {
    _dir: TempDir,
    workspace: Utf8PathBuf,
}

impl SiteFixture {
    /// A workspace with no site in it.
    pub(crate) fn empty() -> Self {
        let dir = TempDir::new().expect("create temp workspace");
        let workspace =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        Self {
            _dir: dir,
            workspace,
        }
    }

    /// A built site at the workspace root.
    pub(crate) fn with_locales(default_locale: &str, locales: &[&str]) -> Self {
        let site = Self::empty();
        let listed = locales
            .iter()
            .map(|locale| format!("'{locale}'"))
            .collect::<Vec<_>>()
            .join(", ");
        site.write("docusaurus.config.js", "module.exports = {};\n");
        site.write(
            ".docusaurus/docusaurus.config.js",
            &format!(
                "module.exports = {{\n  title: 'Docs',\n  i18n: {{ defaultLocale: \
                 '{default_locale}', locales: [{listed}] }},\n}};\n"
            ),
        );
        site
    }

    pub(crate) fn workspace(&self) -> &Utf8Path {
        &self.workspace
    }

    pub(crate) fn path(&self, relative: &str) -> Utf8PathBuf {
        self.workspace.join(relative)
    }

    pub(crate) fn write(&self, relative: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent folders");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }
}

/// Loader returning a fixed configuration.
pub(crate) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(crate) const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Editor double that records what the command asked of it.
#[derive(Default)]
pub(crate) struct FakeHost {
    workspace: Option<Utf8PathBuf>,
    document: Option<ActiveDocument>,
    views: Vec<DocumentView>,
    answer: Option<usize>,
    pub(crate) placeholders: Vec<String>,
    pub(crate) opened: Vec<(Utf8PathBuf, Option<ViewColumn>)>,
    pub(crate) revealed: Vec<(Utf8PathBuf, u32)>,
    pub(crate) errors: Vec<String>,
}

impl FakeHost {
    pub(crate) fn new(workspace: Option<Utf8PathBuf>) -> Self {
        Self {
            workspace,
            ..Self::default()
        }
    }

    pub(crate) fn with_document(mut self, path: Utf8PathBuf, line: u32) -> Self {
        self.document = Some(ActiveDocument { path, line });
        self
    }

    pub(crate) fn with_open_view(mut self, view: DocumentView) -> Self {
        self.views.push(view);
        self
    }

    /// Sets the index the picker answers with.
    pub(crate) const fn answering(mut self, answer: Option<usize>) -> Self {
        self.answer = answer;
        self
    }
}

impl EditorHost for FakeHost {
    fn workspace_root(&self) -> Option<Utf8PathBuf> {
        self.workspace.clone()
    }

    fn active_document(&self) -> Option<ActiveDocument> {
        self.document.clone()
    }

    fn open_documents(&self) -> Vec<DocumentView> {
        self.views.clone()
    }

    fn open_and_focus(
        &mut self,
        path: &Utf8Path,
        column: Option<ViewColumn>,
    ) -> Result<DocumentView, HostError> {
        self.opened.push((path.to_owned(), column));
        Ok(DocumentView {
            path: path.to_owned(),
            column,
        })
    }

    fn reveal_and_select_line(&mut self, view: &DocumentView, line: u32) -> Result<(), HostError> {
        self.revealed.push((view.path.clone(), line));
        Ok(())
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }

    fn show_selectable_list(&mut self, picker: &LocalePicker) -> Option<usize> {
        self.placeholders.push(picker.placeholder().to_owned());
        self.answer
    }
}
