//! Temporary Docusaurus sites for unit and behavioural tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use crate::site::SiteRoot;

/// A scratch workspace that is removed when dropped.
pub(crate) struct SiteFixture {
    _dir: TempDir,
    workspace: Utf8PathBuf,
}

impl SiteFixture {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().expect("create temp workspace");
        let workspace =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        Self {
            _dir: dir,
            workspace,
        }
    }

    pub(crate) fn workspace(&self) -> &Utf8Path {
        &self.workspace
    }

    /// The workspace itself, treated as the site root.
    pub(crate) fn site_root(&self) -> SiteRoot {
        SiteRoot::new(self.workspace.clone())
    }

    /// Writes `contents` to `relative`, creating parent folders.
    pub(crate) fn write(&self, relative: &str, contents: &str) -> Utf8PathBuf {
        let path = self.workspace.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent folders");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub(crate) fn mkdir(&self, relative: &str) -> Utf8PathBuf {
        let path = self.workspace.join(relative);
        fs::create_dir_all(&path).expect("create folder");
        path
    }

    #[cfg(unix)]
    pub(crate) fn symlink_dir(&self, target: &str, link: &str) {
        let link_path = self.workspace.join(link);
        if let Some(parent) = link_path.parent() {
            fs::create_dir_all(parent).expect("create link parent");
        }
        std::os::unix::fs::symlink(self.workspace.join(target), &link_path)
            .expect("create symlink");
    }
}

/// Generated configuration module in the shape Docusaurus writes it.
pub(crate) fn generated_config(default_locale: &str, locales: &[&str]) -> String {
    let listed = locales
        .iter()
        .map(|locale| format!("\n      \"{locale}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "/*\n * AUTOGENERATED - DON'T EDIT\n */\nexport default {{\n  \"title\": \"Docs\",\n  \
         \"baseUrl\": \"/\",\n  \"i18n\": {{\n    \"defaultLocale\": \"{default_locale}\",\n    \
         \"locales\": [{listed}\n    ],\n    \"path\": \"i18n\",\n    \"localeConfigs\": {{}}\n  \
         }},\n  \"plugins\": [],\n  \"customFields\": {{}}\n}};\n"
    )
}
