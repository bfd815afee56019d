//! Directory-name conventions of a Docusaurus site.
//!
//! Every folder name the resolver relies on lives here rather than inline in
//! the resolution logic, so sites with a non-standard layout can override
//! them through configuration.

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::defaults::{
    DEFAULT_CONTENT_DIR, DEFAULT_GENERATED_CONFIG, DEFAULT_I18N_DIR, DEFAULT_MARKER_FILE,
    DEFAULT_PLUGIN_PREFIX, DEFAULT_VERSION_DIR, default_site_search_paths,
};

/// Ordered list of directories, relative to the workspace root, that may
/// contain the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchPaths(Vec<Utf8PathBuf>);

impl SearchPaths {
    /// Builds a search list from the given relative paths, preserving order.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    /// Iterates over the candidates in probing order.
    pub fn iter(&self) -> impl Iterator<Item = &Utf8Path> {
        self.0.iter().map(Utf8PathBuf::as_path)
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SearchPaths {
    fn default() -> Self {
        default_site_search_paths()
    }
}

impl fmt::Display for SearchPaths {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(Utf8PathBuf::as_path)
            .map(Utf8Path::as_str)
            .collect::<Vec<_>>()
            .join(",");
        formatter.write_str(&joined)
    }
}

impl FromStr for SearchPaths {
    type Err = SearchPathsParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let paths = input
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(Utf8PathBuf::from)
            .collect::<Vec<_>>();
        if paths.is_empty() {
            return Err(SearchPathsParseError::Empty(input.to_owned()));
        }
        if let Some(absolute) = paths.iter().find(|path| path.is_absolute()) {
            return Err(SearchPathsParseError::Absolute(absolute.to_string()));
        }
        Ok(Self(paths))
    }
}

impl<'de> Deserialize<'de> for SearchPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Joined(String),
            List(Vec<Utf8PathBuf>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Joined(joined) => joined.parse().map_err(serde::de::Error::custom),
            Repr::List(paths) if paths.is_empty() => Err(serde::de::Error::custom(
                SearchPathsParseError::Empty(String::new()),
            )),
            Repr::List(paths) => Ok(Self(paths)),
        }
    }
}

/// Errors encountered while parsing a [`SearchPaths`] list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchPathsParseError {
    /// No candidate directory was supplied.
    #[error("site search path list '{0}' is empty")]
    Empty(String),
    /// Candidates must be relative to the workspace root.
    #[error("site search path '{0}' must be relative to the workspace")]
    Absolute(String),
}

/// Folder-name conventions used to locate and navigate a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    /// Directories probed, in order, for the marker file.
    pub site_search_paths: SearchPaths,
    /// File that marks a directory as the site root.
    pub marker_file: String,
    /// Generated configuration module, relative to the site root.
    pub generated_config: Utf8PathBuf,
    /// Folder holding default-locale content.
    pub content_dir: String,
    /// Folder holding all other locales.
    pub i18n_dir: String,
    /// Prefix carried by content-docs plugin folders.
    pub plugin_prefix: String,
    /// Version folder under each translated plugin.
    pub version_dir: String,
}

impl SiteLayout {
    /// Path of the default-locale content folder for `plugin_id`.
    #[must_use]
    pub fn default_plugin_dir(&self, site_root: &Utf8Path, plugin_id: &str) -> Utf8PathBuf {
        site_root.join(&self.content_dir).join(plugin_id)
    }

    /// Path of the translated folder for `plugin_folder` under `locale`.
    ///
    /// `plugin_folder` is the on-disk folder name, which may or may not
    /// carry [`SiteLayout::plugin_prefix`].
    #[must_use]
    pub fn localized_plugin_dir(
        &self,
        site_root: &Utf8Path,
        locale: &str,
        plugin_folder: &str,
    ) -> Utf8PathBuf {
        site_root
            .join(&self.i18n_dir)
            .join(locale)
            .join(plugin_folder)
            .join(&self.version_dir)
    }

    /// Full on-disk plugin folder name, prefix included.
    #[must_use]
    pub fn prefixed_plugin(&self, plugin_id: &str) -> String {
        format!("{}{plugin_id}", self.plugin_prefix)
    }

    /// Removes the plugin prefix from an on-disk folder name, when present.
    #[must_use]
    pub fn strip_plugin_prefix<'a>(&self, folder: &'a str) -> &'a str {
        folder
            .strip_prefix(self.plugin_prefix.as_str())
            .unwrap_or(folder)
    }
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            site_search_paths: SearchPaths::default(),
            marker_file: DEFAULT_MARKER_FILE.to_owned(),
            generated_config: Utf8PathBuf::from(DEFAULT_GENERATED_CONFIG),
            content_dir: DEFAULT_CONTENT_DIR.to_owned(),
            i18n_dir: DEFAULT_I18N_DIR.to_owned(),
            plugin_prefix: DEFAULT_PLUGIN_PREFIX.to_owned(),
            version_dir: DEFAULT_VERSION_DIR.to_owned(),
        }
    }
}
