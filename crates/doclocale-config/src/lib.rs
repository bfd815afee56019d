//! Shared configuration for the doclocale toolchain.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then a TOML
//! file (`--config-path` or `DOCLOCALE_CONFIG_PATH`), then `DOCLOCALE_*`
//! environment variables, then command-line flags. Besides logging, the
//! settings describe the folder conventions of the Docusaurus site so the
//! resolver never hard-codes them.

use serde::{Deserialize, Serialize};

mod defaults;
mod layout;
mod locale_names;
mod logging;

pub use defaults::{
    DEFAULT_CONTENT_DIR, DEFAULT_GENERATED_CONFIG, DEFAULT_I18N_DIR, DEFAULT_LOG_FILTER,
    DEFAULT_MARKER_FILE, DEFAULT_PLUGIN_PREFIX, DEFAULT_SITE_SEARCH_PATHS, DEFAULT_VERSION_DIR,
    default_log_filter, default_log_filter_string, default_log_format, default_site_search_paths,
};
pub use layout::{SearchPaths, SearchPathsParseError, SiteLayout};
pub use locale_names::{LocaleNames, LocaleNamesParseError};
pub use logging::{LogFormat, LogFormatParseError};

use defaults::{
    default_content_dir, default_generated_config, default_i18n_dir, default_locale_names,
    default_marker_file, default_plugin_prefix, default_version_dir,
};

/// Resolved configuration shared by the CLI and the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ortho_config::OrthoConfig)]
#[ortho_config(
    prefix = "DOCLOCALE",
    discovery(
        app_name = "doclocale",
        env_var = "DOCLOCALE_CONFIG_PATH",
        config_file_name = "doclocale.toml",
        dotfile_name = ".doclocale.toml",
        project_file_name = "doclocale.toml",
        config_cli_long = "config-path",
    )
)]
pub struct Config {
    /// Directories, relative to the workspace, probed for the site root.
    #[serde(default = "default_site_search_paths")]
    pub site_search_paths: SearchPaths,
    /// File whose presence marks the site root.
    #[serde(default = "default_marker_file")]
    pub marker_file: String,
    /// Generated configuration module, relative to the site root.
    #[serde(default = "default_generated_config")]
    pub generated_config: String,
    /// Folder holding default-locale content.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,
    /// Folder holding every other locale.
    #[serde(default = "default_i18n_dir")]
    pub i18n_dir: String,
    /// Prefix of content-docs plugin folders.
    #[serde(default = "default_plugin_prefix")]
    pub plugin_prefix: String,
    /// Version folder translated documents live under.
    #[serde(default = "default_version_dir")]
    pub version_dir: String,
    /// Additional or replacement locale display names.
    #[serde(default = "default_locale_names")]
    pub locale_names: LocaleNames,
    /// `tracing` filter expression.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_search_paths: default_site_search_paths(),
            marker_file: default_marker_file(),
            generated_config: default_generated_config(),
            content_dir: default_content_dir(),
            i18n_dir: default_i18n_dir(),
            plugin_prefix: default_plugin_prefix(),
            version_dir: default_version_dir(),
            locale_names: default_locale_names(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Site folder conventions derived from the configuration.
    #[must_use]
    pub fn site_layout(&self) -> SiteLayout {
        SiteLayout {
            site_search_paths: self.site_search_paths.clone(),
            marker_file: self.marker_file.clone(),
            generated_config: self.generated_config.clone().into(),
            content_dir: self.content_dir.clone(),
            i18n_dir: self.i18n_dir.clone(),
            plugin_prefix: self.plugin_prefix.clone(),
            version_dir: self.version_dir.clone(),
        }
    }

    /// Configured locale display names.
    #[must_use]
    pub const fn locale_names(&self) -> &LocaleNames {
        &self.locale_names
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_docusaurus_conventions() {
        let layout = Config::default().site_layout();
        assert_eq!(layout, SiteLayout::default());
        assert_eq!(layout.generated_config.as_str(), DEFAULT_GENERATED_CONFIG);
    }

    #[test]
    fn layout_reflects_overrides() {
        let config = Config {
            content_dir: "docs".to_owned(),
            plugin_prefix: "plugin-".to_owned(),
            ..Config::default()
        };
        let layout = config.site_layout();
        assert_eq!(layout.content_dir, "docs");
        assert_eq!(layout.strip_plugin_prefix("plugin-learn"), "learn");
    }
}
