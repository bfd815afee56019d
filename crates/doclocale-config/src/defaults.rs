use crate::layout::SearchPaths;
use crate::locale_names::LocaleNames;

/// Default log filter expression used by the binary.
///
/// The picker shares the terminal with log output, so only warnings and
/// errors are shown unless the operator asks for more.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// File whose presence marks a directory as the site root.
pub const DEFAULT_MARKER_FILE: &str = "docusaurus.config.js";

/// Location of the generated configuration module, relative to the site root.
pub const DEFAULT_GENERATED_CONFIG: &str = ".docusaurus/docusaurus.config.js";

/// Directory holding the default-locale content.
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Directory holding every other locale.
pub const DEFAULT_I18N_DIR: &str = "i18n";

/// Prefix carried by on-disk content-docs plugin folders.
pub const DEFAULT_PLUGIN_PREFIX: &str = "docusaurus-plugin-content-docs-";

/// Version folder translated documents live under.
pub const DEFAULT_VERSION_DIR: &str = "current";

/// Candidate site directories, relative to the workspace root, probed in order.
pub const DEFAULT_SITE_SEARCH_PATHS: &[&str] = &[".", "website"];

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Compact
}

/// Default ordered list of site directories to probe.
#[must_use]
pub fn default_site_search_paths() -> SearchPaths {
    SearchPaths::new(DEFAULT_SITE_SEARCH_PATHS.iter().copied())
}

pub(crate) fn default_marker_file() -> String {
    DEFAULT_MARKER_FILE.to_owned()
}

pub(crate) fn default_generated_config() -> String {
    DEFAULT_GENERATED_CONFIG.to_owned()
}

pub(crate) fn default_content_dir() -> String {
    DEFAULT_CONTENT_DIR.to_owned()
}

pub(crate) fn default_i18n_dir() -> String {
    DEFAULT_I18N_DIR.to_owned()
}

pub(crate) fn default_plugin_prefix() -> String {
    DEFAULT_PLUGIN_PREFIX.to_owned()
}

pub(crate) fn default_version_dir() -> String {
    DEFAULT_VERSION_DIR.to_owned()
}

pub(crate) fn default_locale_names() -> LocaleNames {
    LocaleNames::default()
}
