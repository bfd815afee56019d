//! Error surface of site discovery and locale resolution.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use doclocale_script::ScriptError;

/// Errors raised while locating the site root.
#[derive(Debug, Error)]
pub enum LocateError {
    /// None of the probed directories contained the marker file.
    #[error("could not find '{marker}' in any of: {}", format_probed(.probed))]
    NotFound {
        /// Marker file that was looked for.
        marker: String,
        /// Directories that were probed, in order.
        probed: Vec<Utf8PathBuf>,
    },
}

fn format_probed(probed: &[Utf8PathBuf]) -> String {
    probed
        .iter()
        .map(|path| format!("'{path}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while reading the localization settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The generated configuration module does not exist.
    #[error("generated configuration '{path}' does not exist")]
    NotFound {
        /// Expected location of the module.
        path: Utf8PathBuf,
    },
    /// The module exists but could not be read.
    #[error("failed to read generated configuration '{path}': {source}")]
    Read {
        /// Module path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The module could not be evaluated.
    #[error("failed to evaluate generated configuration '{path}': {source}")]
    Evaluate {
        /// Module path.
        path: Utf8PathBuf,
        /// Evaluator error.
        #[source]
        source: ScriptError,
    },
    /// The exported object lacks usable `i18n` settings.
    #[error("generated configuration '{path}' has no usable i18n settings: {source}")]
    Extract {
        /// Module path.
        path: Utf8PathBuf,
        /// Deserialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// The default locale is not one of the configured locales.
    #[error("default locale '{default_locale}' is not listed in the locales of '{path}'")]
    DefaultLocaleNotListed {
        /// Module path.
        path: Utf8PathBuf,
        /// Offending default locale.
        default_locale: String,
    },
}

impl SettingsError {
    /// Returns `true` when the module exists but its content is unusable.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Evaluate { .. } | Self::Extract { .. } | Self::DefaultLocaleNotListed { .. }
        )
    }
}

/// Errors raised while classifying a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The document does not live beneath the site root.
    #[error("document '{document}' is outside the site root '{site_root}'")]
    OutsideSite {
        /// Document path.
        document: Utf8PathBuf,
        /// Site root it was compared against.
        site_root: Utf8PathBuf,
    },
    /// The document path does not follow the content or i18n layout.
    #[error("document '{document}' does not follow the {expected} layout")]
    UnrecognisedLayout {
        /// Document path.
        document: Utf8PathBuf,
        /// Short description of the layout that was expected.
        expected: &'static str,
    },
}

impl ResolveError {
    pub(crate) fn outside_site(
        document: impl Into<Utf8PathBuf>,
        site_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self::OutsideSite {
            document: document.into(),
            site_root: site_root.into(),
        }
    }

    pub(crate) fn unrecognised(
        document: impl Into<Utf8PathBuf>,
        expected: &'static str,
    ) -> Self {
        Self::UnrecognisedLayout {
            document: document.into(),
            expected,
        }
    }
}

/// Any failure of the end-to-end lookup.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Site discovery failed.
    #[error(transparent)]
    Locate(#[from] LocateError),
    /// Settings could not be read.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The document could not be classified.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
