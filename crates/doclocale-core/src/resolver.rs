//! Maps a document to its counterparts in the site's other locales.
//!
//! Default-locale documents live under `<content>/<plugin>/<path>`;
//! translations live under `<i18n>/<locale>/<plugin folder>/<version>/<path>`
//! where the plugin folder may or may not carry the content-docs plugin
//! prefix. Classification reads those segments back out of a document path
//! and candidate construction rebuilds them for every configured locale.

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use doclocale_config::SiteLayout;

use crate::error::ResolveError;
use crate::locale_names::DisplayNames;
use crate::settings::I18nSettings;
use crate::site::SiteRoot;

const CURRENT_SUFFIX: &str = " (current)";

/// Where a document sits within the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentIdentity {
    /// Plugin the document belongs to, without the folder prefix.
    pub plugin_id: String,
    /// Path segments below the plugin (and version) folder.
    pub relative_path: Vec<String>,
    /// Whether the document lives in the default-locale content folder.
    pub is_default_locale: bool,
    /// Locale of the document.
    pub current_locale: String,
}

impl DocumentIdentity {
    /// Path below the plugin folder, joined with `/`.
    #[must_use]
    pub fn plugin_relative_path(&self) -> String {
        self.relative_path.join("/")
    }
}

/// One localized version of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedCandidate {
    /// Locale code.
    pub locale: String,
    /// Human-readable locale name.
    pub display_label: String,
    /// Locale code, marked when it is the document's own locale.
    pub description: String,
    /// Whether this is the locale of the document being resolved.
    pub is_current: bool,
    /// File the candidate opens.
    pub resolved_path: Utf8PathBuf,
}

/// Resolves documents against a site layout.
#[derive(Debug, Clone, Copy)]
pub struct LocaleResolver<'a> {
    layout: &'a SiteLayout,
    names: &'a DisplayNames,
}

impl<'a> LocaleResolver<'a> {
    /// Creates a resolver for `layout` labelling candidates with `names`.
    #[must_use]
    pub const fn new(layout: &'a SiteLayout, names: &'a DisplayNames) -> Self {
        Self { layout, names }
    }

    /// Works out the plugin, locale and relative path of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::OutsideSite`] when `document` is not below
    /// `site_root`, and [`ResolveError::UnrecognisedLayout`] when it has too
    /// few segments for the content or i18n layout.
    pub fn classify(
        &self,
        site_root: &SiteRoot,
        document: &Utf8Path,
        settings: &I18nSettings,
    ) -> Result<DocumentIdentity, ResolveError> {
        let outside = || ResolveError::outside_site(document, site_root.as_path());
        let relative = document
            .strip_prefix(site_root.as_path())
            .map_err(|_| outside())?;
        let segments: Vec<&str> = relative
            .as_str()
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect();
        if segments.contains(&"..") {
            return Err(outside());
        }

        let identity = match segments.split_first() {
            Some((first, rest)) if *first == self.layout.i18n_dir => {
                self.classify_translated(document, rest)?
            }
            _ => classify_default(self.layout, document, &segments, settings)?,
        };

        tracing::debug!(
            plugin_id = %identity.plugin_id,
            current_locale = %identity.current_locale,
            is_default_locale = identity.is_default_locale,
            relative_path = %identity.plugin_relative_path(),
            "classified document"
        );
        if !settings.locales.contains(&identity.current_locale) {
            tracing::warn!(
                locale = %identity.current_locale,
                "document locale is not configured for the site"
            );
        }
        Ok(identity)
    }

    fn classify_translated(
        &self,
        document: &Utf8Path,
        segments: &[&str],
    ) -> Result<DocumentIdentity, ResolveError> {
        let [locale, plugin_folder, version, path @ ..] = segments else {
            return Err(ResolveError::unrecognised(document, "translated document"));
        };
        if path.is_empty() {
            return Err(ResolveError::unrecognised(document, "translated document"));
        }
        if *version != self.layout.version_dir {
            tracing::debug!(version = %version, "document is in a non-current version folder");
        }

        Ok(DocumentIdentity {
            plugin_id: self.layout.strip_plugin_prefix(plugin_folder).to_owned(),
            relative_path: owned_segments(path),
            is_default_locale: false,
            current_locale: (*locale).to_owned(),
        })
    }

    /// Lists the localized versions of `document`.
    ///
    /// The default locale comes first and is always present; other locales
    /// follow in configuration order and appear only when a translation
    /// exists on disk.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`LocaleResolver::classify`].
    pub fn resolve(
        &self,
        site_root: &SiteRoot,
        document: &Utf8Path,
        settings: &I18nSettings,
    ) -> Result<Vec<LocalizedCandidate>, ResolveError> {
        let identity = self.classify(site_root, document, settings)?;
        Ok(self.candidates(site_root, &identity, settings))
    }

    /// Builds the candidate list for an already classified document.
    #[must_use]
    pub fn candidates(
        &self,
        site_root: &SiteRoot,
        identity: &DocumentIdentity,
        settings: &I18nSettings,
    ) -> Vec<LocalizedCandidate> {
        let root = site_root.as_path();
        let mut candidates = Vec::with_capacity(settings.locales.len());
        let default_dir = self.layout.default_plugin_dir(root, &identity.plugin_id);
        candidates.push(self.candidate(
            &settings.default_locale,
            identity,
            with_segments(default_dir, &identity.relative_path),
        ));

        let mut seen = HashSet::from([settings.default_locale.as_str()]);
        for locale in settings.translated_locales() {
            if !seen.insert(locale) {
                continue;
            }
            match self.translated_path(root, locale, identity) {
                Some(path) => candidates.push(self.candidate(locale, identity, path)),
                None => tracing::debug!(locale, "no translation on disk"),
            }
        }
        candidates
    }

    fn translated_path(
        &self,
        root: &Utf8Path,
        locale: &str,
        identity: &DocumentIdentity,
    ) -> Option<Utf8PathBuf> {
        let folders = [
            identity.plugin_id.clone(),
            self.layout.prefixed_plugin(&identity.plugin_id),
        ];
        folders
            .iter()
            .map(|folder| {
                with_segments(
                    self.layout.localized_plugin_dir(root, locale, folder),
                    &identity.relative_path,
                )
            })
            .find(|path| path.exists())
    }

    fn candidate(
        &self,
        locale: &str,
        identity: &DocumentIdentity,
        resolved_path: Utf8PathBuf,
    ) -> LocalizedCandidate {
        let is_current = locale == identity.current_locale;
        let description = if is_current {
            format!("{locale}{CURRENT_SUFFIX}")
        } else {
            locale.to_owned()
        };
        LocalizedCandidate {
            locale: locale.to_owned(),
            display_label: self.names.display_name(locale).to_owned(),
            description,
            is_current,
            resolved_path,
        }
    }
}

fn classify_default(
    layout: &SiteLayout,
    document: &Utf8Path,
    segments: &[&str],
    settings: &I18nSettings,
) -> Result<DocumentIdentity, ResolveError> {
    let [content, plugin_id, path @ ..] = segments else {
        return Err(ResolveError::unrecognised(document, "content"));
    };
    if *content != layout.content_dir || path.is_empty() {
        return Err(ResolveError::unrecognised(document, "content"));
    }

    Ok(DocumentIdentity {
        plugin_id: (*plugin_id).to_owned(),
        relative_path: owned_segments(path),
        is_default_locale: true,
        current_locale: settings.default_locale.clone(),
    })
}

fn owned_segments(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|segment| (*segment).to_owned()).collect()
}

fn with_segments(mut base: Utf8PathBuf, segments: &[String]) -> Utf8PathBuf {
    for segment in segments {
        base.push(segment);
    }
    base
}
