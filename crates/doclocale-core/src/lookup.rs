//! End-to-end lookup of a document's localized versions.

use camino::Utf8Path;

use doclocale_config::SiteLayout;

use crate::error::CoreError;
use crate::locale_names::DisplayNames;
use crate::resolver::{DocumentIdentity, LocaleResolver, LocalizedCandidate};
use crate::settings::{I18nSettings, read_settings};
use crate::site::{SiteRoot, locate};

/// Everything learned while resolving a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedDocuments {
    /// Site the document belongs to.
    pub site_root: SiteRoot,
    /// Localization settings of the site.
    pub settings: I18nSettings,
    /// Classification of the document.
    pub identity: DocumentIdentity,
    /// Candidates, default locale first.
    pub candidates: Vec<LocalizedCandidate>,
}

impl LocalizedDocuments {
    /// Candidate for the document's own locale.
    #[must_use]
    pub fn current(&self) -> Option<&LocalizedCandidate> {
        self.candidates.iter().find(|candidate| candidate.is_current)
    }
}

/// Locates the site, reads its settings and resolves `document`.
///
/// # Errors
///
/// Returns a [`CoreError`] wrapping the first step that failed.
pub fn find_localized_documents(
    workspace_root: &Utf8Path,
    document: &Utf8Path,
    layout: &SiteLayout,
    names: &DisplayNames,
) -> Result<LocalizedDocuments, CoreError> {
    let site_root = locate(workspace_root, layout)?;
    let settings = read_settings(&site_root, layout)?;
    let resolver = LocaleResolver::new(layout, names);
    let identity = resolver.classify(&site_root, document, &settings)?;
    let candidates = resolver.candidates(&site_root, &identity, &settings);
    tracing::debug!(
        document = %document,
        candidates = candidates.len(),
        "resolved localized documents"
    );

    Ok(LocalizedDocuments {
        site_root,
        settings,
        identity,
        candidates,
    })
}
