//! Locates the documentation site inside a workspace.

use std::fmt;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use doclocale_config::SiteLayout;

use crate::error::LocateError;

/// Directory containing the site's marker file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteRoot(Utf8PathBuf);

impl SiteRoot {
    /// Wraps an already-known site directory.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self(normalise(&path.into()))
    }

    /// Returns the site directory.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }
}

impl AsRef<Utf8Path> for SiteRoot {
    fn as_ref(&self) -> &Utf8Path {
        &self.0
    }
}

impl fmt::Display for SiteRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Finds the site root beneath `workspace_root`.
///
/// Each entry of [`SiteLayout::site_search_paths`] is probed in order and the
/// first directory holding the marker file as a regular file wins. Probing
/// follows symlinks, and directories that cannot be inspected count as not
/// holding the marker.
///
/// # Errors
///
/// Returns [`LocateError::NotFound`] when no candidate holds the marker.
pub fn locate(workspace_root: &Utf8Path, layout: &SiteLayout) -> Result<SiteRoot, LocateError> {
    let mut probed = Vec::with_capacity(layout.site_search_paths.len());
    for candidate in layout.site_search_paths.iter() {
        let directory = normalise(&workspace_root.join(candidate));
        if directory.join(&layout.marker_file).is_file() {
            tracing::debug!(site_root = %directory, "located site root");
            return Ok(SiteRoot(directory));
        }
        tracing::trace!(directory = %directory, "marker file not present");
        probed.push(directory);
    }

    Err(LocateError::NotFound {
        marker: layout.marker_file.clone(),
        probed,
    })
}

fn normalise(path: &Utf8Path) -> Utf8PathBuf {
    path.components()
        .filter(|component| !matches!(component, Utf8Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::SiteFixture;
    use doclocale_config::SearchPaths;

    #[test]
    fn prefers_workspace_root_over_website_folder() {
        let fixture = SiteFixture::new();
        fixture.write("docusaurus.config.js", "");
        fixture.write("website/docusaurus.config.js", "");

        let root = locate(fixture.workspace(), &SiteLayout::default()).expect("site root");

        assert_eq!(root.as_path(), fixture.workspace());
    }

    #[test]
    fn falls_back_to_website_folder() {
        let fixture = SiteFixture::new();
        fixture.write("website/docusaurus.config.js", "");

        let root = locate(fixture.workspace(), &SiteLayout::default()).expect("site root");

        assert_eq!(root.as_path(), fixture.workspace().join("website"));
    }

    #[test]
    fn ignores_directories_named_like_the_marker() {
        let fixture = SiteFixture::new();
        fixture.mkdir("docusaurus.config.js");
        fixture.write("website/docusaurus.config.js", "");

        let root = locate(fixture.workspace(), &SiteLayout::default()).expect("site root");

        assert_eq!(root.as_path(), fixture.workspace().join("website"));
    }

    #[test]
    fn reports_every_probed_directory() {
        let fixture = SiteFixture::new();

        let error = locate(fixture.workspace(), &SiteLayout::default()).expect_err("no site");

        let LocateError::NotFound { marker, probed } = error;
        assert_eq!(marker, "docusaurus.config.js");
        assert_eq!(
            probed,
            vec![
                fixture.workspace().to_owned(),
                fixture.workspace().join("website"),
            ]
        );
    }

    #[test]
    fn honours_configured_search_paths() {
        let fixture = SiteFixture::new();
        fixture.write("docs-site/docusaurus.config.js", "");
        let layout = SiteLayout {
            site_search_paths: SearchPaths::new(["docs-site"]),
            ..SiteLayout::default()
        };

        let root = locate(fixture.workspace(), &layout).expect("site root");

        assert_eq!(root.as_path(), fixture.workspace().join("docs-site"));
    }

    #[test]
    fn normalises_current_directory_segments() {
        assert_eq!(SiteRoot::new("/ws/./website/.").as_path(), "/ws/website");
    }
}
