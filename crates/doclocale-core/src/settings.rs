//! Reads the localization settings from the generated site configuration.
//!
//! Docusaurus writes the fully resolved site configuration to a generated
//! module after its first run. The module is executable code, so it goes
//! through the sandboxed evaluator before the `i18n` section is extracted.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::{Deserialize, Serialize};

use doclocale_config::SiteLayout;
use doclocale_script::evaluate_module;

use crate::error::SettingsError;
use crate::site::SiteRoot;

/// Localization settings of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nSettings {
    /// Locale whose content lives in the content folder.
    pub default_locale: String,
    /// Every locale the site is built for, in declaration order.
    pub locales: Vec<String>,
}

impl I18nSettings {
    /// Locales other than the default, in declaration order.
    pub fn translated_locales(&self) -> impl Iterator<Item = &str> {
        self.locales
            .iter()
            .map(String::as_str)
            .filter(|locale| *locale != self.default_locale)
    }
}

#[derive(Deserialize)]
struct ExportedConfig {
    i18n: I18nSettings,
}

/// Reads the localization settings of the site at `site_root`.
///
/// The read is confined to the site directory, so a generated configuration
/// path escaping it is refused.
///
/// # Errors
///
/// Returns [`SettingsError::NotFound`] when the generated module is absent,
/// [`SettingsError::Read`] on IO failure, and one of the parse variants when
/// the module cannot be evaluated or lacks valid `i18n` settings.
pub fn read_settings(
    site_root: &SiteRoot,
    layout: &SiteLayout,
) -> Result<I18nSettings, SettingsError> {
    let path = generated_config_path(site_root, layout);
    let source = read_confined(site_root.as_path(), &layout.generated_config, &path)?;
    parse_settings(&source, &path)
}

fn read_confined(
    site_root: &Utf8Path,
    relative: &Utf8Path,
    path: &Utf8Path,
) -> Result<String, SettingsError> {
    let dir = Dir::open_ambient_dir(site_root, ambient_authority()).map_err(|source| {
        SettingsError::Read {
            path: path.to_owned(),
            source,
        }
    })?;

    match dir.read_to_string(relative) {
        Ok(source) => Ok(source),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "generated configuration missing");
            Err(SettingsError::NotFound {
                path: path.to_owned(),
            })
        }
        Err(source) => Err(SettingsError::Read {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Evaluates module `source` and extracts its `i18n` settings.
///
/// `path` is only used for error reporting.
///
/// # Errors
///
/// Returns a parse variant of [`SettingsError`] when evaluation or
/// extraction fails, or when the default locale is not listed.
pub fn parse_settings(source: &str, path: &Utf8Path) -> Result<I18nSettings, SettingsError> {
    let exported = evaluate_module(source).map_err(|source| SettingsError::Evaluate {
        path: path.to_owned(),
        source,
    })?;
    let ExportedConfig { i18n } =
        serde_json::from_value(exported).map_err(|source| SettingsError::Extract {
            path: path.to_owned(),
            source,
        })?;

    if !i18n.locales.contains(&i18n.default_locale) {
        return Err(SettingsError::DefaultLocaleNotListed {
            path: path.to_owned(),
            default_locale: i18n.default_locale,
        });
    }

    tracing::debug!(
        default_locale = %i18n.default_locale,
        locales = ?i18n.locales,
        "read i18n settings"
    );
    Ok(i18n)
}

/// Location of the generated configuration for a site.
#[must_use]
pub fn generated_config_path(site_root: &SiteRoot, layout: &SiteLayout) -> Utf8PathBuf {
    site_root.as_path().join(&layout.generated_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::{SiteFixture, generated_config};
    use doclocale_script::ScriptError;
    use rstest::rstest;

    fn path() -> Utf8PathBuf {
        Utf8PathBuf::from("/site/.docusaurus/docusaurus.config.js")
    }

    #[test]
    fn reads_settings_from_generated_module() {
        let fixture = SiteFixture::new();
        fixture.write(
            ".docusaurus/docusaurus.config.js",
            &generated_config("en", &["en", "pl", "fr"]),
        );

        let settings =
            read_settings(&fixture.site_root(), &SiteLayout::default()).expect("settings");

        assert_eq!(settings.default_locale, "en");
        assert_eq!(settings.locales, vec!["en", "pl", "fr"]);
        assert_eq!(
            settings.translated_locales().collect::<Vec<_>>(),
            vec!["pl", "fr"]
        );
    }

    #[test]
    fn missing_module_is_not_found() {
        let fixture = SiteFixture::new();

        let error = read_settings(&fixture.site_root(), &SiteLayout::default())
            .expect_err("missing module");

        let expected = generated_config_path(&fixture.site_root(), &SiteLayout::default());
        match error {
            SettingsError::NotFound { path } => assert_eq!(path, expected),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn paths_escaping_the_site_are_refused() {
        let fixture = SiteFixture::new();
        fixture.write("outside.js", &generated_config("en", &["en"]));
        fixture.mkdir("site");
        let layout = SiteLayout {
            generated_config: Utf8PathBuf::from("../outside.js"),
            ..SiteLayout::default()
        };

        let error = read_settings(&SiteRoot::new(fixture.workspace().join("site")), &layout)
            .expect_err("escape refused");

        assert!(matches!(error, SettingsError::Read { .. }), "got {error:?}");
    }

    #[test]
    fn ignores_unrelated_configuration() {
        let source = r#"
            const prism = require('prism-react-renderer');
            export default {
              title: 'Docs',
              themeConfig: { prism: { theme: prism.themes.github } },
              plugins: [() => ({ name: 'custom' })],
              i18n: { defaultLocale: 'pl', locales: ['pl', 'en'], localeConfigs: {} },
            };
        "#;

        let settings = parse_settings(source, &path()).expect("settings");

        assert_eq!(settings.default_locale, "pl");
        assert_eq!(settings.locales, vec!["pl", "en"]);
    }

    #[rstest]
    #[case::no_i18n("export default { title: 'Docs' };")]
    #[case::wrong_type("export default { i18n: { defaultLocale: 'en', locales: 'en' } };")]
    #[case::missing_default("export default { i18n: { locales: ['en'] } };")]
    fn unusable_i18n_sections_fail_extraction(#[case] source: &str) {
        let error = parse_settings(source, &path()).expect_err("extraction fails");
        assert!(matches!(error, SettingsError::Extract { .. }), "got {error:?}");
        assert!(error.is_parse_error());
    }

    #[test]
    fn default_locale_must_be_listed() {
        let error = parse_settings(
            "export default { i18n: { defaultLocale: 'en', locales: ['pl'] } };",
            &path(),
        )
        .expect_err("invariant violated");

        assert!(matches!(
            error,
            SettingsError::DefaultLocaleNotListed { ref default_locale, .. } if default_locale == "en"
        ));
    }

    #[test]
    fn syntax_errors_are_reported_as_evaluation_failures() {
        let error = parse_settings("export default { i18n: {", &path()).expect_err("syntax");

        assert!(matches!(
            error,
            SettingsError::Evaluate {
                source: ScriptError::Syntax { .. },
                ..
            }
        ));
    }
}
