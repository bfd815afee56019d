//! Localization support for the CLI.
//!
//! Constructs a Fluent-backed localizer from embedded resources so
//! user-facing text can be translated without code changes. Falls back to
//! [`NoOpLocalizer`] (hardcoded English) when the Fluent pipeline fails.

use ortho_config::{FluentLocalizer, Localizer, NoOpLocalizer};

use doclocale_core::{CoreError, DEFAULT_PLACEHOLDER};

use crate::errors::AppError;

/// Embedded en-US Fluent catalogue.
pub(crate) static DOCLOCALE_EN_US: &str = include_str!("../locales/en-US/messages.ftl");

/// Message definitions: `(fluent_id, english_fallback)`.
///
/// The fallback values must match `locales/en-US/messages.ftl`.
pub(crate) mod messages {
    pub(crate) const NO_WORKSPACE: (&str, &str) = (
        "doclocale-error-no-workspace",
        "Please open a workspace folder first.",
    );
    pub(crate) const NO_DOCUMENT: (&str, &str) = (
        "doclocale-error-no-document",
        "Please open a localizable document first.",
    );
    pub(crate) const SITE_NOT_FOUND: (&str, &str) = (
        "doclocale-error-site-not-found",
        "Could not find \"docusaurus.config.js\" in your workspace. \
         Please configure the \"site_search_paths\" setting.",
    );
    pub(crate) const SETTINGS_UNREADABLE: (&str, &str) = (
        "doclocale-error-settings-unreadable",
        "Could not read generated \"docusaurus.config.js\" in your workspace. \
         Please ensure you ran docusaurus at least once (.docusaurus folder exists).",
    );
    pub(crate) const NOT_LOCALIZABLE: (&str, &str) = (
        "doclocale-error-not-localizable",
        "The active document is not part of the documentation content.",
    );
    pub(crate) const UNKNOWN_LOCALE: (&str, &str) = (
        "doclocale-error-unknown-locale",
        "No localized version of this document exists for the requested locale.",
    );
    pub(crate) const OPEN_FAILED: (&str, &str) = (
        "doclocale-error-open-failed",
        "The selected document could not be opened.",
    );
    pub(crate) const PICKER_PLACEHOLDER: (&str, &str) = (
        "doclocale-picker-placeholder",
        super::DEFAULT_PLACEHOLDER,
    );

    pub(crate) const ALL: &[(&str, &str)] = &[
        NO_WORKSPACE,
        NO_DOCUMENT,
        SITE_NOT_FOUND,
        SETTINGS_UNREADABLE,
        NOT_LOCALIZABLE,
        UNKNOWN_LOCALE,
        OPEN_FAILED,
        PICKER_PLACEHOLDER,
    ];
}

/// Resolves a single message through the localizer.
pub(crate) fn msg(localizer: &dyn Localizer, entry: &(&str, &str)) -> String {
    localizer.message(entry.0, None, entry.1)
}

/// Builds the application localizer.
///
/// Falls back to [`NoOpLocalizer`] so a localization failure never stops
/// the CLI.
pub(crate) fn build_localizer() -> Box<dyn Localizer> {
    match FluentLocalizer::with_en_us_defaults([DOCLOCALE_EN_US]) {
        Ok(loc) => Box::new(loc),
        Err(_) => Box::new(NoOpLocalizer),
    }
}

/// Message shown to the user for `error`.
///
/// Failures with a dedicated catalogue entry are localized; anything else
/// is reported through its `Display` text.
pub(crate) fn error_message(localizer: &dyn Localizer, error: &AppError) -> String {
    let entry = match error {
        AppError::NoWorkspace => &messages::NO_WORKSPACE,
        AppError::NoDocument => &messages::NO_DOCUMENT,
        AppError::Lookup(CoreError::Locate(_)) => &messages::SITE_NOT_FOUND,
        AppError::Lookup(CoreError::Settings(_)) => &messages::SETTINGS_UNREADABLE,
        AppError::Lookup(CoreError::Resolve(_)) => &messages::NOT_LOCALIZABLE,
        AppError::UnknownLocale { .. } => &messages::UNKNOWN_LOCALE,
        AppError::Host(_) => &messages::OPEN_FAILED,
        _ => return error.to_string(),
    };
    msg(localizer, entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use doclocale_core::LocateError;
    use rstest::rstest;

    #[test]
    fn fluent_and_fallback_outputs_are_identical() {
        let fluent = build_localizer();
        for entry in messages::ALL {
            assert_eq!(
                msg(fluent.as_ref(), entry),
                msg(&NoOpLocalizer, entry),
                "catalogue drifted for {}",
                entry.0
            );
        }
    }

    #[rstest]
    #[case(AppError::NoWorkspace, "Please open a workspace folder first.")]
    #[case(AppError::NoDocument, "Please open a localizable document first.")]
    #[case(
        AppError::Lookup(CoreError::Locate(LocateError::NotFound {
            marker: "docusaurus.config.js".to_owned(),
            probed: vec![Utf8PathBuf::from("/ws")],
        })),
        "Could not find \"docusaurus.config.js\" in your workspace. \
         Please configure the \"site_search_paths\" setting."
    )]
    fn maps_errors_to_catalogue_messages(#[case] error: AppError, #[case] expected: &str) {
        assert_eq!(error_message(build_localizer().as_ref(), &error), expected);
    }

    #[test]
    fn other_errors_use_their_display_text() {
        let error = AppError::WriteOutput(std::io::Error::other("closed"));
        assert_eq!(
            error_message(&NoOpLocalizer, &error),
            "failed to write output: closed"
        );
    }
}
