//! The open and list actions, driven through an [`EditorHost`].

use ortho_config::Localizer;

use doclocale_config::{Config, SiteLayout};
use doclocale_core::{
    DisplayNames, LocalePicker, LocalizedCandidate, LocalizedDocuments, find_localized_documents,
};

use crate::errors::AppError;
use crate::host::{EditorHost, ViewColumn};
use crate::localizer::{error_message, messages, msg};
use crate::output::Opened;

/// Everything an action needs besides the host.
pub(crate) struct CommandContext<'a> {
    pub(crate) layout: SiteLayout,
    pub(crate) names: DisplayNames,
    pub(crate) localizer: &'a dyn Localizer,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn from_config(config: &Config, localizer: &'a dyn Localizer) -> Self {
        Self {
            layout: config.site_layout(),
            names: DisplayNames::new(config.locale_names().clone()),
            localizer,
        }
    }
}

/// Offers the localized versions of the active document and shows the
/// chosen one.
///
/// With `locale` set the picker is skipped. Returns `Ok(None)` when the user
/// dismissed the picker.
pub(crate) fn open_localized_document<H: EditorHost>(
    host: &mut H,
    context: &CommandContext<'_>,
    locale: Option<&str>,
) -> Result<Option<Opened>, AppError> {
    let found = lookup(host, context)?;
    let placeholder = msg(context.localizer, &messages::PICKER_PLACEHOLDER);
    let picker = LocalePicker::new(found.candidates).with_placeholder(placeholder);

    let chosen = match locale {
        Some(wanted) => Some(picker.choose_locale(wanted).ok_or_else(|| {
            AppError::UnknownLocale {
                locale: wanted.to_owned(),
            }
        })?),
        None => picker.choose(host.show_selectable_list(&picker)),
    };
    let Some(chosen) = chosen else {
        tracing::debug!("picker dismissed");
        return Ok(None);
    };

    let existing = host
        .open_documents()
        .into_iter()
        .find(|view| view.path == chosen.resolved_path);
    if let Some(view) = existing {
        let focused = host.open_and_focus(&chosen.resolved_path, view.column)?;
        return Ok(Some(Opened {
            locale: chosen.locale.clone(),
            path: focused.path,
            line: None,
            column: focused.column,
            reused_view: true,
        }));
    }

    let line = host.active_document().map_or(0, |active| active.line);
    let view = host.open_and_focus(&chosen.resolved_path, Some(ViewColumn::Beside))?;
    host.reveal_and_select_line(&view, line)?;
    Ok(Some(Opened {
        locale: chosen.locale.clone(),
        path: view.path,
        line: Some(line),
        column: view.column,
        reused_view: false,
    }))
}

/// Returns the localized versions of the active document.
pub(crate) fn list_localized_documents<H: EditorHost>(
    host: &H,
    context: &CommandContext<'_>,
) -> Result<Vec<LocalizedCandidate>, AppError> {
    lookup(host, context).map(|found| found.candidates)
}

/// Shows a failed action's error through the host before passing it on.
pub(crate) fn report<H: EditorHost, T>(
    host: &mut H,
    context: &CommandContext<'_>,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    result.inspect_err(|error| {
        tracing::debug!(%error, "command failed");
        host.show_error(&error_message(context.localizer, error));
    })
}

fn lookup<H: EditorHost>(
    host: &H,
    context: &CommandContext<'_>,
) -> Result<LocalizedDocuments, AppError> {
    let workspace = host.workspace_root().ok_or(AppError::NoWorkspace)?;
    let active = host.active_document().ok_or(AppError::NoDocument)?;
    Ok(find_localized_documents(
        &workspace,
        &active.path,
        &context.layout,
        &context.names,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DocumentView;
    use crate::tests::support::{FakeHost, SiteFixture};
    use camino::Utf8PathBuf;
    use ortho_config::NoOpLocalizer;
    use rstest::{fixture, rstest};

    #[fixture]
    fn site() -> SiteFixture {
        let site = SiteFixture::with_locales("en", &["en", "pl", "fr"]);
        site.write("content/learn/guide.mdx", "# Guide\n");
        site.write("i18n/pl/learn/current/guide.mdx", "# Poradnik\n");
        site
    }

    fn context() -> CommandContext<'static> {
        CommandContext::from_config(&Config::default(), &NoOpLocalizer)
    }

    fn host_for(site: &SiteFixture, document: &str, line: u32) -> FakeHost {
        FakeHost::new(Some(site.workspace().to_owned()))
            .with_document(site.path(document), line)
    }

    #[rstest]
    fn opens_the_chosen_locale_beside_and_reveals_the_line(site: SiteFixture) {
        let mut host = host_for(&site, "content/learn/guide.mdx", 12).answering(Some(1));

        let opened = open_localized_document(&mut host, &context(), None)
            .expect("open succeeds")
            .expect("a candidate was chosen");

        let expected = site.path("i18n/pl/learn/current/guide.mdx");
        assert_eq!(opened.locale, "pl");
        assert_eq!(opened.path, expected);
        assert_eq!(opened.line, Some(12));
        assert_eq!(opened.column, Some(ViewColumn::Beside));
        assert!(!opened.reused_view);
        assert_eq!(host.revealed, vec![(expected, 12)]);
        assert_eq!(host.placeholders, vec![messages::PICKER_PLACEHOLDER.1.to_owned()]);
    }

    #[rstest]
    fn focuses_an_already_open_document_without_moving_the_cursor(site: SiteFixture) {
        let translation = site.path("i18n/pl/learn/current/guide.mdx");
        let mut host = host_for(&site, "content/learn/guide.mdx", 4)
            .answering(Some(1))
            .with_open_view(DocumentView {
                path: translation.clone(),
                column: Some(ViewColumn::Index(2)),
            });

        let opened = open_localized_document(&mut host, &context(), None)
            .expect("open succeeds")
            .expect("a candidate was chosen");

        assert!(opened.reused_view);
        assert_eq!(opened.column, Some(ViewColumn::Index(2)));
        assert_eq!(opened.line, None);
        assert_eq!(host.opened, vec![(translation, Some(ViewColumn::Index(2)))]);
        assert!(host.revealed.is_empty());
    }

    #[rstest]
    fn dismissing_the_picker_opens_nothing(site: SiteFixture) {
        let mut host = host_for(&site, "content/learn/guide.mdx", 0).answering(None);

        let opened = open_localized_document(&mut host, &context(), None).expect("no error");

        assert_eq!(opened, None);
        assert!(host.opened.is_empty());
    }

    #[rstest]
    fn requested_locale_skips_the_picker(site: SiteFixture) {
        let mut host = host_for(&site, "content/learn/guide.mdx", 0);

        let opened = open_localized_document(&mut host, &context(), Some("en"))
            .expect("open succeeds")
            .expect("a candidate was chosen");

        assert_eq!(opened.path, site.path("content/learn/guide.mdx"));
        assert!(host.placeholders.is_empty());
    }

    #[rstest]
    #[case::untranslated("fr")]
    #[case::unconfigured("de")]
    fn unavailable_locale_is_rejected(site: SiteFixture, #[case] locale: &str) {
        let mut host = host_for(&site, "content/learn/guide.mdx", 0);

        let error = open_localized_document(&mut host, &context(), Some(locale))
            .expect_err("locale is unavailable");

        assert!(
            matches!(&error, AppError::UnknownLocale { locale: found } if found == locale),
            "unexpected error: {error}"
        );
    }

    #[rstest]
    #[case::no_workspace(FakeHost::new(None), "Please open a workspace folder first.")]
    #[case::no_document(
        FakeHost::new(Some(Utf8PathBuf::from("/ws"))),
        "Please open a localizable document first."
    )]
    fn missing_editor_state_is_reported(#[case] mut host: FakeHost, #[case] expected: &str) {
        let context = context();
        let result = open_localized_document(&mut host, &context, None);
        let reported = report(&mut host, &context, result);

        assert!(reported.is_err());
        assert_eq!(host.errors, vec![expected.to_owned()]);
    }

    #[test]
    fn missing_site_is_reported_with_the_setting_to_change() {
        let empty = SiteFixture::empty();
        empty.write("content/learn/guide.mdx", "");
        let mut host = host_for(&empty, "content/learn/guide.mdx", 0);
        let context = context();

        let result = open_localized_document(&mut host, &context, None);
        let _ = report(&mut host, &context, result);

        assert_eq!(host.errors, vec![messages::SITE_NOT_FOUND.1.to_owned()]);
    }

    #[rstest]
    #[case::site_readme("README.md")]
    #[case::blog_post("blog/2024/post.md")]
    fn documents_outside_the_content_folders_are_not_localizable(
        site: SiteFixture,
        #[case] relative: &str,
    ) {
        site.write(relative, "");
        let mut host = host_for(&site, relative, 0);
        let context = context();

        let result = open_localized_document(&mut host, &context, None);
        let _ = report(&mut host, &context, result);

        assert_eq!(host.errors, vec![messages::NOT_LOCALIZABLE.1.to_owned()]);
    }

    #[rstest]
    fn lists_candidates_in_configured_order(site: SiteFixture) {
        let host = host_for(&site, "content/learn/guide.mdx", 0);

        let candidates = list_localized_documents(&host, &context()).expect("list succeeds");

        let locales: Vec<&str> = candidates.iter().map(|c| c.locale.as_str()).collect();
        assert_eq!(locales, ["en", "pl"]);
        assert!(candidates.first().is_some_and(|c| c.is_current));
    }
}
