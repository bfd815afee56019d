//! Human-readable names for locale codes.

use doclocale_config::LocaleNames;

/// A built-in locale display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleInfo {
    /// Locale code as used in folder names.
    pub code: &'static str,
    /// Name shown to the user.
    pub pretty_name: &'static str,
}

const fn info(code: &'static str, pretty_name: &'static str) -> LocaleInfo {
    LocaleInfo { code, pretty_name }
}

/// Built-in display names.
pub const BUILTIN_LOCALES: &[LocaleInfo] = &[
    info("en", "English"),
    info("pl", "Polish"),
    info("fr", "French"),
    info("de", "German"),
    info("es", "Spanish"),
    info("it", "Italian"),
    info("pt", "Portuguese"),
    info("pt-BR", "Portuguese (Brazil)"),
    info("nl", "Dutch"),
    info("sv", "Swedish"),
    info("cs", "Czech"),
    info("ru", "Russian"),
    info("uk", "Ukrainian"),
    info("tr", "Turkish"),
    info("ar", "Arabic"),
    info("he", "Hebrew"),
    info("fa", "Persian"),
    info("hi", "Hindi"),
    info("id", "Indonesian"),
    info("vi", "Vietnamese"),
    info("ja", "Japanese"),
    info("ko", "Korean"),
    info("zh-Hans", "Chinese (Simplified)"),
    info("zh-Hant", "Chinese (Traditional)"),
];

/// Looks up the built-in display name for `code`.
#[must_use]
pub fn builtin_name(code: &str) -> Option<&'static str> {
    BUILTIN_LOCALES
        .iter()
        .find(|locale| locale.code == code)
        .map(|locale| locale.pretty_name)
}

/// Display names with configured overrides layered over the built-ins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayNames {
    overrides: LocaleNames,
}

impl DisplayNames {
    /// Builds a name table with `overrides` taking precedence.
    #[must_use]
    pub const fn new(overrides: LocaleNames) -> Self {
        Self { overrides }
    }

    /// Returns the known name for `code`, if any.
    #[must_use]
    pub fn lookup<'a>(&'a self, code: &str) -> Option<&'a str> {
        self.overrides.get(code).or_else(|| builtin_name(code))
    }

    /// Returns the name for `code`, falling back to the code itself.
    #[must_use]
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.lookup(code).unwrap_or(code)
    }
}
