//! Locale resolution for Docusaurus documentation sites.
//!
//! Given a workspace and the path of an open document, this crate finds the
//! site root, reads the site's `i18n` settings from the configuration module
//! Docusaurus generates, and lists the versions of the document that exist
//! in each configured locale. Presentation and opening of the chosen file
//! are left to the caller.

pub mod error;
pub mod locale_names;
pub mod lookup;
pub mod picker;
pub mod resolver;
pub mod settings;
pub mod site;

pub use error::{CoreError, LocateError, ResolveError, SettingsError};
pub use locale_names::{BUILTIN_LOCALES, DisplayNames, LocaleInfo, builtin_name};
pub use lookup::{LocalizedDocuments, find_localized_documents};
pub use picker::{DEFAULT_PLACEHOLDER, LocalePicker};
pub use resolver::{DocumentIdentity, LocaleResolver, LocalizedCandidate};
pub use settings::{I18nSettings, generated_config_path, parse_settings, read_settings};
pub use site::{SiteRoot, locate};

#[cfg(test)]
mod tests;
