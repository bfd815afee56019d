//! Operator overrides for locale display names.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Operator-supplied display names keyed by locale code.
///
/// Entries extend or replace the built-in display-name table. On the command
/// line and in the environment they are written as `code=Name` pairs joined
/// by commas, for example `pl=Polski,pt-BR=Português (Brasil)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocaleNames(BTreeMap<String, String>);

impl LocaleNames {
    /// Builds a name table from `(code, name)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(code, name)| (code.into(), name.into()))
                .collect(),
        )
    }

    /// Looks up the configured name for `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    /// Whether no names were configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LocaleNames {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(code, name)| format!("{code}={name}"))
            .collect::<Vec<_>>()
            .join(",");
        formatter.write_str(&joined)
    }
}

impl FromStr for LocaleNames {
    type Err = LocaleNamesParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut names = BTreeMap::new();
        for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, name) = entry
                .split_once('=')
                .ok_or_else(|| LocaleNamesParseError::MissingSeparator(entry.to_owned()))?;
            let code = code.trim();
            if code.is_empty() {
                return Err(LocaleNamesParseError::MissingCode(entry.to_owned()));
            }
            names.insert(code.to_owned(), name.trim().to_owned());
        }
        Ok(Self(names))
    }
}

impl<'de> Deserialize<'de> for LocaleNames {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Joined(String),
            Table(BTreeMap<String, String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Joined(joined) => joined.parse().map_err(serde::de::Error::custom),
            Repr::Table(table) => Ok(Self(table)),
        }
    }
}

/// Errors encountered while parsing [`LocaleNames`] from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleNamesParseError {
    /// An entry lacked the `=` between code and name.
    #[error("locale name entry '{0}' is missing the '=' separator")]
    MissingSeparator(String),
    /// An entry had an empty locale code.
    #[error("locale name entry '{0}' has no locale code")]
    MissingCode(String),
}
