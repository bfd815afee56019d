//! Selection model for the localized-document picker.

use crate::resolver::LocalizedCandidate;

/// Prompt shown while the picker waits for a choice.
pub const DEFAULT_PLACEHOLDER: &str = "Select a localized document";

/// Ordered candidates offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePicker {
    placeholder: String,
    candidates: Vec<LocalizedCandidate>,
}

impl LocalePicker {
    /// Creates a picker over `candidates` with the default prompt.
    #[must_use]
    pub fn new(candidates: Vec<LocalizedCandidate>) -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            candidates,
        }
    }

    /// Replaces the prompt, typically with a localized one.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Prompt shown to the user.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Candidates in display order.
    #[must_use]
    pub fn candidates(&self) -> &[LocalizedCandidate] {
        &self.candidates
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether there is nothing to choose from.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Position of the candidate for `locale`.
    #[must_use]
    pub fn position_of(&self, locale: &str) -> Option<usize> {
        self.candidates
            .iter()
            .position(|candidate| candidate.locale == locale)
    }

    /// Resolves a host's answer into the chosen candidate.
    ///
    /// `None` means the picker was dismissed; an out-of-range index is
    /// treated the same way.
    #[must_use]
    pub fn choose(&self, choice: Option<usize>) -> Option<&LocalizedCandidate> {
        choice.and_then(|index| self.candidates.get(index))
    }

    /// Chooses the candidate for `locale`, if one was offered.
    #[must_use]
    pub fn choose_locale(&self, locale: &str) -> Option<&LocalizedCandidate> {
        self.choose(self.position_of(locale))
    }
}
