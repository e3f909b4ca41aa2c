use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Error conditions surfaced by the search layer.
///
/// The matcher itself never returns these: an unparseable regex is treated
/// as "no match" there. They exist for callers that validate input up
/// front (settings import, a search field that greys out its confirm
/// button).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search pattern cannot be empty")]
    EmptyPattern,
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Determines how the search pattern is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Plain,
    Regex,
}

/// Direction for iterative searches (`Find Next` / `Find Previous`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl Default for SearchDirection {
    fn default() -> Self {
        Self::Forward
    }
}

/// Options supplied to the matcher.
///
/// `whole_word` and regex mode are mutually exclusive in the UI; the
/// matcher tolerates both being set by ignoring `whole_word` whenever
/// `mode` is [`SearchMode::Regex`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub pattern: String,
    pub mode: SearchMode,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub direction: SearchDirection,
}

impl SearchOptions {
    /// Creates a new option set for the specified pattern with sensible
    /// defaults: plain text, case-insensitive, forward.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            mode: SearchMode::Plain,
            case_sensitive: false,
            whole_word: false,
            direction: SearchDirection::Forward,
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.pattern.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        if matches!(self.mode, SearchMode::Regex) {
            self.compile_regex()?;
        }
        Ok(())
    }

    /// Compiles the pattern for regex mode, mapping the case flag onto the
    /// engine's case option.
    pub fn compile_regex(&self) -> Result<Regex, SearchError> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(!self.case_sensitive)
            .build()
            .map_err(|err| SearchError::InvalidPattern(err.to_string()))
    }

    pub(crate) fn effective_whole_word(&self) -> bool {
        self.whole_word && matches!(self.mode, SearchMode::Plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_plain_insensitive_forward() {
        let options = SearchOptions::new("needle");
        assert_eq!(options.mode, SearchMode::Plain);
        assert!(!options.case_sensitive);
        assert!(!options.whole_word);
        assert_eq!(options.direction, SearchDirection::Forward);
    }

    #[test]
    fn validate_rejects_empty_patterns() {
        let options = SearchOptions::new("");
        assert_eq!(options.validate(), Err(SearchError::EmptyPattern));
    }

    #[test]
    fn validate_reports_bad_regexes() {
        let mut options = SearchOptions::new("foo[");
        options.mode = SearchMode::Regex;
        assert!(matches!(
            options.validate(),
            Err(SearchError::InvalidPattern(_))
        ));
        // The same pattern is fine as plain text.
        options.mode = SearchMode::Plain;
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn whole_word_is_ignored_in_regex_mode() {
        let mut options = SearchOptions::new(r"\w+");
        options.whole_word = true;
        assert!(options.effective_whole_word());
        options.mode = SearchMode::Regex;
        assert!(!options.effective_whole_word());
    }
}
