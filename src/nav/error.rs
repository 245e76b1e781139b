use thiserror::Error;

/// A single reason a locale mapping was rejected.
///
/// `index` / `indices` point into the candidate list in declaration order,
/// which lets callers map an issue back to a source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIssue {
    DuplicateKey { key: String, indices: Vec<usize> },
    EmptyLabel { key: String, index: usize },
    NonStringLabel { key: String, index: usize },
    MissingKey { key: String },
    ExtraKey { key: String, index: usize },
}

impl NavIssue {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::DuplicateKey { key, .. }
            | Self::EmptyLabel { key, .. }
            | Self::NonStringLabel { key, .. }
            | Self::MissingKey { key }
            | Self::ExtraKey { key, .. } => key,
        }
    }

    /// Stable identifier used as the diagnostic code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "duplicate-key",
            Self::EmptyLabel { .. } => "empty-label",
            Self::NonStringLabel { .. } => "non-string-label",
            Self::MissingKey { .. } => "missing-key",
            Self::ExtraKey { .. } => "extra-key",
        }
    }
}

impl std::fmt::Display for NavIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { key, indices } => {
                write!(f, "duplicate key '{key}' ({} occurrences)", indices.len())
            }
            Self::EmptyLabel { key, .. } => write!(f, "empty label for key '{key}'"),
            Self::NonStringLabel { key, .. } => {
                write!(f, "label for key '{key}' is not a string literal")
            }
            Self::MissingKey { key } => write!(f, "missing key '{key}'"),
            Self::ExtraKey { key, .. } => write!(f, "unknown key '{key}'"),
        }
    }
}

/// Validation failure carrying every offending key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Navigation dictionary validation failed:\n{}", format_issues(.issues))]
pub struct NavDictionaryError {
    pub issues: Vec<NavIssue>,
}

impl NavDictionaryError {
    #[must_use]
    pub const fn new(issues: Vec<NavIssue>) -> Self {
        Self { issues }
    }

    /// Keys reported as missing, in canonical order.
    pub fn missing_keys(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().filter_map(|issue| match issue {
            NavIssue::MissingKey { key } => Some(key.as_str()),
            _ => None,
        })
    }
}

fn format_issues(issues: &[NavIssue]) -> String {
    issues
        .iter()
        .enumerate()
        .map(|(i, issue)| format!("  {}. {issue}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors returned by the built-in dictionary registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("No built-in navigation labels for language '{0}'")]
    UnknownLanguage(String),

    #[error("Built-in navigation labels for '{language}' are invalid: {source}")]
    Invalid {
        language: String,
        #[source]
        source: NavDictionaryError,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn display_enumerates_issues() {
        let error = NavDictionaryError::new(vec![
            NavIssue::MissingKey { key: "migrate".to_string() },
            NavIssue::ExtraKey { key: "guides/rss".to_string(), index: 4 },
        ]);

        let message = error.to_string();

        assert_that!(message, contains_substring("Navigation dictionary validation failed"));
        assert_that!(message, contains_substring("1. missing key 'migrate'"));
        assert_that!(message, contains_substring("2. unknown key 'guides/rss'"));
    }

    #[rstest]
    fn missing_keys_filters_other_issues() {
        let error = NavDictionaryError::new(vec![
            NavIssue::EmptyLabel { key: "install".to_string(), index: 1 },
            NavIssue::MissingKey { key: "migrate".to_string() },
        ]);

        assert_that!(error.missing_keys().collect::<Vec<_>>(), elements_are![eq(&"migrate")]);
    }

    #[rstest]
    #[case::duplicate(NavIssue::DuplicateKey { key: "a".to_string(), indices: vec![0, 1] }, "duplicate-key")]
    #[case::missing(NavIssue::MissingKey { key: "a".to_string() }, "missing-key")]
    #[case::extra(NavIssue::ExtraKey { key: "a".to_string(), index: 0 }, "extra-key")]
    fn code_is_stable(#[case] issue: NavIssue, #[case] expected: &str) {
        assert_that!(issue.code(), eq(expected));
        assert_that!(issue.key(), eq("a"));
    }
}
