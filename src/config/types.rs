use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::input::language::same_language;
use crate::nav::ValidationPolicy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings as sent by editors in `workspace/didChangeConfiguration`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    pub nav_i18n: NavSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NavSettings {
    pub nav_files: NavFilesConfig,

    pub exclude_patterns: Vec<String>,

    /// Language whose navigation file defines the canonical key set.
    pub canonical_language: String,

    /// Function wrapping the table in TypeScript/JavaScript nav files.
    pub wrapper_function: String,

    /// Languages held to the full canonical key set.
    ///
    /// - `None`: every language is required (default)
    /// - `Some([...])`: only these languages; others may omit keys
    ///
    /// Mutually exclusive with `optional_languages`.
    pub required_languages: Option<Vec<String>>,

    /// Languages allowed to omit canonical keys while being translated.
    ///
    /// Mutually exclusive with `required_languages`.
    pub optional_languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NavFilesConfig {
    pub file_pattern: String,
}

impl Default for NavFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/i18n/*/nav.{ts,js,json}".to_string() }
    }
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            nav_files: NavFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string()],
            canonical_language: "en".to_string(),
            wrapper_function: "NavDictionary".to_string(),
            required_languages: None,
            optional_languages: None,
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl NavSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Wrapper function is not an identifier
    /// - Both language lists are set
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.nav_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "navFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/i18n/*/nav.{ts,js,json}\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.nav_files.file_pattern) {
            errors.push(ValidationError::new(
                "navFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.nav_files.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.canonical_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "canonicalLanguage",
                "The canonical language cannot be empty. Example: \"en\"",
            ));
        }

        if !is_identifier(&self.wrapper_function) {
            errors.push(ValidationError::new(
                "wrapperFunction",
                format!(
                    "'{}' is not a valid function name. Example: \"NavDictionary\"",
                    self.wrapper_function
                ),
            ));
        }

        if self.required_languages.is_some() && self.optional_languages.is_some() {
            errors.push(ValidationError::new(
                "requiredLanguages/optionalLanguages",
                "Cannot specify both 'requiredLanguages' and 'optionalLanguages'. Please use only one",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    #[must_use]
    pub fn is_canonical(&self, language: &str) -> bool {
        same_language(language, &self.canonical_language)
    }

    /// Validation policy for a locale according to the language lists.
    #[must_use]
    pub fn policy_for(&self, language: &str) -> ValidationPolicy {
        let listed = |languages: &[String]| languages.iter().any(|l| same_language(l, language));

        let allow_missing = match (&self.required_languages, &self.optional_languages) {
            (Some(required), _) => !listed(required.as_slice()),
            (None, Some(optional)) => listed(optional.as_slice()),
            (None, None) => false,
        };
        ValidationPolicy { allow_missing }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = NavSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"canonicalLanguage": "pt-br", "optionalLanguages": ["ja"]}"#;

        let settings: NavSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.canonical_language, eq("pt-br"));
        assert_that!(settings.wrapper_function, eq("NavDictionary"));
        assert_that!(settings.optional_languages, some(elements_are![eq("ja")]));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: NavSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings, eq(&NavSettings::default()));
        assert_that!(settings.nav_files.file_pattern, eq("**/i18n/*/nav.{ts,js,json}"));
        assert_that!(settings.exclude_patterns, elements_are![eq("node_modules/**")]);
    }

    #[rstest]
    fn deserialize_server_settings() {
        let json = r#"{"navI18n": {"wrapperFunction": "defineNav"}}"#;

        let settings: ServerSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.nav_i18n.wrapper_function, eq("defineNav"));
    }

    #[rstest]
    fn validate_invalid_file_pattern_empty() {
        let settings = NavSettings {
            nav_files: NavFilesConfig { file_pattern: String::new() },
            ..NavSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("navFiles.filePattern")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_file_pattern_glob() {
        let settings = NavSettings {
            nav_files: NavFilesConfig { file_pattern: "**/i18n/*/nav.{ts,js".to_string() },
            ..NavSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("navFiles.filePattern")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_exclude_pattern() {
        let settings = NavSettings {
            exclude_patterns: vec!["dist/**".to_string(), "invalid[pattern".to_string()],
            ..NavSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("excludePatterns[1]"))])
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::dotted("nav.Dictionary")]
    #[case::leading_digit("1nav")]
    fn validate_invalid_wrapper_function(#[case] wrapper: &str) {
        let settings =
            NavSettings { wrapper_function: wrapper.to_string(), ..NavSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("wrapperFunction"))])
        );
    }

    #[rstest]
    fn validate_both_language_lists() {
        let settings = NavSettings {
            required_languages: Some(vec!["pt-br".to_string()]),
            optional_languages: Some(vec!["ja".to_string()]),
            ..NavSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(
                ValidationError.field_path,
                eq("requiredLanguages/optionalLanguages")
            )])
        );
    }

    #[rstest]
    #[case::default_strict(None, None, "pt-br", false)]
    #[case::required_listed(Some(vec!["pt-BR"]), None, "pt-br", false)]
    #[case::required_unlisted(Some(vec!["ja"]), None, "pt-br", true)]
    #[case::optional_listed(None, Some(vec!["pt_br"]), "pt-br", true)]
    #[case::optional_unlisted(None, Some(vec!["ja"]), "pt-br", false)]
    fn policy_for_language(
        #[case] required: Option<Vec<&str>>,
        #[case] optional: Option<Vec<&str>>,
        #[case] language: &str,
        #[case] allow_missing: bool,
    ) {
        let to_owned =
            |list: Vec<&str>| -> Vec<String> { list.into_iter().map(ToString::to_string).collect() };
        let settings = NavSettings {
            required_languages: required.map(to_owned),
            optional_languages: optional.map(to_owned),
            ..NavSettings::default()
        };

        assert_that!(settings.policy_for(language).allow_missing, eq(allow_missing));
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = NavSettings {
            canonical_language: String::new(),
            wrapper_function: String::new(),
            ..NavSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let error_message = format!("{}", ConfigError::ValidationErrors(errors));

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. canonicalLanguage"));
        assert_that!(error_message, contains_substring("2. wrapperFunction"));
    }
}
