//! Built-in navigation dictionaries.
//!
//! Each table is validated once, on first access, and shared for the rest of
//! the process.

use std::sync::LazyLock;

use super::dictionary::{
    CanonicalKeys,
    NavDictionary,
};
use super::error::{
    NavDictionaryError,
    NavError,
};
use super::locales::{
    en,
    pt_br,
};
use crate::input::language::same_language;

/// Language whose table defines the canonical key set.
pub const CANONICAL_LANGUAGE: &str = "en";

/// Languages shipped with the crate, canonical first.
pub const BUILTIN_LANGUAGES: &[&str] = &[CANONICAL_LANGUAGE, "pt-br"];

fn builtin_canonical_keys() -> CanonicalKeys {
    en::ENTRIES.iter().map(|(key, _)| *key).collect()
}

static CANONICAL: LazyLock<Result<NavDictionary, NavDictionaryError>> =
    LazyLock::new(|| NavDictionary::validate(en::ENTRIES, &builtin_canonical_keys()));

static PT_BR: LazyLock<Result<NavDictionary, NavDictionaryError>> =
    LazyLock::new(|| NavDictionary::validate(pt_br::ENTRIES, &builtin_canonical_keys()));

fn resolve(
    language: &str,
    table: &'static Result<NavDictionary, NavDictionaryError>,
) -> Result<&'static NavDictionary, NavError> {
    table.as_ref().map_err(|source| NavError::Invalid {
        language: language.to_string(),
        source: source.clone(),
    })
}

/// The canonical (English) dictionary.
///
/// # Errors
/// Returns [`NavError::Invalid`] if the English table has duplicate keys or empty labels.
pub fn canonical() -> Result<&'static NavDictionary, NavError> {
    resolve(CANONICAL_LANGUAGE, &CANONICAL)
}

/// Canonical key set derived from the English table.
///
/// # Errors
/// Same as [`canonical`].
pub fn canonical_keys() -> Result<CanonicalKeys, NavError> {
    canonical().map(CanonicalKeys::from_dictionary)
}

/// Looks up a built-in dictionary. Matching ignores case and `-`/`_`
/// (`pt-BR`, `pt_br` and `pt-br` are the same language).
///
/// # Errors
/// - [`NavError::UnknownLanguage`] when no table exists for `language`
/// - [`NavError::Invalid`] when the table does not match the canonical key set
pub fn dictionary(language: &str) -> Result<&'static NavDictionary, NavError> {
    if same_language(language, CANONICAL_LANGUAGE) {
        canonical()
    } else if same_language(language, "pt-br") {
        resolve("pt-br", &PT_BR)
    } else {
        Err(NavError::UnknownLanguage(language.to_string()))
    }
}
