//! Locale detection for navigation files.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

/// Locale codes used by documentation sites, stored normalized.
///
/// Path segments such as `nav`, `ts` or `js` are not in this list.
static KNOWN_LOCALES: LazyLock<HashSet<String>> = LazyLock::new(|| {
    [
        "ar", "bg", "ca", "cs", "da", "de", "de-de", "el", "en", "en-gb", "en-us", "es",
        "es-419", "es-mx", "fa", "fi", "fr", "fr-ca", "fr-fr", "he", "hi", "hu", "id", "it",
        "ja", "ja-jp", "ko", "ko-kr", "lt", "lv", "ms", "nb", "nl", "pl", "pt", "pt-br",
        "pt-pt", "ro", "ru", "sk", "sl", "sr", "sv", "th", "tr", "uk", "vi", "zh", "zh-cn",
        "zh-hans", "zh-hant", "zh-hk", "zh-tw",
    ]
    .iter()
    .map(|code| normalize_language_code(code))
    .collect()
});

/// Lowercases and replaces `-` with `_`.
#[must_use]
pub fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

/// `pt-BR`, `pt_br` and `pt-br` all name the same language.
#[must_use]
pub fn same_language(a: &str, b: &str) -> bool {
    normalize_language_code(a) == normalize_language_code(b)
}

#[must_use]
pub fn is_known_language(code: &str) -> bool {
    KNOWN_LOCALES.contains(&normalize_language_code(code))
}

/// Detects the language of a navigation file from its path.
///
/// Splits the path on separators and `.`, then searches backwards for a
/// known locale code. The segment is returned as written.
///
/// # Examples
/// - `src/i18n/pt-br/nav.ts` → `pt-br`
/// - `src/i18n/zh-CN/nav.json` → `zh-CN`
/// - `nav/fr.json` → `fr`
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> Option<String> {
    let path_str = file_path.to_string_lossy();
    path_str
        .split(['/', '\\', '.'])
        .rev()
        .find(|part| !part.is_empty() && is_known_language(part))
        .map(ToString::to_string)
}

/// `bn`, `pt-AO`, `zh_Hant`: a 2-3 letter language subtag followed by
/// optional alphanumeric subtags.
#[must_use]
pub fn looks_like_language_code(code: &str) -> bool {
    let mut subtags = code.split(['-', '_']);
    let primary_ok = subtags.next().is_some_and(|primary| {
        (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic())
    });
    primary_ok
        && subtags.all(|subtag| {
            (2..=8).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

/// Detects the language of a navigation file inside a workspace.
///
/// Only the part of the path below `workspace_root` is considered. Lookup order:
/// 1. the parent directory, if it is a known locale (`i18n/pt-br/nav.ts`)
/// 2. the file stem, if it is a known locale (`nav/fr.json`)
/// 3. the parent directory, if it is shaped like a language code (`i18n/bn/nav.ts`)
/// 4. any other known locale segment, searching backwards
#[must_use]
pub fn detect_language_in_workspace(workspace_root: &Path, file_path: &Path) -> Option<String> {
    let relative = file_path.strip_prefix(workspace_root).unwrap_or(file_path);
    let parent = relative
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty());
    let stem = relative.file_stem().and_then(|stem| stem.to_str());

    parent
        .filter(|name| is_known_language(name))
        .or_else(|| stem.filter(|stem| is_known_language(stem)))
        .or_else(|| parent.filter(|name| looks_like_language_code(name)))
        .map(ToString::to_string)
        .or_else(|| detect_language_from_path(relative))
}
