//! Validated navigation label dictionaries.

use std::collections::{
    HashMap,
    HashSet,
};

use serde::ser::{
    Serialize,
    SerializeMap,
    Serializer,
};

use super::error::{
    NavDictionaryError,
    NavIssue,
};

/// A candidate entry as written by a translator, before validation.
///
/// `label` is `None` when the source value is not a string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub key: String,
    pub label: Option<String>,
}

impl From<(&str, &str)> for CandidateEntry {
    fn from((key, label): (&str, &str)) -> Self {
        Self { key: key.to_string(), label: Some(label.to_string()) }
    }
}

impl From<&(&str, &str)> for CandidateEntry {
    fn from(pair: &(&str, &str)) -> Self {
        Self::from(*pair)
    }
}

impl From<(String, String)> for CandidateEntry {
    fn from((key, label): (String, String)) -> Self {
        Self { key, label: Some(label) }
    }
}

/// A validated navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub key: String,
    pub label: String,
}

/// The reference key set every locale must match.
///
/// Keys keep their declaration order so missing keys are reported in menu order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalKeys {
    keys: Vec<String>,
    set: HashSet<String>,
}

impl CanonicalKeys {
    /// Builds the key set from an already validated dictionary.
    #[must_use]
    pub fn from_dictionary(dictionary: &NavDictionary) -> Self {
        dictionary.keys().collect()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.set.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Into<String>> FromIterator<K> for CanonicalKeys {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut canonical = Self::default();
        for key in iter {
            let key = key.into();
            if canonical.set.insert(key.clone()) {
                canonical.keys.push(key);
            }
        }
        canonical
    }
}

/// How strictly a locale is held to the canonical key set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Tolerate canonical keys the locale has not translated yet.
    ///
    /// Extra keys, duplicates and empty labels are rejected regardless.
    pub allow_missing: bool,
}

impl ValidationPolicy {
    pub const STRICT: Self = Self { allow_missing: false };
    pub const PARTIAL: Self = Self { allow_missing: true };
}

/// Successful validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub dictionary: NavDictionary,
    /// Canonical keys absent from the locale. Always empty under the strict policy.
    pub missing: Vec<String>,
}

/// Read-only mapping from navigation key to display label.
///
/// Only obtainable through [`NavDictionary::validate`], so every instance
/// holds unique keys and non-empty labels in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavDictionary {
    entries: Vec<NavEntry>,
    index: HashMap<String, usize>,
}

impl NavDictionary {
    /// Validates `entries` against `canonical` with the strict policy.
    ///
    /// # Examples
    /// ```
    /// use nav_dictionary::nav::{CanonicalKeys, NavDictionary};
    ///
    /// let canonical: CanonicalKeys = ["startHere", "basics"].into_iter().collect();
    /// let dictionary =
    ///     NavDictionary::validate([("startHere", "Comece Aqui"), ("basics", "Fundamentos")], &canonical)
    ///         .unwrap();
    ///
    /// assert_eq!(dictionary.get("basics"), Some("Fundamentos"));
    /// ```
    ///
    /// # Errors
    /// Returns every duplicate, empty, non-string, missing and extra key at once.
    pub fn validate<I, E>(entries: I, canonical: &CanonicalKeys) -> Result<Self, NavDictionaryError>
    where
        I: IntoIterator<Item = E>,
        E: Into<CandidateEntry>,
    {
        Self::validate_with(entries, canonical, ValidationPolicy::STRICT)
            .map(|validated| validated.dictionary)
    }

    /// Validates `entries` against `canonical` under `policy`.
    ///
    /// Issues are reported in a fixed order: duplicates (by first occurrence),
    /// empty labels, non-string labels, missing keys (canonical order),
    /// extra keys (declaration order).
    ///
    /// # Errors
    /// Returns a [`NavDictionaryError`] listing every offending key.
    pub fn validate_with<I, E>(
        entries: I,
        canonical: &CanonicalKeys,
        policy: ValidationPolicy,
    ) -> Result<Validated, NavDictionaryError>
    where
        I: IntoIterator<Item = E>,
        E: Into<CandidateEntry>,
    {
        let candidates: Vec<CandidateEntry> = entries.into_iter().map(Into::into).collect();

        // キーごとの出現位置（初出順）
        let mut occurrences: Vec<(&str, Vec<usize>)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (index, candidate) in candidates.iter().enumerate() {
            let key = candidate.key.as_str();
            if let Some(&slot) = positions.get(key) {
                if let Some((_, indices)) = occurrences.get_mut(slot) {
                    indices.push(index);
                }
            } else {
                positions.insert(key, occurrences.len());
                occurrences.push((key, vec![index]));
            }
        }

        let mut issues = Vec::new();

        for (key, indices) in &occurrences {
            if indices.len() > 1 {
                issues.push(NavIssue::DuplicateKey {
                    key: (*key).to_string(),
                    indices: indices.clone(),
                });
            }
        }

        for (index, candidate) in candidates.iter().enumerate() {
            if let Some(label) = &candidate.label
                && label.trim().is_empty()
            {
                issues.push(NavIssue::EmptyLabel { key: candidate.key.clone(), index });
            }
        }

        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.label.is_none() {
                issues.push(NavIssue::NonStringLabel { key: candidate.key.clone(), index });
            }
        }

        let missing: Vec<String> = canonical
            .iter()
            .filter(|key| !positions.contains_key(key))
            .map(ToString::to_string)
            .collect();
        if !policy.allow_missing {
            issues.extend(missing.iter().map(|key| NavIssue::MissingKey { key: key.clone() }));
        }

        for (key, indices) in &occurrences {
            if !canonical.contains(key)
                && let Some(&index) = indices.first()
            {
                issues.push(NavIssue::ExtraKey { key: (*key).to_string(), index });
            }
        }

        if !issues.is_empty() {
            return Err(NavDictionaryError::new(issues));
        }

        let mut index = HashMap::with_capacity(candidates.len());
        let mut validated = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let Some(label) = candidate.label else {
                continue;
            };
            index.insert(candidate.key.clone(), validated.len());
            validated.push(NavEntry { key: candidate.key, label });
        }

        let missing = if policy.allow_missing { missing } else { Vec::new() };
        Ok(Validated { dictionary: Self { entries: validated, index }, missing })
    }

    /// Returns the label for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .and_then(|&position| self.entries.get(position))
            .map(|entry| entry.label.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &NavEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the dictionary as a pretty JSON object in declaration order.
    ///
    /// # Errors
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a NavDictionary {
    type Item = &'a NavEntry;
    type IntoIter = std::slice::Iter<'a, NavEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for NavDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.label)?;
        }
        map.end()
    }
}
