//! Workspace-wide navigation file check.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::checker::types::{
    CanonicalSource,
    CheckReport,
    FileOutcome,
    FileReport,
    WorkspaceError,
};
use crate::config::{
    NavFileMatcher,
    NavSettings,
};
use crate::input::language::detect_language_in_workspace;
use crate::input::nav_file::{
    NavFileError,
    NavSource,
    load_nav_file,
};
use crate::nav::{
    CanonicalKeys,
    NavDictionary,
    NavDictionaryError,
    registry,
};

/// A discovered nav file paired with its load result.
type LoadedFile = (PathBuf, Result<NavSource, NavFileError>);

// 正規ファイル自身の重複・空ラベルも検出する
fn validate_canonical(source: &NavSource) -> Result<NavDictionary, NavDictionaryError> {
    let own_keys: CanonicalKeys = source.keys().collect();
    NavDictionary::validate(source.candidates(), &own_keys)
}

/// Checks every locale navigation file of a workspace against the canonical one.
#[derive(Clone, Debug)]
pub struct WorkspaceChecker {
    matcher: NavFileMatcher,
    settings: NavSettings,
}

impl WorkspaceChecker {
    /// # Errors
    /// Invalid glob patterns in `settings`.
    pub fn new(workspace_root: PathBuf, settings: NavSettings) -> Result<Self, WorkspaceError> {
        let matcher = NavFileMatcher::new(workspace_root, &settings)?;
        Ok(Self { matcher, settings })
    }

    #[must_use]
    pub const fn settings(&self) -> &NavSettings {
        &self.settings
    }

    #[must_use]
    pub const fn matcher(&self) -> &NavFileMatcher {
        &self.matcher
    }

    /// Runs the check.
    ///
    /// Files are loaded concurrently. Per-file failures end up in the report;
    /// only problems with the canonical key set abort the check.
    ///
    /// # Errors
    /// - The canonical nav file cannot be read or is itself invalid
    /// - No canonical file exists and no built-in table matches `canonicalLanguage`
    pub async fn check(&self) -> Result<CheckReport, WorkspaceError> {
        let workspace_root = self.matcher.workspace_root();
        tracing::debug!(workspace_root = %workspace_root.display(), "Checking navigation files");

        let files = self.find_nav_files();
        let wrapper = self.settings.wrapper_function.as_str();
        let loaded = futures::future::join_all(files.iter().map(|path| load_nav_file(path, wrapper)))
            .await;
        let loaded: Vec<LoadedFile> = files.into_iter().zip(loaded).collect();

        let (canonical, canonical_keys, locales) = self.resolve_canonical(loaded)?;
        tracing::debug!(?canonical, keys = canonical_keys.len(), "Resolved canonical key set");

        let mut reports = Vec::with_capacity(locales.len());
        for (path, result) in locales {
            let language = self.language_of(&path);
            let outcome = match result {
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "Failed to load navigation file");
                    FileOutcome::Unreadable(error)
                }
                Ok(source) => self.check_source(&source, &canonical_keys),
            };

            reports.push(FileReport { path, language, outcome });
        }

        Ok(CheckReport { canonical, files: reports })
    }

    /// Validates one parsed nav file with the policy configured for its language.
    ///
    /// The language is taken from the path relative to the workspace root. A file
    /// whose language cannot be determined fails.
    #[must_use]
    pub fn check_source(&self, source: &NavSource, canonical_keys: &CanonicalKeys) -> FileOutcome {
        let Some(language) = self.language_of(&source.path) else {
            tracing::warn!(path = %source.path.display(), "Could not detect language");
            return FileOutcome::UnknownLanguage;
        };

        let policy = self.settings.policy_for(&language);
        match NavDictionary::validate_with(source.candidates(), canonical_keys, policy) {
            Ok(validated) => {
                tracing::debug!(
                    path = %source.path.display(),
                    language = %language,
                    missing = validated.missing.len(),
                    "Navigation file is valid"
                );
                FileOutcome::Valid { entries: validated.dictionary.len(), missing: validated.missing }
            }
            Err(error) => {
                tracing::debug!(
                    path = %source.path.display(),
                    language = %language,
                    issues = error.issues.len(),
                    "Navigation file is invalid"
                );
                FileOutcome::Invalid(error)
            }
        }
    }

    /// Validates the canonical nav file against its own keys.
    ///
    /// Only duplicates, empty labels and non-string labels can fail here.
    #[must_use]
    pub fn check_canonical_source(source: &NavSource) -> FileOutcome {
        match validate_canonical(source) {
            Ok(dictionary) => FileOutcome::Valid { entries: dictionary.len(), missing: Vec::new() },
            Err(error) => FileOutcome::Invalid(error),
        }
    }

    /// Loads the canonical key set for the workspace.
    ///
    /// # Errors
    /// Same as [`WorkspaceChecker::check`].
    pub async fn load_canonical_keys(&self) -> Result<CanonicalKeys, WorkspaceError> {
        let canonical_files: Vec<PathBuf> = self
            .find_nav_files()
            .into_iter()
            .filter(|path| self.is_canonical_path(path))
            .collect();

        let mut loaded = Vec::with_capacity(canonical_files.len());
        for path in canonical_files {
            let result = load_nav_file(&path, &self.settings.wrapper_function).await;
            loaded.push((path, result));
        }

        self.resolve_canonical(loaded).map(|(_, keys, _)| keys)
    }

    /// Language of a nav file under this workspace.
    #[must_use]
    pub fn language_of(&self, path: &Path) -> Option<String> {
        detect_language_in_workspace(self.matcher.workspace_root(), path)
    }

    /// Whether `path` is a nav file of the canonical language.
    #[must_use]
    pub fn is_canonical_path(&self, path: &Path) -> bool {
        self.matcher.is_nav_file(path)
            && self.language_of(path).is_some_and(|language| self.settings.is_canonical(&language))
    }

    /// Splits the canonical file off `loaded` and derives the key set from it.
    ///
    /// Returns the remaining locale files untouched.
    fn resolve_canonical(
        &self,
        mut loaded: Vec<LoadedFile>,
    ) -> Result<(CanonicalSource, CanonicalKeys, Vec<LoadedFile>), WorkspaceError> {
        let Some(position) = loaded.iter().position(|(path, _)| self.is_canonical_path(path)) else {
            tracing::info!(
                canonical_language = %self.settings.canonical_language,
                "No canonical navigation file in workspace, using built-in labels"
            );
            let dictionary = registry::dictionary(&self.settings.canonical_language)?;
            let keys = CanonicalKeys::from_dictionary(dictionary);
            return Ok((CanonicalSource::Builtin, keys, loaded));
        };

        let (path, result) = loaded.remove(position);
        let source = result.map_err(WorkspaceError::CanonicalUnreadable)?;

        let dictionary = match validate_canonical(&source) {
            Ok(dictionary) => dictionary,
            Err(error) => return Err(WorkspaceError::CanonicalInvalid { path, source: error }),
        };

        let keys = CanonicalKeys::from_dictionary(&dictionary);
        Ok((CanonicalSource::Workspace(path), keys, loaded))
    }

    /// Finds nav files under the workspace root, sorted by path.
    ///
    /// Honors `.gitignore` in addition to `excludePatterns`.
    #[must_use]
    pub fn find_nav_files(&self) -> Vec<PathBuf> {
        let workspace_root = self.matcher.workspace_root();
        let mut found_files = Vec::new();

        for result in WalkBuilder::new(workspace_root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(workspace_root) else {
                continue;
            };
            if self.matcher.is_nav_file_relative(relative_path) {
                found_files.push(path.to_path_buf());
            }
        }

        found_files.sort();
        tracing::debug!(count = found_files.len(), "Found navigation files");
        found_files
    }
}
