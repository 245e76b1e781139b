//! File pattern matcher for navigation files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::NavSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid nav file pattern '{pattern}': {source}")]
    InvalidNavPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches workspace paths against `navFiles.filePattern` and `excludePatterns`.
#[derive(Debug, Clone)]
pub struct NavFileMatcher {
    workspace_root: PathBuf,
    nav_set: GlobSet,
    exclude_set: GlobSet,
}

impl NavFileMatcher {
    pub fn new(workspace_root: PathBuf, settings: &NavSettings) -> Result<Self, MatcherError> {
        let nav_set = Self::build_glob_set(
            std::slice::from_ref(&settings.nav_files.file_pattern),
            |pattern, source| MatcherError::InvalidNavPattern { pattern, source },
        )?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { workspace_root, nav_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn is_nav_file(&self, absolute_path: &Path) -> bool {
        absolute_path
            .strip_prefix(&self.workspace_root)
            .is_ok_and(|relative_path| self.is_nav_file_relative(relative_path))
    }

    /// The path must be relative to the workspace root.
    #[must_use]
    pub fn is_nav_file_relative(&self, relative_path: &Path) -> bool {
        self.nav_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}
