//! Checker type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;
use crate::input::nav_file::NavFileError;
use crate::nav::{
    NavDictionaryError,
    NavError,
};

/// Where the canonical key set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalSource {
    /// The canonical locale's nav file in the workspace.
    Workspace(PathBuf),
    /// The English table shipped with the crate.
    Builtin,
}

#[derive(Debug)]
pub enum FileOutcome {
    Valid {
        entries: usize,
        /// Keys tolerated as missing under a partial policy.
        missing: Vec<String>,
    },
    Invalid(NavDictionaryError),
    Unreadable(NavFileError),
    /// The language could not be detected from the path.
    UnknownLanguage,
}

impl FileOutcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Invalid(_) | Self::Unreadable(_) | Self::UnknownLanguage)
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Option<String>,
    pub outcome: FileOutcome,
}

#[derive(Debug)]
pub struct CheckReport {
    pub canonical: CanonicalSource,
    /// One report per locale file, sorted by path. The canonical file is not listed.
    pub files: Vec<FileReport>,
}

impl CheckReport {
    /// True when no locale file failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.files.iter().any(|file| file.outcome.is_failure())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|file| file.outcome.is_failure())
    }
}

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error(transparent)]
    Pattern(#[from] MatcherError),

    #[error("Failed to read canonical navigation file: {0}")]
    CanonicalUnreadable(#[source] NavFileError),

    #[error("Canonical navigation file {path:?} is invalid: {source}")]
    CanonicalInvalid {
        path: PathBuf,
        #[source]
        source: NavDictionaryError,
    },

    #[error(transparent)]
    Builtin(#[from] NavError),
}
