//! Workspace checking: discover, load and validate every locale nav file.

pub mod types;
pub mod workspace;

pub use types::{
    CanonicalSource,
    CheckReport,
    FileOutcome,
    FileReport,
    WorkspaceError,
};
pub use workspace::WorkspaceChecker;
