//! Workspace configuration (`.nav-i18n.json`).

/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Nav file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    MatcherError,
    NavFileMatcher,
};
pub use types::{
    ConfigError,
    NavFilesConfig,
    NavSettings,
    ServerSettings,
    ValidationError,
};
