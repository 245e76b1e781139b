//! LSP lifecycle handlers: `initialize`, `initialized`, `shutdown`.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeWatchedFilesRegistrationOptions,
    FileSystemWatcher,
    GlobPattern,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
    Registration,
    ServerCapabilities,
    ServerInfo,
    TextDocumentSyncCapability,
    TextDocumentSyncKind,
    TextDocumentSyncOptions,
    TextDocumentSyncSaveOptions,
};

use super::super::backend::Backend;
use crate::config::{
    CONFIG_FILE_NAME,
    NavSettings,
};

const WATCHED_FILES_METHOD: &str = "workspace/didChangeWatchedFiles";
const WATCHED_FILES_REGISTRATION_ID: &str = "nav-i18n-watched-files";

pub async fn handle_initialize(
    backend: &Backend,
    params: InitializeParams,
) -> Result<InitializeResult> {
    let workspace_root = params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .and_then(|folder| folder.uri.to_file_path().ok());

    let mut config_manager = backend.config_manager.lock().await;
    if let Err(error) = config_manager.load_settings(workspace_root) {
        backend
            .client
            .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
            .await;
        tracing::error!("Configuration error during initialize: {}", error);
    }
    drop(config_manager);

    Ok(InitializeResult {
        server_info: Some(ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                    ..TextDocumentSyncOptions::default()
                },
            )),
            ..ServerCapabilities::default()
        },
    })
}

pub async fn handle_initialized(backend: &Backend, _: InitializedParams) {
    backend.client.log_message(MessageType::INFO, "initialized!").await;

    let registration = {
        let config_manager = backend.config_manager.lock().await;
        file_watcher_registration(config_manager.get_settings())
    };
    if let Err(error) = backend.client.register_capability(vec![registration]).await {
        tracing::warn!(%error, "Failed to register file watchers");
    }

    backend.reload_canonical_keys().await;
}

/// 設定ファイルとナビファイルの監視を登録する
pub(crate) fn file_watcher_registration(settings: &NavSettings) -> Registration {
    let watcher = |pattern: String| FileSystemWatcher {
        glob_pattern: GlobPattern::String(pattern),
        kind: None,
    };

    let file_pattern = &settings.nav_files.file_pattern;
    let nav_pattern = if file_pattern.starts_with("**/") {
        file_pattern.clone()
    } else {
        format!("**/{file_pattern}")
    };

    let options = DidChangeWatchedFilesRegistrationOptions {
        watchers: vec![watcher(format!("**/{CONFIG_FILE_NAME}")), watcher(nav_pattern)],
    };

    Registration {
        id: WATCHED_FILES_REGISTRATION_ID.to_string(),
        method: WATCHED_FILES_METHOD.to_string(),
        register_options: serde_json::to_value(options).ok(),
    }
}

#[allow(clippy::unused_async)]
pub async fn handle_shutdown(_backend: &Backend) -> Result<()> {
    tracing::info!("Shutting down");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::config::NavFilesConfig;

    fn watched_globs(registration: &Registration) -> Vec<String> {
        let options: DidChangeWatchedFilesRegistrationOptions =
            serde_json::from_value(registration.register_options.clone().unwrap()).unwrap();
        options
            .watchers
            .into_iter()
            .map(|watcher| match watcher.glob_pattern {
                GlobPattern::String(pattern) => pattern,
                GlobPattern::Relative(relative) => relative.pattern,
            })
            .collect()
    }

    #[rstest]
    #[case::default("**/i18n/*/nav.{ts,js,json}", "**/i18n/*/nav.{ts,js,json}")]
    #[case::relative("src/i18n/*/nav.ts", "**/src/i18n/*/nav.ts")]
    fn test_file_watcher_registration(#[case] file_pattern: &str, #[case] expected: &str) {
        let settings = NavSettings {
            nav_files: NavFilesConfig { file_pattern: file_pattern.to_string() },
            ..NavSettings::default()
        };

        let registration = file_watcher_registration(&settings);

        assert_eq!(registration.method, "workspace/didChangeWatchedFiles");
        assert_that!(
            watched_globs(&registration),
            elements_are![eq("**/.nav-i18n.json"), eq(expected)]
        );
    }
}
