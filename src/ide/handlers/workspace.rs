//! Workspace-related handlers.

use std::path::Path;

use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    DidChangeWatchedFilesParams,
    MessageType,
};

use super::super::backend::Backend;
use crate::config::{
    NavSettings,
    ServerSettings,
};

pub async fn handle_did_change_configuration(
    backend: &Backend,
    params: DidChangeConfigurationParams,
) {
    tracing::info!(settings = %params.settings, "didChangeConfiguration received");

    let new_settings = serde_json::from_value::<ServerSettings>(params.settings.clone())
        .map(|wrapped| wrapped.nav_i18n)
        .or_else(|_| serde_json::from_value::<NavSettings>(params.settings));

    let new_settings = match new_settings {
        Ok(new_settings) => new_settings,
        Err(error) => {
            tracing::warn!(%error, "Ignoring unrecognized configuration");
            return;
        }
    };

    let mut config_manager = backend.config_manager.lock().await;
    match config_manager.update_settings(new_settings) {
        Ok(()) => {
            drop(config_manager);
            tracing::info!("configuration updated successfully");

            backend.reload_canonical_keys().await;
            backend.diagnose_opened_documents().await;
        }
        Err(error) => {
            drop(config_manager);
            tracing::error!(%error, "configuration validation error");
            backend
                .client
                .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
                .await;
        }
    }
}

/// 設定ファイルか正規ナビファイルが変わったら読み直して再検証する
pub async fn handle_did_change_watched_files(
    backend: &Backend,
    params: DidChangeWatchedFilesParams,
) {
    let mut config_changed = false;
    let mut canonical_changed = false;

    for change in params.changes {
        let Some(file_path) = Backend::uri_to_path(&change.uri) else {
            continue;
        };
        tracing::debug!("Watched file changed: {:?}, type: {:?}", file_path, change.typ);

        if Backend::is_config_file(&file_path) {
            config_changed = true;
        } else if backend.is_canonical_nav_file(&file_path).await {
            canonical_changed = true;
        }
    }

    if config_changed {
        reload_config(backend).await;
    }

    if config_changed || canonical_changed {
        backend.reload_canonical_keys().await;
        backend.diagnose_opened_documents().await;
    }
}

async fn reload_config(backend: &Backend) {
    let mut config_manager = backend.config_manager.lock().await;
    let workspace_root = config_manager.workspace_root().map(Path::to_path_buf);

    if let Err(error) = config_manager.load_settings(workspace_root) {
        drop(config_manager);
        tracing::error!(%error, "Failed to reload configuration");
        backend
            .client
            .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
            .await;
    }
}
