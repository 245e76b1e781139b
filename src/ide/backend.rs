//! LSP Backend 実装

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    Diagnostic,
    DidChangeConfigurationParams,
    DidChangeTextDocumentParams,
    DidChangeWatchedFilesParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    DidSaveTextDocumentParams,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
    Url,
};
use tower_lsp::{
    Client,
    LanguageServer,
};

use super::diagnostics::{
    canonical_unavailable_diagnostic,
    file_error_diagnostic,
    generate_diagnostics,
};
use super::handlers;
use super::state::ServerState;
use crate::checker::WorkspaceChecker;
use crate::config::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
use crate::input::nav_file::parse_nav_source;

/// LSP Backend
#[derive(Clone)]
pub struct Backend {
    /// LSP クライアント
    pub client: Client,
    /// 設定管理
    pub config_manager: Arc<Mutex<ConfigManager>>,
    /// 共有状態
    pub state: ServerState,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config_manager", &"<ConfigManager>")
            .field("state", &"<ServerState>")
            .finish_non_exhaustive()
    }
}

impl Backend {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            config_manager: Arc::new(Mutex::new(ConfigManager::new())),
            state: ServerState::new(),
        }
    }

    pub(crate) fn uri_to_path(uri: &Url) -> Option<PathBuf> {
        uri.to_file_path().ok()
    }

    pub(crate) fn is_config_file(path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == CONFIG_FILE_NAME)
    }

    /// 現在の設定からチェッカーを作成
    ///
    /// ワークスペースルートが未設定の場合は `None`。
    pub(crate) async fn checker(&self) -> Option<WorkspaceChecker> {
        let (workspace_root, settings) = {
            let config_manager = self.config_manager.lock().await;
            let workspace_root = config_manager.workspace_root()?.to_path_buf();
            (workspace_root, config_manager.get_settings().clone())
        };

        match WorkspaceChecker::new(workspace_root, settings) {
            Ok(checker) => Some(checker),
            Err(error) => {
                tracing::error!(%error, "Failed to build navigation file matcher");
                None
            }
        }
    }

    /// 正規ナビファイルのキー集合を再読み込み
    pub(crate) async fn reload_canonical_keys(&self) {
        let Some(checker) = self.checker().await else {
            return;
        };

        let keys = match checker.load_canonical_keys().await {
            Ok(keys) => {
                tracing::info!(keys = keys.len(), "Canonical navigation keys loaded");
                Some(keys)
            }
            Err(error) => {
                tracing::error!(%error, "Failed to load canonical navigation keys");
                self.client
                    .log_message(
                        MessageType::ERROR,
                        format!("Failed to load canonical navigation: {error}"),
                    )
                    .await;
                None
            }
        };

        *self.state.canonical_keys.lock().await = keys;
    }

    /// ドキュメントの診断を生成
    ///
    /// ナビファイルのパターンに一致しないドキュメントやワークスペースルートが
    /// 未設定の場合は `None`。
    pub async fn document_diagnostics(&self, uri: &Url, text: &str) -> Option<Vec<Diagnostic>> {
        let path = Self::uri_to_path(uri)?;
        let checker = self.checker().await?;
        if !checker.matcher().is_nav_file(&path) {
            return None;
        }

        let source = match parse_nav_source(&path, text, &checker.settings().wrapper_function) {
            Ok(source) => source,
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "Failed to parse navigation file");
                return Some(vec![file_error_diagnostic(&error)]);
            }
        };

        let outcome = if checker.is_canonical_path(&path) {
            WorkspaceChecker::check_canonical_source(&source)
        } else {
            let canonical_keys = self.state.canonical_keys.lock().await;
            let Some(keys) = canonical_keys.as_ref() else {
                tracing::debug!(path = %path.display(), "Canonical keys unavailable");
                return Some(vec![canonical_unavailable_diagnostic(&source)]);
            };
            checker.check_source(&source, keys)
        };

        Some(generate_diagnostics(&source, &outcome))
    }

    /// ドキュメントを検証して診断を送信
    pub(crate) async fn diagnose_document(&self, uri: Url, text: &str) {
        if let Some(diagnostics) = self.document_diagnostics(&uri, text).await {
            self.client.publish_diagnostics(uri, diagnostics, None).await;
        }
    }

    /// 開いている全ドキュメントを再検証
    pub(crate) async fn diagnose_opened_documents(&self) {
        for (uri, text) in self.state.opened_documents().await {
            self.diagnose_document(uri, &text).await;
        }
    }

    /// 正規言語のナビファイルかどうか
    pub(crate) async fn is_canonical_nav_file(&self, path: &Path) -> bool {
        let Some(checker) = self.checker().await else {
            return false;
        };
        checker.is_canonical_path(path)
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::lifecycle::handle_initialize(self, params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        handlers::lifecycle::handle_initialized(self, params).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handlers::lifecycle::handle_shutdown(self).await
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::workspace::handle_did_change_configuration(self, params).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handlers::workspace::handle_did_change_watched_files(self, params).await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::document_sync::handle_did_open(self, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::document_sync::handle_did_change(self, params).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        handlers::document_sync::handle_did_save(self, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::document_sync::handle_did_close(self, params).await;
    }
}
