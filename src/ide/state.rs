//! LSP サーバーの共有状態

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::Url;

use crate::nav::CanonicalKeys;

/// LSP サーバーの共有状態
///
/// # ロック順序
///
/// `Backend::config_manager` と同時に取得する場合は `config_manager` を先に取得すること。
#[derive(Clone, Default)]
pub struct ServerState {
    /// 正規ナビファイルのキー集合（未ロードまたはロード失敗時は `None`）
    pub canonical_keys: Arc<Mutex<Option<CanonicalKeys>>>,
    /// 開いているドキュメントの最新テキスト
    pub documents: Arc<Mutex<HashMap<Url, String>>>,
}

impl ServerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 開いているドキュメントのスナップショットを取得
    pub async fn opened_documents(&self) -> Vec<(Url, String)> {
        let documents = self.documents.lock().await;
        documents.iter().map(|(uri, text)| (uri.clone(), text.clone())).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_opened_documents_snapshot() {
        let state = ServerState::new();
        let uri = Url::parse("file:///docs/src/i18n/pt-br/nav.ts").unwrap();
        state.documents.lock().await.insert(uri.clone(), "text".to_string());

        let snapshot = state.opened_documents().await;
        state.documents.lock().await.clear();

        assert_eq!(snapshot, vec![(uri, "text".to_string())]);
        assert!(state.canonical_keys.lock().await.is_none());
    }
}
