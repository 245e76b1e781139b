//! Document synchronization handlers.

use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    DidSaveTextDocumentParams,
};

use super::super::backend::Backend;

pub async fn handle_did_open(backend: &Backend, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;
    let text = params.text_document.text;
    tracing::debug!(%uri, "Document opened");

    backend.state.documents.lock().await.insert(uri.clone(), text.clone());

    backend.diagnose_document(uri, &text).await;
}

pub async fn handle_did_change(backend: &Backend, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;

    let Some(change) = params.content_changes.into_iter().next_back() else {
        return;
    };
    let new_content = change.text;

    backend.state.documents.lock().await.insert(uri.clone(), new_content.clone());

    backend.diagnose_document(uri, &new_content).await;
}

/// 正規ナビファイルの保存時はキー集合を読み直し、開いている全ファイルを再検証する
pub async fn handle_did_save(backend: &Backend, params: DidSaveTextDocumentParams) {
    let Some(path) = Backend::uri_to_path(&params.text_document.uri) else {
        return;
    };

    if backend.is_canonical_nav_file(&path).await {
        tracing::info!(path = %path.display(), "Canonical navigation file saved");
        backend.reload_canonical_keys().await;
        backend.diagnose_opened_documents().await;
    }
}

pub async fn handle_did_close(backend: &Backend, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;
    tracing::debug!(%uri, "Document closed");

    backend.state.documents.lock().await.remove(&uri);

    backend.client.publish_diagnostics(uri, Vec::new(), None).await;
}
