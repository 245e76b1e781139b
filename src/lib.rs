//! nav-dictionary
//!
//! ドキュメントサイドバーのナビゲーションラベル辞書を、正規キー集合に対して検証する。
//! 組み込みの pt-BR / 英語テーブル、ワークスペースのチェッカー、LSP サーバーを提供する。

pub mod checker;
pub mod config;
pub mod ide;
pub mod input;
pub mod nav;
pub mod types;

// Backend を再エクスポート
pub use ide::backend::Backend;
pub use nav::{
    NavDictionary,
    NavDictionaryError,
};
