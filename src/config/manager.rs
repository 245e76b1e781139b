//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    NavSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: NavSettings,

    /// ワークスペースのルートパス
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: NavSettings::default(), workspace_root: None }
    }

    /// 設定を読み込む
    ///
    /// ワークスペースに `.nav-i18n.json` がなければデフォルト値を使う。
    /// ワークスペースルートは設定の成否に関わらず記録し、再読み込みに使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);
        self.workspace_root = workspace_root;

        let settings = if let Some(root) = &self.workspace_root {
            loader::load_from_workspace(root)?.map_or_else(NavSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            NavSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する（`workspace/didChangeConfiguration` 用）
    ///
    /// # Errors
    /// バリデーションエラー。エラー時は現在の設定を維持する。
    pub fn update_settings(&mut self, new_settings: NavSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &NavSettings {
        &self.current_settings
    }

    #[must_use]
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings(), &NavSettings::default());
        assert!(manager.workspace_root().is_none());
    }

    #[rstest]
    fn test_load_settings_without_workspace() {
        let mut manager = ConfigManager::new();

        manager.load_settings(None).unwrap();

        assert_eq!(manager.get_settings().canonical_language, "en");
        assert!(manager.workspace_root().is_none());
    }

    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"wrapperFunction": "defineNav"}"#)
            .unwrap();

        let mut manager = ConfigManager::new();
        manager.load_settings(Some(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(manager.get_settings().wrapper_function, "defineNav");
        assert_eq!(manager.workspace_root(), Some(temp_dir.path()));
    }

    #[rstest]
    fn test_load_settings_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"wrapperFunction": ""}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        // 失敗時は以前の設定のまま、ルートは保持
        assert_eq!(manager.get_settings().wrapper_function, "NavDictionary");
        assert_eq!(manager.workspace_root(), Some(temp_dir.path()));
    }

    #[rstest]
    fn test_reload_after_fixing_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "{ not json").unwrap();

        let mut manager = ConfigManager::new();
        assert!(manager.load_settings(Some(temp_dir.path().to_path_buf())).is_err());

        fs::write(&config_path, r#"{"wrapperFunction": "defineNav"}"#).unwrap();
        let workspace_root = manager.workspace_root().map(Path::to_path_buf);
        manager.load_settings(workspace_root).unwrap();

        assert_eq!(manager.get_settings().wrapper_function, "defineNav");
        assert_eq!(manager.workspace_root(), Some(temp_dir.path()));
    }

    #[rstest]
    fn test_update_settings_invalid_keeps_current() {
        let mut manager = ConfigManager::new();
        let new_settings =
            NavSettings { canonical_language: String::new(), ..NavSettings::default() };

        let result = manager.update_settings(new_settings);

        assert!(result.is_err());
        assert_eq!(manager.get_settings().canonical_language, "en");
    }
}
