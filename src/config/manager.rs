//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    FieldSettings,
    loader,
};
use crate::error::FieldError;
use crate::field::TranslationField;
use crate::locale::Locale;
use crate::registry::LocaleOrderRegistry;

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: FieldSettings,

    /// ワークスペースのルートパス
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: FieldSettings::default(), workspace_root: None }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `workspace_root` - ワークスペースのルートパス
    ///
    /// # Returns
    /// - `Ok(())`: 設定の読み込みとバリデーション成功
    /// - `Err(ConfigError)`: エラー
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        // ワークスペースの設定を読み込み
        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(FieldSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            FieldSettings::default()
        };

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を保存
        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn update_settings(&mut self, new_settings: FieldSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        // バリデーション
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を更新
        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &FieldSettings {
        &self.current_settings
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// 設定されたロケール順を取得
    #[must_use]
    pub fn locale_order(&self) -> Vec<Locale> {
        self.current_settings.locale_order()
    }

    /// ロケール順を呼び出し元のレジストリに反映する
    ///
    /// ロケールが未設定の場合はレジストリを変更しない
    ///
    /// # Errors
    /// - tokio ランタイム上でスコープ外から呼び出した場合
    pub fn apply_locale_order(&self) -> Result<(), FieldError> {
        let order = self.locale_order();
        if order.is_empty() {
            tracing::debug!("No locales configured, keeping registry order");
            return Ok(());
        }
        LocaleOrderRegistry::set_locales(order)
    }

    /// 設定に従ってフィールドを作成
    #[must_use]
    pub fn build_field(&self) -> TranslationField {
        let mut field = TranslationField::new();
        field.set_immediateness(self.current_settings.immediate);
        field.set_read_only(self.current_settings.read_only);
        field
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::field::Immediateness;
    use crate::test_utils::locale;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert!(manager.get_settings().locales.is_empty());
        assert!(manager.workspace_root().is_none());
    }

    /// load_settings: workspace_root が None の場合
    #[rstest]
    fn test_load_settings_without_workspace() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings(None);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings(), &FieldSettings::default());
        assert!(manager.workspace_root().is_none());
    }

    /// load_settings: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"locales": ["fi", "en"], "immediate": "perEntry"}"#;
        fs::write(temp_dir.path().join(".translation-field.json"), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert_eq!(manager.locale_order(), vec![locale("fi"), locale("en")]);
        assert_eq!(manager.get_settings().immediate, Immediateness::PerEntry);
        assert!(manager.workspace_root().is_some());
    }

    /// load_settings: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert!(manager.get_settings().locales.is_empty());
    }

    /// load_settings: 無効なロケールを含む設定ファイルはエラー
    #[rstest]
    fn test_load_settings_with_invalid_locale() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".translation-field.json"), r#"{"locales": ["!!"]}"#)
            .unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert!(manager.workspace_root().is_none());
    }

    /// update_settings: 有効な設定で更新成功
    #[rstest]
    fn test_update_settings_valid() {
        let mut manager = ConfigManager::new();
        let new_settings = FieldSettings { read_only: true, ..FieldSettings::default() };

        let result = manager.update_settings(new_settings);

        assert!(result.is_ok());
        assert!(manager.get_settings().read_only);
    }

    /// update_settings: 無効な設定でエラー
    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new();
        let new_settings = FieldSettings {
            locales: vec!["en".to_string(), "EN".to_string()], // 重複は無効
            ..FieldSettings::default()
        };

        let result = manager.update_settings(new_settings);

        assert!(result.is_err());
    }

    /// apply_locale_order: レジストリのプレビューロケールが変わる
    #[rstest]
    fn test_apply_locale_order() {
        let mut manager = ConfigManager::new();
        let new_settings = FieldSettings {
            locales: vec!["sv".to_string(), "fi".to_string()],
            ..FieldSettings::default()
        };
        manager.update_settings(new_settings).unwrap();

        manager.apply_locale_order().unwrap();

        assert_eq!(LocaleOrderRegistry::preview_locale().unwrap(), locale("sv"));
        LocaleOrderRegistry::reset().unwrap();
    }

    /// apply_locale_order: ロケール未設定ならレジストリは変わらない
    #[rstest]
    fn test_apply_empty_locale_order_keeps_registry() {
        LocaleOrderRegistry::set_locales([locale("ja")]).unwrap();

        ConfigManager::new().apply_locale_order().unwrap();

        assert_eq!(LocaleOrderRegistry::preview_locale().unwrap(), locale("ja"));
        LocaleOrderRegistry::reset().unwrap();
    }

    /// build_field: 設定がフィールドに反映される
    #[rstest]
    fn test_build_field_uses_settings() {
        let mut manager = ConfigManager::new();
        let new_settings = FieldSettings {
            immediate: Immediateness::Normal,
            read_only: true,
            ..FieldSettings::default()
        };
        manager.update_settings(new_settings).unwrap();

        let field = manager.build_field();

        assert!(field.is_immediate());
        assert!(field.is_read_only());
        assert_eq!(field.projection().immediate, 1);
    }
}
