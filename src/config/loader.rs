//! 設定ファイルの読み込み関数

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    FieldSettings,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".translation-field.json";

/// ワークスペースから設定を読み込む
///
/// `.translation-field.json` ファイルを探して読み込む
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー (パス付き)
/// - JSON パースエラー (パス付き)
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<FieldSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Configuration file not found: {}", config_path.display());
            return Ok(None);
        }
        Err(source) => return Err(ConfigError::IoError { path: config_path, source }),
    };

    tracing::debug!("Loading configuration from: {}", config_path.display());

    // 空ファイルは未設定として扱う
    if content.trim().is_empty() {
        tracing::debug!("Configuration file is empty, using defaults");
        return Ok(Some(FieldSettings::default()));
    }

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::ParseError { path: config_path, source })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::field::Immediateness;

    /// `load_from_workspace`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_workspace_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"locales": ["sv", "fi"], "immediate": "normal"}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert!(settings.is_some());
        let settings = settings.unwrap();
        assert_eq!(settings.locales, vec!["sv".to_string(), "fi".to_string()]);
        assert_eq!(settings.immediate, Immediateness::Normal);
    }

    /// `load_from_workspace`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_workspace_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_workspace`: JSON パースエラー
    #[rstest]
    fn test_load_from_workspace_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    /// `load_from_workspace`: エラーメッセージにファイルパスと位置が含まれる
    #[rstest]
    fn test_load_from_workspace_error_names_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{\n  \"locales\": [\"fi\",]\n}").unwrap();

        let message = load_from_workspace(temp_dir.path()).unwrap_err().to_string();

        assert!(message.contains(CONFIG_FILE_NAME));
        assert!(message.contains("line 2"));
    }

    /// `load_from_workspace`: 空ファイルはデフォルト設定
    #[rstest]
    fn test_load_from_workspace_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "  \n").unwrap();

        let result = load_from_workspace(temp_dir.path()).unwrap();

        assert_eq!(result, Some(FieldSettings::default()));
    }

    /// `load_from_workspace`: ディレクトリは読み込みエラー
    #[rstest]
    fn test_load_from_workspace_unreadable_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
