use std::path::Path;
use validator::Validate;

use crate::common::error::WspaceError;
use crate::common::result::{ResultExt, WspaceResult};
use crate::domain::entities::ToolConfig;

/// `.wspace.yaml`の読み込み
pub struct ConfigStore;

impl ConfigStore {
    /// 設定ファイルを読み込んで検証する
    ///
    /// ファイルが存在しない場合はデフォルト設定を返す。
    pub fn load(path: &Path) -> WspaceResult<ToolConfig> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no project config, using defaults");
            return Ok(ToolConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .with_filesystem_error("failed to read config file", Some(path.to_path_buf()))?;
        let config = Self::parse(&content).map_err(|e| match e {
            WspaceError::ConfigError { message, source } => WspaceError::ConfigError {
                message: format!("{}: {}", path.display(), message),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded project config");
        Ok(config)
    }

    /// YAML文字列を解析して検証する（空文字列はデフォルト設定）
    pub fn parse(content: &str) -> WspaceResult<ToolConfig> {
        if content.trim().is_empty() {
            return Ok(ToolConfig::default());
        }
        let config: ToolConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigStore::load(&temp_dir.path().join(".wspace.yaml")).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".wspace.yaml");
        std::fs::write(
            &path,
            "spaces_dir: trees\nintegration_branch: null\nenvironment:\n  declaration: env.yaml\n",
        )
        .unwrap();

        let config = ConfigStore::load(&path).unwrap();
        assert_eq!(config.spaces_dir, "trees");
        assert_eq!(config.integration_branch, None);
        assert_eq!(config.environment.declaration, "env.yaml");
        assert_eq!(
            config.environment.settings,
            "web/sites/default/settings.ddev.php"
        );
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".wspace.yaml");

        std::fs::write(&path, "spaces: trees\n").unwrap();
        let error = ConfigStore::load(&path).unwrap_err();
        assert!(matches!(error, WspaceError::ConfigError { .. }));
        assert!(error.to_string().contains(".wspace.yaml"));

        std::fs::write(&path, "spaces_dir: \"\"\n").unwrap();
        assert!(matches!(
            ConfigStore::load(&path).unwrap_err(),
            WspaceError::ConfigError { .. }
        ));
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        assert_eq!(ConfigStore::parse("\n").unwrap(), ToolConfig::default());
    }
}
