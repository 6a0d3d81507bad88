use serde::{Deserialize, Serialize};
use validator::Validate;

/// プロジェクトごとの設定（`<root>/.wspace.yaml`）
///
/// ファイルが存在しない場合、または項目が省略された場合はデフォルト値を使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// ワークスペースを配置するディレクトリ（プロジェクトルートからの相対パス）
    #[validate(length(min = 1))]
    pub spaces_dir: String,

    /// データベーススナップショットの既定パス（プロジェクトルートからの相対パス）
    #[validate(length(min = 1))]
    pub snapshot: String,

    /// 環境名を変更しないデフォルトブランチのワークスペース名（優先順）
    #[validate(length(min = 1))]
    pub default_branches: Vec<String>,

    /// `--base`省略時に使用する統合ブランチ（`null`で無効化）
    #[validate(length(min = 1))]
    pub integration_branch: Option<String>,

    /// 開発環境ファイルの配置
    #[validate(nested)]
    pub environment: EnvironmentConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            spaces_dir: "spaces".to_string(),
            snapshot: "db/db.sql.gz".to_string(),
            default_branches: vec!["main".to_string(), "master".to_string()],
            integration_branch: Some("develop".to_string()),
            environment: EnvironmentConfig::default(),
        }
    }
}

impl ToolConfig {
    /// デフォルトブランチ用のワークスペース名かどうか
    pub fn is_default_branch(&self, name: &str) -> bool {
        self.default_branches.iter().any(|b| b == name)
    }
}

/// 開発環境の宣言ファイルと依存設定ファイルの位置（ワークスペースからの相対パス）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    #[validate(length(min = 1))]
    pub declaration: String,

    #[validate(length(min = 1))]
    pub settings: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            declaration: ".ddev/config.yaml".to_string(),
            settings: "web/sites/default/settings.ddev.php".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ToolConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_default_branch("main"));
        assert!(config.is_default_branch("master"));
        assert!(!config.is_default_branch("develop"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ToolConfig = serde_yaml::from_str("spaces_dir: trees\n").unwrap();
        assert_eq!(config.spaces_dir, "trees");
        assert_eq!(config.snapshot, "db/db.sql.gz");
        assert_eq!(config.integration_branch.as_deref(), Some("develop"));
    }

    #[test]
    fn test_null_integration_branch_disables_it() {
        let config: ToolConfig = serde_yaml::from_str("integration_branch: null\n").unwrap();
        assert!(config.integration_branch.is_none());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<ToolConfig, _> = serde_yaml::from_str("spaces: trees\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_values_fail_validation() {
        let config: ToolConfig =
            serde_yaml::from_str("default_branches: []\nenvironment:\n  declaration: ''\n")
                .unwrap();
        let errors = config.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("default_branches"));
        assert!(fields.contains_key("environment"));
    }
}
