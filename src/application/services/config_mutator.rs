use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};

use crate::common::error::WspaceError;
use crate::common::result::{OptionExt, ResultExt, WspaceResult};
use crate::domain::entities::EnvironmentConfig;
use crate::domain::value_objects::workspace_name::{compose_environment_name, Identifier};

/// Key prefix of the environment name line in the declaration file
pub const NAME_PREFIX: &str = "name: ";

/// First `/* ... */` block with the whitespace after it
const COMMENT_BLOCK_PATTERN: &str = r"(?s)/\*.*?\*/\s*";

/// `$host = "..."` with any spacing and either quote style
const HOST_ASSIGNMENT_PATTERN: &str = r#"\$host\s*=\s*["'].*?["']"#;

/// Database host of a DDEV project
pub fn database_host(environment_name: &str) -> String {
    format!("ddev-{}-db", environment_name)
}

/// 開発環境の設定ファイルを書き換える
///
/// 期待したパターンが見つからない場合は推測で書き換えず、ファイルを
/// 変更しないままエラーを返す。
#[derive(Debug, Clone)]
pub struct ConfigMutator {
    declaration: String,
    settings: String,
}

impl ConfigMutator {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            declaration: config.declaration.clone(),
            settings: config.settings.clone(),
        }
    }

    /// 環境宣言ファイルのパス
    pub fn declaration_path(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.declaration)
    }

    /// 依存設定ファイルのパス
    pub fn settings_path(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.settings)
    }

    /// 依存設定ファイルのファイル名（サマリー表示用）
    pub fn settings_file_name(&self) -> String {
        Path::new(&self.settings)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.settings.clone())
    }

    pub fn has_declaration(&self, workspace: &Path) -> bool {
        self.declaration_path(workspace).is_file()
    }

    /// 環境宣言ファイルから環境名を読み取る
    pub fn read_environment_name(&self, workspace: &Path) -> WspaceResult<String> {
        let path = self.declaration_path(workspace);
        if !path.is_file() {
            return Err(WspaceError::not_found_error(
                format!("no environment declaration at {}", path.display()),
                Some(path),
            ));
        }

        let content = std::fs::read_to_string(&path)
            .with_filesystem_error("failed to read environment declaration", Some(path.clone()))?;
        content
            .lines()
            .find_map(declared_name)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_not_found(format!("no project name in {}", path.display()), Some(path.clone()))
    }

    /// `name: <original>`の行を`name: <identifier>-<original>`に置き換える
    ///
    /// 置き換え後の環境名を返す。値が`original`と一致する行が見つからない
    /// 場合は二重のリネームを避けるためエラーとする。値の前後の空白は
    /// `read_environment_name`と同じく無視する。
    pub fn rename(
        &self,
        workspace: &Path,
        identifier: &Identifier,
        original: &str,
    ) -> WspaceResult<String> {
        let path = self.declaration_path(workspace);
        let content = std::fs::read_to_string(&path)
            .with_filesystem_error("failed to read environment declaration", Some(path.clone()))?;

        let renamed = compose_environment_name(identifier, original);
        let expected = format!("{}{}", NAME_PREFIX, original);
        let replacement = format!("{}{}", NAME_PREFIX, renamed);
        let updated = replace_name_line(&content, original, &replacement).ok_or_else(|| {
            WspaceError::mutation_error(
                format!("could not find '{}' in {}", expected, path.display()),
                &path,
            )
        })?;

        std::fs::write(&path, updated)
            .with_filesystem_error("failed to write environment declaration", Some(path.clone()))?;
        tracing::debug!(path = %path.display(), from = original, to = %renamed, "renamed environment");
        Ok(renamed)
    }

    /// 依存設定ファイルのDBホストを新しい環境名に合わせる
    ///
    /// ファイルが存在しない場合は何もせず`Ok(false)`を返す。
    pub fn rewrite_dependent_settings(
        &self,
        workspace: &Path,
        environment_name: &str,
    ) -> WspaceResult<bool> {
        let path = self.settings_path(workspace);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no dependent settings file");
            return Ok(false);
        }

        let content = std::fs::read_to_string(&path)
            .with_filesystem_error("failed to read settings file", Some(path.clone()))?;
        let updated = rewrite_host_assignment(&content, environment_name)?.ok_or_else(|| {
            WspaceError::mutation_error(
                format!("could not find $host assignment in {}", path.display()),
                &path,
            )
        })?;

        std::fs::write(&path, updated)
            .with_filesystem_error("failed to write settings file", Some(path.clone()))?;
        Ok(true)
    }
}

/// Value of a top-level `name: ` line, without surrounding whitespace
fn declared_name(line: &str) -> Option<&str> {
    line.strip_prefix(NAME_PREFIX).map(str::trim)
}

/// Replace the first line declaring `original`, keeping its line ending
fn replace_name_line(content: &str, original: &str, replacement: &str) -> Option<String> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches('\n').trim_end_matches('\r');
        if declared_name(body) == Some(original) {
            let mut updated = String::with_capacity(content.len() + replacement.len());
            updated.push_str(&content[..offset]);
            updated.push_str(replacement);
            updated.push_str(&line[body.len()..]);
            updated.push_str(&content[offset + line.len()..]);
            return Some(updated);
        }
        offset += line.len();
    }
    None
}

/// Drop the first comment block and point every host assignment at the
/// environment's database. `None` when there is no assignment.
fn rewrite_host_assignment(content: &str, environment_name: &str) -> WspaceResult<Option<String>> {
    let comment = Regex::new(COMMENT_BLOCK_PATTERN)?;
    let host = Regex::new(HOST_ASSIGNMENT_PATTERN)?;

    let stripped = comment.replacen(content, 1, "");
    if !host.is_match(&stripped) {
        return Ok(None);
    }

    let assignment = format!("$host = \"{}\"", database_host(environment_name));
    Ok(Some(
        host.replace_all(&stripped, NoExpand(&assignment)).into_owned(),
    ))
}
