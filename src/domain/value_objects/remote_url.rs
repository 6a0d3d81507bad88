use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

use crate::common::error::WspaceError;

/// リモートURL関連のエラー
#[derive(Debug, Error, PartialEq)]
pub enum RemoteUrlError {
    #[error("Empty remote URL")]
    Empty,

    #[error("Could not determine project name from URL: {0}")]
    NoProjectName(String),

    #[error("Invalid project name: {0}")]
    InvalidProjectName(String),
}

/// `init`に渡されるリモートURLの値オブジェクト
///
/// `https://host/org/repo.git`のようなスキーム付きURLのほか、
/// `git@host:org/repo.git`形式やローカルパスも受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteUrl {
    /// 入力されたURL文字列（前後の空白のみ除去）
    url: String,
}

impl RemoteUrl {
    /// 新しいRemoteUrlインスタンスを作成
    pub fn new(url: &str) -> Result<Self, RemoteUrlError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(RemoteUrlError::Empty);
        }
        Ok(Self {
            url: trimmed.to_string(),
        })
    }

    /// 元のURL文字列を取得
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// URLの最後のパス要素から`.git`を除いたプロジェクト名を取得
    pub fn project_name(&self) -> Result<String, RemoteUrlError> {
        let path = match Url::parse(&self.url) {
            // スキーム付きURL（https、ssh、file等）はパス部分のみを見る
            Ok(parsed) if parsed.has_host() || parsed.scheme() == "file" => {
                parsed.path().to_string()
            }
            // scp形式（git@host:path）やローカルパス
            _ => self.url.clone(),
        };

        let trimmed = path.trim_end_matches('/');
        let last = trimmed
            .rsplit(|c: char| c == '/' || c == ':')
            .next()
            .unwrap_or_default();
        let name = last.strip_suffix(".git").unwrap_or(last);

        if name.is_empty() || name == "." || name == ".." {
            return Err(RemoteUrlError::NoProjectName(self.url.clone()));
        }
        Ok(name.to_string())
    }
}

/// 明示的に指定されたプロジェクト名を検証する
///
/// 単一のパス要素でなければならない（区切り文字や`..`は不可）。
pub fn validate_project_name(name: &str) -> Result<&str, RemoteUrlError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(RemoteUrlError::InvalidProjectName(name.to_string()));
    }
    Ok(name)
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl TryFrom<&str> for RemoteUrl {
    type Error = RemoteUrlError;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        RemoteUrl::new(url)
    }
}

impl From<RemoteUrlError> for WspaceError {
    fn from(error: RemoteUrlError) -> Self {
        WspaceError::precondition_error(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(url: &str) -> String {
        RemoteUrl::new(url).unwrap().project_name().unwrap()
    }

    #[test]
    fn test_scp_style_url() {
        assert_eq!(name_of("git@github.com:user/project.git"), "project");
    }

    #[test]
    fn test_scp_style_without_directory() {
        assert_eq!(name_of("git@example.com:project.git"), "project");
    }

    #[test]
    fn test_https_url_with_trailing_slash() {
        assert_eq!(name_of("https://github.com/user/project/"), "project");
        assert_eq!(name_of("https://github.com/user/project.git"), "project");
    }

    #[test]
    fn test_ssh_scheme_and_local_path() {
        assert_eq!(name_of("ssh://git@host:2222/team/site.git"), "site");
        assert_eq!(name_of("/srv/git/site.git"), "site");
        assert_eq!(name_of("file:///srv/git/site"), "site");
    }

    #[test]
    fn test_empty_and_nameless_urls() {
        assert_eq!(RemoteUrl::new("  "), Err(RemoteUrlError::Empty));
        let url = RemoteUrl::new("https://github.com/").unwrap();
        assert!(matches!(
            url.project_name(),
            Err(RemoteUrlError::NoProjectName(_))
        ));
        let url = RemoteUrl::new(".git").unwrap();
        assert!(url.project_name().is_err());
    }

    #[test]
    fn test_validate_project_name() {
        assert_eq!(validate_project_name("myproject"), Ok("myproject"));
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("..").is_err());
        assert!(validate_project_name("a/b").is_err());
    }
}
