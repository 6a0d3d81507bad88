use crate::common::error::WspaceError;
use std::path::PathBuf;

/// wspace全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use wspace::common::result::WspaceResult;
/// use wspace::common::error::WspaceError;
///
/// fn example_function() -> WspaceResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> WspaceResult<()> {
///     Err(WspaceError::precondition_error("name cannot be empty"))
/// }
/// ```
pub type WspaceResult<T> = Result<T, WspaceError>;

/// OptionをWspaceResultに変換するためのヘルパー
pub trait OptionExt<T> {
    /// NoneをNotFoundErrorに変換する
    ///
    /// # Examples
    ///
    /// ```
    /// use wspace::common::result::{WspaceResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: WspaceResult<String> = none_value.ok_or_not_found("entry not found", None);
    /// assert!(result.is_err());
    /// ```
    fn ok_or_not_found(self, message: impl Into<String>, path: Option<PathBuf>) -> WspaceResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>, path: Option<PathBuf>) -> WspaceResult<T> {
        self.ok_or_else(|| WspaceError::not_found_error(message, path))
    }
}

/// 標準のResult型をWspaceResultに変換するためのヘルパー
pub trait ResultExt<T> {
    /// ファイルシステムエラーとしてWspaceResultに変換
    ///
    /// # Examples
    ///
    /// ```
    /// use wspace::common::result::{WspaceResult, ResultExt};
    /// use std::path::PathBuf;
    ///
    /// let result: Result<String, std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::NotFound, "file not found"
    /// ));
    /// let wspace_result: WspaceResult<String> =
    ///     result.with_filesystem_error("could not read", Some(PathBuf::from("/x")));
    /// assert!(wspace_result.is_err());
    /// ```
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> WspaceResult<T>;
}

impl<T> ResultExt<T> for Result<T, std::io::Error> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> WspaceResult<T> {
        self.map_err(|e| WspaceError::filesystem_error_with_source(message, path, e))
    }
}
