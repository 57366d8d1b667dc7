//! 環境変数解決 Outbound ポート
//!
//! API キー・ホームディレクトリ・カレントディレクトリを環境から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;
use std::path::PathBuf;

/// 構造化ログのファイル名（<home>/state/logs 配下）
pub const LOG_FILE_NAME: &str = "promptlog.jsonl";

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を読む。未設定・空文字は None。
    fn var(&self, name: &str) -> Option<String>;

    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. PROMPTLOG_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/promptlog
    /// 3. $HOME/.config/promptlog
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// カレントディレクトリ（出力先の既定値）
    fn current_dir(&self) -> Result<PathBuf, Error>;

    /// 構造化ログファイルのパス
    fn resolve_log_file_path(&self) -> Result<PathBuf, Error> {
        Ok(self.resolve_home_dir()?.logs_dir().join(LOG_FILE_NAME))
    }
}
