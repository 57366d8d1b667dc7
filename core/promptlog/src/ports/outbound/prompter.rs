//! 端末入力の Outbound ポート

use common::error::Error;

/// 端末からの 1 行入力と yes/no 確認
pub trait Prompter: Send + Sync {
    /// `question` を表示して 1 行読む（末尾の改行は除く）
    fn read_line(&self, question: &str) -> Result<String, Error>;

    /// `question` を表示して yes / y なら true
    fn confirm(&self, question: &str) -> Result<bool, Error>;
}
