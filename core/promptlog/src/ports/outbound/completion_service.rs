//! 単発補完の Outbound ポート
//!
//! プロンプト 1 件を送り、最初の choice のテキストを受け取る。

use common::error::Error;

/// 補完サービス
///
/// 失敗時は `Error::HttpStatus`（ステータスと本文）、`Error::Http`（通信失敗）、
/// `Error::Extraction`（choices[0].text が無い）などを返す。
pub trait CompletionService: Send + Sync {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, Error>;
}
