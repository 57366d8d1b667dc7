//! 成果物の同期（バージョン管理へのコミット・プッシュ）Outbound ポート

use common::error::Error;

/// 同期先。失敗は `Error::Sync` で返し、呼び出し側は致命扱いしない。
pub trait SyncSink: Send + Sync {
    fn commit(&self, message: &str) -> Result<(), Error>;
}
