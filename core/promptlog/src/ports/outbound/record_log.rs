//! 集約ログ（Record の列を 1 ファイルに貯める）Outbound ポート

use common::domain::Record;
use common::error::Error;
use std::path::Path;

/// 集約ログ
///
/// 実装は形式ごと（連結 JSON / JSON Lines / JSON 配列の全書き換え）。
pub trait RecordLog: Send + Sync {
    /// 1 件追記する。ファイルが無ければ作成する。
    fn append(&self, log_path: &Path, record: &Record) -> Result<(), Error>;

    /// 全件を順に読み出す。ファイルが無ければ空。
    fn read_all(&self, log_path: &Path) -> Result<Vec<Record>, Error>;
}
