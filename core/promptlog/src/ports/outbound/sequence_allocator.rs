//! カテゴリ内連番の割り当て Outbound ポート

use common::domain::SequenceNumber;
use common::error::Error;
use std::path::Path;

/// カテゴリディレクトリごとの連番生成器
///
/// 実装:
/// - `DirectoryScanAllocator`: エントリ数 + 1。ロックを取らないため、並行実行や
///   ファイル削除の後は同じ番号を返しうる（既存の成果物が上書きされる）。
/// - `LockedCounterAllocator`: カウンタファイルを排他ロックして進める。
pub trait SequenceAllocator: Send + Sync {
    /// `category_dir`（作成済み）で次に使う番号を返す。
    /// `prefix` / `extension` は既存ファイルとの衝突確認に使う。
    fn next(
        &self,
        category_dir: &Path,
        prefix: &str,
        extension: &str,
    ) -> Result<SequenceNumber, Error>;
}
