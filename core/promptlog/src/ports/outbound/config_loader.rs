//! 設定ファイル読み込みの Outbound ポート

use crate::domain::FileConfig;
use common::error::Error;

/// 設定ファイルの読み込み。ファイルが無ければ既定値（全項目 None）。
pub trait ConfigLoader: Send + Sync {
    fn load(&self) -> Result<FileConfig, Error>;
}
