//! ファイルシステム Outbound ポート
//!
//! 成果物・集約ログ・設定ファイルの読み書きはこの trait を通す。
//! 連番カウンタのロックだけは fs2 で実ファイルを直接扱う。

use crate::error::Error;
use std::io::Write;
use std::path::Path;

pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    /// 内容を丸ごと書く（既存ファイルは上書き）
    fn write(&self, path: &Path, contents: &str) -> Result<(), Error>;
    /// 一時ファイルを本来の名前へ置き換える
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error>;
    /// 親を含めて作る。Unix では 0755
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    fn exists(&self, path: &Path) -> bool;
    /// ディレクトリ直下のエントリ数（ファイル・サブディレクトリを区別しない）
    fn count_entries(&self, dir: &Path) -> Result<usize, Error>;
    /// 追記用に開く。無ければ作る。
    fn open_append(&self, path: &Path) -> Result<Box<dyn Write + Send>, Error>;
}
