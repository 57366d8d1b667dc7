//! サブプロセス実行 Outbound ポート
//!
//! git など外部コマンドの起動を trait で抽象化する。

use crate::error::Error;
use std::path::Path;

/// サブプロセス実行の抽象
///
/// 実装は `common::adapter::StdProcess`（std::process::Command）など。
pub trait Process: Send + Sync {
    /// プログラムを引数付きで実行し、終了コードを返す。`cwd` が Some ならそこで実行する。
    fn run(&self, program: &Path, args: &[String], cwd: Option<&Path>) -> Result<i32, Error>;
}
