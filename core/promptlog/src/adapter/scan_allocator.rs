//! ディレクトリ走査による連番割り当て
//!
//! 次の番号 = カテゴリディレクトリのエントリ数 + 1。ロックを取らないため、
//! 同じディレクトリに対して並行に実行されたプロセス同士や、途中のファイルが
//! 削除された後には同じ番号が返り、既存の成果物を上書きする。

use common::domain::SequenceNumber;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::Path;
use std::sync::Arc;

use crate::ports::outbound::SequenceAllocator;

pub struct DirectoryScanAllocator {
    fs: Arc<dyn FileSystem>,
}

impl DirectoryScanAllocator {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl SequenceAllocator for DirectoryScanAllocator {
    fn next(
        &self,
        category_dir: &Path,
        _prefix: &str,
        _extension: &str,
    ) -> Result<SequenceNumber, Error> {
        let count = self.fs.count_entries(category_dir)?;
        Ok(SequenceNumber::after_count(count))
    }
}
