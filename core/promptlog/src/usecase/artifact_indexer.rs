//! 成果物の連番ファイル名割り当てと書き出し
//!
//! カテゴリディレクトリを（無ければ）作り、SequenceAllocator から番号を得て
//! `<category_dir>/<prefix><N>.<extension>` を返す。番号の一意性は注入した
//! アロケータの方式に従う（走査方式ではプロセス間で重複しうる）。

use common::domain::{artifact_file_name, Artifact, Category, OutDir, SequenceNumber};
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ports::outbound::SequenceAllocator;

pub struct ArtifactIndexer {
    fs: Arc<dyn FileSystem>,
    allocator: Arc<dyn SequenceAllocator>,
}

impl ArtifactIndexer {
    pub fn new(fs: Arc<dyn FileSystem>, allocator: Arc<dyn SequenceAllocator>) -> Self {
        Self { fs, allocator }
    }

    /// 次の成果物パスを割り当てる（ファイルはまだ作らない）
    pub fn allocate(
        &self,
        category_dir: &Path,
        prefix: &str,
        extension: &str,
    ) -> Result<(SequenceNumber, PathBuf), Error> {
        self.fs.create_dir_all(category_dir)?;
        let seq = self.allocator.next(category_dir, prefix, extension)?;
        Ok((seq, category_dir.join(artifact_file_name(prefix, seq, extension))))
    }

    /// 割り当てたパスへ内容を書き出す
    pub fn write_artifact(
        &self,
        out_dir: &OutDir,
        category: &Category,
        content: &str,
    ) -> Result<Artifact, Error> {
        let (seq, path) = self.allocate(
            &out_dir.category_dir(category),
            category.prefix(),
            category.extension(),
        )?;
        self.fs.write(&path, content)?;
        Ok(Artifact {
            category: category.dir().to_string(),
            seq,
            path,
        })
    }
}
