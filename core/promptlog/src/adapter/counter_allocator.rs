//! ロック付きカウンタファイルによる連番割り当て
//!
//! `<state_dir>/<カテゴリディレクトリ名>.seq` に最後に払い出した番号を保存し、
//! 読み出しから書き戻しまで排他ロック（fs2）を保持する。プロセス間で番号は重複しない。
//! カウンタが無いときはカテゴリディレクトリのエントリ数から始め、既存ファイルと
//! 同名になる番号は飛ばす。ディレクトリ操作は FileSystem ポート経由で、
//! カウンタファイル本体だけはロックのために直接開く。

use common::domain::{artifact_file_name, SequenceNumber};
use common::error::Error;
use common::ports::outbound::FileSystem;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ports::outbound::SequenceAllocator;

pub struct LockedCounterAllocator {
    fs: Arc<dyn FileSystem>,
    state_dir: PathBuf,
}

impl LockedCounterAllocator {
    pub fn new(fs: Arc<dyn FileSystem>, state_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            state_dir: state_dir.into(),
        }
    }

    fn counter_path(&self, category_dir: &Path) -> PathBuf {
        let name = category_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "artifacts".to_string());
        self.state_dir.join(format!("{}.seq", name))
    }

    fn advance(
        &self,
        file: &mut File,
        counter_path: &Path,
        category_dir: &Path,
        prefix: &str,
        extension: &str,
    ) -> Result<SequenceNumber, Error> {
        let io_err = |e: std::io::Error| {
            Error::io_msg(format!(
                "Failed to update sequence counter '{}': {}",
                counter_path.display(),
                e
            ))
        };
        let corrupt = |detail: String| {
            Error::io_msg(format!(
                "Corrupt sequence counter '{}': {}",
                counter_path.display(),
                detail
            ))
        };

        let mut text = String::new();
        file.read_to_string(&mut text).map_err(io_err)?;
        let last = match text.trim() {
            "" => self.fs.count_entries(category_dir)? as u64,
            s => s.parse::<u64>().map_err(|e| corrupt(e.to_string()))?,
        };

        let exhausted = || corrupt(format!("{} has no successor", last));
        let mut seq = SequenceNumber::new(last).next().ok_or_else(exhausted)?;
        while self
            .fs
            .exists(&category_dir.join(artifact_file_name(prefix, seq, extension)))
        {
            seq = seq.next().ok_or_else(exhausted)?;
        }

        file.set_len(0).map_err(io_err)?;
        file.seek(SeekFrom::Start(0)).map_err(io_err)?;
        file.write_all(seq.to_string().as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        Ok(seq)
    }
}

impl SequenceAllocator for LockedCounterAllocator {
    fn next(
        &self,
        category_dir: &Path,
        prefix: &str,
        extension: &str,
    ) -> Result<SequenceNumber, Error> {
        self.fs.create_dir_all(&self.state_dir)?;
        let counter_path = self.counter_path(category_dir);
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&counter_path)
            .map_err(|e| {
                Error::io_msg(format!(
                    "Failed to open sequence counter '{}': {}",
                    counter_path.display(),
                    e
                ))
            })?;
        file.lock_exclusive().map_err(|e| {
            Error::io_msg(format!(
                "Failed to lock sequence counter '{}': {}",
                counter_path.display(),
                e
            ))
        })?;
        let result = self.advance(&mut file, &counter_path, category_dir, prefix, extension);
        let _ = FileExt::unlock(&file);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use std::thread;
    use tempfile::tempdir;

    fn allocator(state_dir: impl Into<PathBuf>) -> LockedCounterAllocator {
        LockedCounterAllocator::new(Arc::new(StdFileSystem), state_dir)
    }

    #[test]
    fn test_starts_at_one_and_increments() {
        let dir = tempdir().unwrap();
        let category = dir.path().join("prompt");
        std::fs::create_dir_all(&category).unwrap();
        let alloc = allocator(dir.path().join(".promptlog/seq"));

        let a = alloc.next(&category, "prompt", "txt").unwrap();
        let b = alloc.next(&category, "prompt", "txt").unwrap();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        let stored = std::fs::read_to_string(dir.path().join(".promptlog/seq/prompt.seq")).unwrap();
        assert_eq!(stored, "2");
    }

    #[test]
    fn test_seeds_from_existing_entries() {
        let dir = tempdir().unwrap();
        let category = dir.path().join("pc");
        std::fs::create_dir_all(&category).unwrap();
        std::fs::write(category.join("pc1.json"), "x").unwrap();
        std::fs::write(category.join("pc2.json"), "x").unwrap();
        let alloc = allocator(dir.path().join("state"));
        assert_eq!(alloc.next(&category, "pc", "json").unwrap().get(), 3);
    }

    #[test]
    fn test_never_reuses_a_deleted_number() {
        let dir = tempdir().unwrap();
        let category = dir.path().join("compl");
        std::fs::create_dir_all(&category).unwrap();
        let alloc = allocator(dir.path().join("state"));
        for _ in 0..3 {
            let seq = alloc.next(&category, "compl", "json").unwrap();
            std::fs::write(category.join(format!("compl{}.json", seq)), "x").unwrap();
        }
        std::fs::remove_file(category.join("compl1.json")).unwrap();
        assert_eq!(alloc.next(&category, "compl", "json").unwrap().get(), 4);
    }

    #[test]
    fn test_skips_existing_file_names() {
        let dir = tempdir().unwrap();
        let category = dir.path().join("prompt");
        std::fs::create_dir_all(&category).unwrap();
        let state = dir.path().join("state");
        std::fs::create_dir_all(&state).unwrap();
        std::fs::write(state.join("prompt.seq"), "1").unwrap();
        std::fs::write(category.join("prompt2.txt"), "x").unwrap();
        std::fs::write(category.join("prompt3.txt"), "x").unwrap();
        let alloc = allocator(&state);
        assert_eq!(alloc.next(&category, "prompt", "txt").unwrap().get(), 4);
    }

    #[test]
    fn test_corrupt_counter_is_io_error() {
        let dir = tempdir().unwrap();
        let category = dir.path().join("prompt");
        std::fs::create_dir_all(&category).unwrap();
        let state = dir.path().join("state");
        std::fs::create_dir_all(&state).unwrap();
        std::fs::write(state.join("prompt.seq"), "seven").unwrap();
        let alloc = allocator(&state);
        let err = alloc.next(&category, "prompt", "txt").unwrap_err();
        assert!(err.to_string().contains("Corrupt sequence counter"));
    }

    #[test]
    fn test_counter_at_u64_max_is_io_error() {
        let dir = tempdir().unwrap();
        let category = dir.path().join("prompt");
        std::fs::create_dir_all(&category).unwrap();
        let state = dir.path().join("state");
        std::fs::create_dir_all(&state).unwrap();
        std::fs::write(state.join("prompt.seq"), u64::MAX.to_string()).unwrap();
        let alloc = allocator(&state);

        let err = alloc.next(&category, "prompt", "txt").unwrap_err();

        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("Corrupt sequence counter"));
        // カウンタは書き換えない
        assert_eq!(
            std::fs::read_to_string(state.join("prompt.seq")).unwrap(),
            u64::MAX.to_string()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_state_dir_created_through_file_system() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let category = dir.path().join("pc");
        std::fs::create_dir_all(&category).unwrap();
        let state = dir.path().join(".promptlog").join("seq");
        let alloc = allocator(&state);

        alloc.next(&category, "pc", "json").unwrap();

        let mode = std::fs::metadata(&state).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o022, 0);
    }

    #[test]
    fn test_concurrent_allocations_are_unique() {
        let dir = tempdir().unwrap();
        let category = dir.path().join("prompt");
        std::fs::create_dir_all(&category).unwrap();
        let state = dir.path().join("state");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let category = category.clone();
                let alloc = Arc::new(allocator(&state));
                thread::spawn(move || {
                    (0..5)
                        .map(|_| alloc.next(&category, "prompt", "txt").unwrap().get())
                        .collect::<Vec<u64>>()
                })
            })
            .collect();
        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort();
        assert_eq!(all, (1..=40).collect::<Vec<u64>>());
    }
}
