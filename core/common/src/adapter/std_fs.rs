//! std::fs による FileSystem 実装
//!
//! エラーは対象パスを含む Io メッセージにして返す。

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(|e| {
            Error::io_msg(format!("Failed to read '{}': {}", path.display(), e))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        std::fs::write(path, contents).map_err(|e| {
            Error::io_msg(format!("Failed to write '{}': {}", path.display(), e))
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error> {
        std::fs::rename(from, to).map_err(|e| {
            Error::io_msg(format!(
                "Failed to rename '{}' to '{}': {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(path).map_err(|e| {
            Error::io_msg(format!("Failed to create directory '{}': {}", path.display(), e))
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn count_entries(&self, dir: &Path) -> Result<usize, Error> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            Error::io_msg(format!("Failed to read directory '{}': {}", dir.display(), e))
        })?;
        let mut count = 0;
        for entry in entries {
            entry.map_err(|e| {
                Error::io_msg(format!("Failed to read directory '{}': {}", dir.display(), e))
            })?;
            count += 1;
        }
        Ok(count)
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                Error::io_msg(format!("Failed to open '{}' for append: {}", path.display(), e))
            })?;
        Ok(Box::new(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_count_entries_counts_files_and_dirs() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("prompt1.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        assert_eq!(StdFileSystem.count_entries(dir.path()).unwrap(), 2);
    }

    #[test]
    fn test_count_entries_missing_dir_is_io_error() {
        let dir = tempdir().unwrap();
        let err = StdFileSystem
            .count_entries(&dir.path().join("nope"))
            .unwrap_err();
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_rename_replaces_target() {
        let dir = tempdir().unwrap();
        let tmp = dir.path().join("pc.json.tmp");
        let target = dir.path().join("pc.json");
        StdFileSystem.write(&target, "old").unwrap();
        StdFileSystem.write(&tmp, "new").unwrap();
        StdFileSystem.rename(&tmp, &target).unwrap();
        assert!(!StdFileSystem.exists(&tmp));
        assert_eq!(StdFileSystem.read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_open_append_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let fs = StdFileSystem;
        fs.write(&path, "one").unwrap();
        {
            let mut w = fs.open_append(&path).unwrap();
            w.write_all(b"two").unwrap();
        }
        assert_eq!(fs.read_to_string(&path).unwrap(), "onetwo");
    }

    #[cfg(unix)]
    #[test]
    fn test_create_dir_all_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let path = dir.path().join("x").join("y");
        StdFileSystem.create_dir_all(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask 次第で狭くなるが、グループ・他者の書き込みは付かない
        assert_eq!(mode & 0o022, 0);
        assert!(mode & 0o700 == 0o700);
    }
}
