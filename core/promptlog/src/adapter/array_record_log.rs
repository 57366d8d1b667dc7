//! JSON 配列形式の集約ログ
//!
//! 追記のたびに全件を読み直し、整形済みの配列を一時ファイルへ書いてから rename する。
//! ファイルは常に JSON 配列として妥当。

use common::domain::Record;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::ensure_parent_dir;
use crate::ports::outbound::RecordLog;

pub struct ArrayRecordLog {
    fs: Arc<dyn FileSystem>,
}

impl ArrayRecordLog {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

fn temp_path(log_path: &Path) -> PathBuf {
    let mut name = log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    log_path.with_file_name(name)
}

impl RecordLog for ArrayRecordLog {
    fn append(&self, log_path: &Path, record: &Record) -> Result<(), Error> {
        let mut records = self.read_all(log_path)?;
        records.push(record.clone());
        let body = serde_json::to_string_pretty(&records)
            .map_err(|e| Error::json(format!("Failed to serialize records: {}", e)))?;
        ensure_parent_dir(self.fs.as_ref(), log_path)?;
        let tmp = temp_path(log_path);
        self.fs.write(&tmp, &body)?;
        self.fs.rename(&tmp, log_path)
    }

    fn read_all(&self, log_path: &Path) -> Result<Vec<Record>, Error> {
        if !self.fs.exists(log_path) {
            return Ok(Vec::new());
        }
        let text = self.fs.read_to_string(log_path)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str::<Vec<Record>>(&text).map_err(|e| {
            Error::json(format!(
                "Record log '{}' is not a JSON array of records: {}",
                log_path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/out/pc.json")),
            PathBuf::from("/out/pc.json.tmp")
        );
    }
}
