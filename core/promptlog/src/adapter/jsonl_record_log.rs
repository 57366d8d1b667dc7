//! JSON Lines 形式の集約ログ（1 行 1 レコード。各行を単独でパースできる）

use common::domain::Record;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use super::ensure_parent_dir;
use crate::ports::outbound::RecordLog;

pub struct JsonLinesRecordLog {
    fs: Arc<dyn FileSystem>,
}

impl JsonLinesRecordLog {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl RecordLog for JsonLinesRecordLog {
    fn append(&self, log_path: &Path, record: &Record) -> Result<(), Error> {
        ensure_parent_dir(self.fs.as_ref(), log_path)?;
        let mut line = record.to_json_line()?;
        line.push('\n');
        let mut w = self.fs.open_append(log_path)?;
        w.write_all(line.as_bytes())
            .and_then(|_| w.flush())
            .map_err(|e| {
                Error::io_msg(format!(
                    "Failed to append to '{}': {}",
                    log_path.display(),
                    e
                ))
            })
    }

    fn read_all(&self, log_path: &Path) -> Result<Vec<Record>, Error> {
        if !self.fs.exists(log_path) {
            return Ok(Vec::new());
        }
        let text = self.fs.read_to_string(log_path)?;
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str::<Record>(line).map_err(|e| {
                    Error::json(format!(
                        "Invalid record at {}:{}: {}",
                        log_path.display(),
                        i + 1,
                        e
                    ))
                })
            })
            .collect()
    }
}
