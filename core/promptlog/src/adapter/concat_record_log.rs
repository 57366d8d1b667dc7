//! 連結 JSON 形式の集約ログ
//!
//! 初回は整形済み JSON オブジェクト 1 つをそのまま書く。2 回目以降は既存内容を
//! 検証せず `,\n\n` と整形済みオブジェクトを追記する。トップレベルの配列を
//! 開閉しないため、2 件目以降のファイルは JSON 文書として不正になる。
//! 既存ファイルとの互換のためにこの形を保っている。

use common::domain::Record;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use super::ensure_parent_dir;
use crate::ports::outbound::RecordLog;

/// 2 件目以降のレコードの前に置く区切り
pub const SEPARATOR: &str = ",\n\n";

pub struct ConcatRecordLog {
    fs: Arc<dyn FileSystem>,
}

impl ConcatRecordLog {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl RecordLog for ConcatRecordLog {
    fn append(&self, log_path: &Path, record: &Record) -> Result<(), Error> {
        let body = record.to_pretty_json()?;
        if !self.fs.exists(log_path) {
            ensure_parent_dir(self.fs.as_ref(), log_path)?;
            return self.fs.write(log_path, &body);
        }
        let mut w = self.fs.open_append(log_path)?;
        w.write_all(format!("{}{}", SEPARATOR, body).as_bytes())
            .and_then(|_| w.flush())
            .map_err(|e| {
                Error::io_msg(format!(
                    "Failed to append to '{}': {}",
                    log_path.display(),
                    e
                ))
            })
    }

    /// 区切りを読み飛ばしながらオブジェクトを順に取り出す（ベストエフォート）
    fn read_all(&self, log_path: &Path) -> Result<Vec<Record>, Error> {
        if !self.fs.exists(log_path) {
            return Ok(Vec::new());
        }
        let text = self.fs.read_to_string(log_path)?;
        parse_concatenated(&text).map_err(|e| {
            Error::json(format!("Invalid record log '{}': {}", log_path.display(), e))
        })
    }
}

fn parse_concatenated(text: &str) -> Result<Vec<Record>, serde_json::Error> {
    let mut records = Vec::new();
    let mut rest = text;
    loop {
        rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if rest.is_empty() {
            break;
        }
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Record>();
        match stream.next() {
            Some(Ok(record)) => {
                records.push(record);
                let offset = stream.byte_offset();
                rest = &rest[offset..];
            }
            Some(Err(e)) => return Err(e),
            None => break,
        }
    }
    Ok(records)
}
