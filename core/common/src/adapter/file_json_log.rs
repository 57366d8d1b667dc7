//! Log 実装: ファイルへ JSONL 追記 / stderr への要約 / 何もしない / 複数へ分配
//!
//! 構造化ログの出力先はファイルのみ。-v 指定時だけ stderr にも要約を出す。

use crate::error::Error;
use crate::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let mut w = self.fs.open_append(&self.path)?;
        let line = serde_json::to_string(record).map_err(|e| Error::json(e.to_string()))?;
        w.write_all(line.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.write_all(b"\n")
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// 何も出力しない Log 実装（ホーム解決失敗時・テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

/// stderr に 1 行要約を出す Log 実装（-v / --verbose 用）
#[derive(Debug, Clone, Default)]
pub struct StderrLog;

impl StderrLog {
    fn format_line(record: &LogRecord) -> String {
        let level = match record.level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        let mut line = format!("[{}] {}", level, record.message);
        if let Some(ref kind) = record.kind {
            line.push_str(&format!(" kind={}", kind));
        }
        if let Some(ref fields) = record.fields {
            for (k, v) in fields {
                line.push_str(&format!(" {}={}", k, v));
            }
        }
        line
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        eprintln!("{}", Self::format_line(record));
        Ok(())
    }
}

/// 複数の Log へ同じレコードを渡す。最初のエラーを返すが、残りへの出力は続ける。
pub struct FanoutLog {
    sinks: Vec<Arc<dyn Log>>,
}

impl FanoutLog {
    pub fn new(sinks: Vec<Arc<dyn Log>>) -> Self {
        Self { sinks }
    }
}

impl Log for FanoutLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;
    use tempfile::tempdir;

    #[test]
    fn test_noop_log() {
        let log = NoopLog;
        let rec = LogRecord::new(LogLevel::Info, "test");
        assert!(log.log(&rec).is_ok());
    }

    #[test]
    fn test_file_json_log_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("logs").join("promptlog.jsonl");
        let log = FileJsonLog::new(Arc::new(StdFileSystem), &path);
        log.log(&LogRecord::new(LogLevel::Info, "first")).unwrap();
        log.log(&LogRecord::new(LogLevel::Error, "second").kind("error"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["message"], "second");
        assert_eq!(v["level"], "error");
    }

    #[test]
    fn test_stderr_format_line() {
        let rec = LogRecord::new(LogLevel::Warn, "sync failed")
            .kind("sync")
            .field("step", "push");
        assert_eq!(
            StderrLog::format_line(&rec),
            "[warn] sync failed kind=sync step=\"push\""
        );
    }

    #[test]
    fn test_fanout_continues_after_error() {
        struct Failing;
        impl Log for Failing {
            fn log(&self, _record: &LogRecord) -> Result<(), Error> {
                Err(Error::io_msg("disk full"))
            }
        }
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jsonl");
        let file: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::new(StdFileSystem), &path));
        let fanout = FanoutLog::new(vec![Arc::new(Failing), file]);
        let err = fanout.log(&LogRecord::new(LogLevel::Info, "x")).unwrap_err();
        assert_eq!(err, Error::io_msg("disk full"));
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"x\""));
    }
}
