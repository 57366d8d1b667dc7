//! git による同期（add → commit → push）

use common::domain::STATE_DIR_NAME;
use common::error::Error;
use common::ports::outbound::Process;
use std::path::PathBuf;
use std::sync::Arc;

use crate::ports::outbound::SyncSink;

/// 出力先ディレクトリで git add / commit / push を順に実行する。最初に失敗した段で止まる。
/// 内部状態ディレクトリ（STATE_DIR_NAME）は add の対象から外す。
pub struct GitSyncSink {
    process: Arc<dyn Process>,
    work_dir: PathBuf,
    program: PathBuf,
}

impl GitSyncSink {
    pub fn new(process: Arc<dyn Process>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            process,
            work_dir: work_dir.into(),
            program: PathBuf::from("git"),
        }
    }
}

/// `git add -- . :(exclude).promptlog`
fn add_args() -> Vec<String> {
    vec![
        "add".to_string(),
        "--".to_string(),
        ".".to_string(),
        format!(":(exclude){}", STATE_DIR_NAME),
    ]
}

impl SyncSink for GitSyncSink {
    fn commit(&self, message: &str) -> Result<(), Error> {
        let steps: [Vec<String>; 3] = [
            add_args(),
            vec!["commit".to_string(), "-m".to_string(), message.to_string()],
            vec!["push".to_string()],
        ];
        for args in &steps {
            let code = self
                .process
                .run(&self.program, args, Some(&self.work_dir))
                .map_err(|e| Error::sync(format!("Error running git command: {}", e)))?;
            if code != 0 {
                return Err(Error::sync(format!(
                    "Error running git command: git {} exited with status {}",
                    args[0], code
                )));
            }
        }
        Ok(())
    }
}
