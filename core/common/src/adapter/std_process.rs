//! 標準サブプロセス実行（std::process::Command を委譲）

use crate::error::Error;
use crate::ports::outbound::Process;
use std::path::Path;

/// 標準ライブラリの Command を使う Process 実装（stdout / stderr は親から継承）
#[derive(Debug, Clone, Default)]
pub struct StdProcess;

impl Process for StdProcess {
    fn run(&self, program: &Path, args: &[String], cwd: Option<&Path>) -> Result<i32, Error> {
        let mut cmd = std::process::Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let status = cmd.status().map_err(|e| {
            Error::io_msg(format!(
                "Failed to execute '{}': {}",
                program.display(),
                e
            ))
        })?;
        Ok(status.code().unwrap_or(1))
    }
}
