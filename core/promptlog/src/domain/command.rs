//! promptlog コマンドの enum（Command Pattern）

use crate::domain::{AllocatorKind, LogFormat, OutputLayout, Prompt, SyncMode};
use common::llm::ProviderType;
use std::path::PathBuf;

/// 1 回の補完実行に対する CLI 指定（未指定は None。設定ファイル・既定値で補う）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// 位置引数のプロンプト。None なら stdin から 1 行読む
    pub prompt: Option<Prompt>,
    pub provider: Option<ProviderType>,
    pub endpoint: Option<String>,
    pub max_tokens: Option<u32>,
    pub out_dir: Option<PathBuf>,
    pub layout: Option<OutputLayout>,
    pub log_format: Option<LogFormat>,
    pub log_file: Option<PathBuf>,
    pub allocator: Option<AllocatorKind>,
    pub sync: Option<SyncMode>,
    pub commit_message: Option<String>,
    pub trim: bool,
    pub non_interactive: bool,
}

/// promptlog の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// ヘルプ表示
    Help,
    /// プロンプトを補完して記録する
    Run(RunOptions),
}
