//! 実行設定（既定値 → 設定ファイル → CLI の順に上書きした結果）

use common::domain::{ApiKey, OutDir};
use common::error::Error;
use common::llm::ProviderType;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MAX_TOKENS: u32 = 3000;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_COMMIT_MESSAGE: &str = "Added prompt and completion files";

/// 成果物の出力形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLayout {
    /// prompt/ pc/ compl/ の連番ファイルのみ
    Artifacts,
    /// 集約ログのみ
    Log,
    /// 両方
    #[default]
    Both,
}

impl OutputLayout {
    pub fn writes_artifacts(self) -> bool {
        matches!(self, Self::Artifacts | Self::Both)
    }

    pub fn writes_log(self) -> bool {
        matches!(self, Self::Log | Self::Both)
    }
}

impl FromStr for OutputLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artifacts" => Ok(Self::Artifacts),
            "log" => Ok(Self::Log),
            "both" => Ok(Self::Both),
            other => Err(Error::invalid_argument(format!(
                "Unknown layout '{}' (expected: artifacts, log, both)",
                other
            ))),
        }
    }
}

/// 集約ログの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 既存ファイルに `,\n\n` + 整形済み JSON を連結する（2 件目以降は JSON として不正）
    Concat,
    /// 1 行 1 レコードの JSON Lines
    #[default]
    Jsonl,
    /// 毎回 JSON 配列全体を書き直す
    Array,
}

impl LogFormat {
    /// 形式ごとの既定ファイル名
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Jsonl => "pc.jsonl",
            Self::Concat | Self::Array => "pc.json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concat" => Ok(Self::Concat),
            "jsonl" => Ok(Self::Jsonl),
            "array" => Ok(Self::Array),
            other => Err(Error::invalid_argument(format!(
                "Unknown log format '{}' (expected: concat, jsonl, array)",
                other
            ))),
        }
    }
}

/// 連番の割り当て方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocatorKind {
    /// ディレクトリのエントリ数 + 1（プロセス間で競合しうる）
    Scan,
    /// ロック付きカウンタファイル
    #[default]
    Counter,
}

impl FromStr for AllocatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scan" => Ok(Self::Scan),
            "counter" => Ok(Self::Counter),
            other => Err(Error::invalid_argument(format!(
                "Unknown allocator '{}' (expected: scan, counter)",
                other
            ))),
        }
    }
}

/// バージョン管理への同期をいつ行うか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// 端末で確認する
    #[default]
    Ask,
    Always,
    Never,
}

impl FromStr for SyncMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ask" => Ok(Self::Ask),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(Error::invalid_argument(format!(
                "Unknown sync mode '{}' (expected: ask, always, never)",
                other
            ))),
        }
    }
}

/// 設定ファイル（<home>/config.json）の内容。すべて任意。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub provider: Option<String>,
    pub endpoint: Option<String>,
    pub api_key_env: Option<String>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub out_dir: Option<PathBuf>,
    pub layout: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub allocator: Option<String>,
    pub sync: Option<String>,
    pub commit_message: Option<String>,
}

/// 解決済みの実行設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderType,
    pub endpoint: Option<String>,
    /// 起動時に一度だけ読んだ API キー（echo では None のことがある）
    pub api_key: Option<ApiKey>,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub out_dir: OutDir,
    pub layout: OutputLayout,
    pub log_format: LogFormat,
    /// 集約ログのパス（out_dir 基準で解決済み）
    pub log_path: PathBuf,
    pub allocator: AllocatorKind,
    pub sync: SyncMode,
    pub commit_message: String,
    pub trim_prompt: bool,
}
