//! 補完パイプライン: プロンプト取得 → 補完 → 成果物書き出し → 集約ログ追記 → 同期
//!
//! 補完に失敗した場合（HTTP エラー・応答形不正）は何も書き出さない。
//! 書き出し途中の失敗は、それまでに書いたファイルを残したまま終了する。

use common::domain::{Artifact, Category, OutDir, Record};
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{OutputLayout, Prompt, Settings, SyncMode};
use crate::ports::outbound::{
    CompletionService, Prompter, RecordLog, SequenceAllocator, SyncSink,
};
use crate::usecase::artifact_indexer::ArtifactIndexer;

pub const PROMPT_QUESTION: &str = "Enter the prompt:";
pub const SYNC_QUESTION: &str =
    "Do you want to proceed with updating the GitHub repository? (yes/no): ";

// --- 責務別 Deps（usecase が定義を所有し、wiring は組み立てるだけ）

pub struct PromptLogDeps {
    pub storage: StorageDeps,
    pub completion: Arc<dyn CompletionService>,
    pub sync_sink: Arc<dyn SyncSink>,
    pub prompter: Arc<dyn Prompter>,
    pub log: Arc<dyn Log>,
}

pub struct StorageDeps {
    pub fs: Arc<dyn FileSystem>,
    pub allocator: Arc<dyn SequenceAllocator>,
    pub record_log: Arc<dyn RecordLog>,
}

/// 1 回の実行要求
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// None なら端末から 1 行読む
    pub prompt: Option<Prompt>,
    pub trim_prompt: bool,
    pub max_tokens: u32,
    pub out_dir: OutDir,
    pub layout: OutputLayout,
    pub log_path: PathBuf,
}

impl RunRequest {
    pub fn from_settings(settings: &Settings, prompt: Option<Prompt>) -> Self {
        Self {
            prompt,
            trim_prompt: settings.trim_prompt,
            max_tokens: settings.max_tokens,
            out_dir: settings.out_dir.clone(),
            layout: settings.layout,
            log_path: settings.log_path.clone(),
        }
    }
}

/// 記録結果
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub record: Record,
    /// 書き出した成果物（prompt, pc, compl の順）
    pub artifacts: Vec<Artifact>,
    /// 追記した集約ログ
    pub log_path: Option<PathBuf>,
}

/// 同期の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Skipped,
    Committed,
    /// 失敗は致命ではない（記録済みの成果物には影響しない）
    Failed(String),
}

/// promptlog のユースケース（アダプター経由で I/O を行う）
pub struct PromptLogUseCase {
    deps: PromptLogDeps,
    indexer: ArtifactIndexer,
}

impl PromptLogUseCase {
    pub fn new(deps: PromptLogDeps) -> Self {
        let indexer = ArtifactIndexer::new(
            Arc::clone(&deps.storage.fs),
            Arc::clone(&deps.storage.allocator),
        );
        Self { deps, indexer }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.log.log(&record.layer("usecase"));
    }

    fn obtain_prompt(&self, req: &RunRequest) -> Result<Prompt, Error> {
        let prompt = match req.prompt.clone() {
            Some(p) => p,
            None => Prompt::new(self.deps.prompter.read_line(PROMPT_QUESTION)?),
        };
        let prompt = if req.trim_prompt { prompt.trimmed() } else { prompt };
        if prompt.is_blank() {
            return Err(Error::invalid_argument("No prompt provided."));
        }
        Ok(prompt)
    }

    /// プロンプトを補完し、成果物と集約ログに記録する
    pub fn complete_and_record(&self, req: &RunRequest) -> Result<RunOutcome, Error> {
        let prompt = self.obtain_prompt(req)?;

        let completion = match self.deps.completion.complete(&prompt, req.max_tokens) {
            Ok(text) => text,
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Error, e.to_string())
                        .kind("completion")
                        .field("written", 0),
                );
                return Err(e);
            }
        };
        let record = Record::new(prompt.as_str(), completion);

        let mut artifacts = Vec::new();
        if req.layout.writes_artifacts() {
            let contents = [
                (Category::prompt(), record.prompt.clone()),
                (Category::combined(), record.combined_text()),
                (Category::completion(), record.completions.clone()),
            ];
            for (category, content) in &contents {
                let artifact = self.indexer.write_artifact(&req.out_dir, category, content)?;
                self.log(
                    LogRecord::new(LogLevel::Info, "artifact written")
                        .kind("artifact")
                        .field("category", artifact.category.as_str())
                        .field("seq", artifact.seq.get())
                        .field("path", artifact.path.display().to_string()),
                );
                artifacts.push(artifact);
            }
        }

        let mut log_path = None;
        if req.layout.writes_log() {
            self.deps.storage.record_log.append(&req.log_path, &record)?;
            self.log(
                LogRecord::new(LogLevel::Info, "record appended")
                    .kind("record_log")
                    .field("path", req.log_path.display().to_string()),
            );
            log_path = Some(req.log_path.clone());
        }

        Ok(RunOutcome {
            record,
            artifacts,
            log_path,
        })
    }

    /// 同期する。失敗はログに残して SyncOutcome::Failed で返す（エラーにはしない）。
    pub fn sync(&self, mode: SyncMode, message: &str) -> SyncOutcome {
        let proceed = match mode {
            SyncMode::Never => false,
            SyncMode::Always => true,
            SyncMode::Ask => match self.deps.prompter.confirm(SYNC_QUESTION) {
                Ok(answer) => answer,
                Err(e) => {
                    // 回答を読めなければ「いいえ」扱い
                    self.log(
                        LogRecord::new(LogLevel::Warn, e.to_string())
                            .kind("sync")
                            .field("step", "confirm"),
                    );
                    false
                }
            },
        };
        if !proceed {
            return SyncOutcome::Skipped;
        }
        match self.deps.sync_sink.commit(message) {
            Ok(()) => {
                self.log(LogRecord::new(LogLevel::Info, "synced").kind("sync"));
                SyncOutcome::Committed
            }
            Err(e) => {
                self.log(LogRecord::new(LogLevel::Warn, e.to_string()).kind("sync"));
                SyncOutcome::Failed(e.to_string())
            }
        }
    }
}
