//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{
    FanoutLog, FileJsonLog, NoopLog, StderrLog, StdEnvResolver, StdFileSystem, StdProcess,
};
use common::error::Error;
use common::llm::{create_provider, ProviderConfig};
use common::ports::outbound::{EnvResolver, FileSystem, Log, Process};

use crate::adapter::{
    ArrayRecordLog, ConcatRecordLog, DirectoryScanAllocator, GitSyncSink, JsonConfigLoader,
    JsonLinesRecordLog, LockedCounterAllocator, ProviderCompletionService, StdinPrompter,
};
use crate::domain::{AllocatorKind, LogFormat, Settings};
use crate::ports::outbound::{
    CompletionService, ConfigLoader, Prompter, RecordLog, SequenceAllocator, SyncSink,
};
use crate::usecase::app::{PromptLogDeps, PromptLogUseCase, StorageDeps};

/// 配線で組み立てたポート群（設定に依存しないもの）
pub struct App {
    pub fs: Arc<dyn FileSystem>,
    pub env_resolver: Arc<dyn EnvResolver>,
    pub process: Arc<dyn Process>,
    /// 構造化ログ（ファイルへ JSONL）。コンソール表示とは別。
    pub logger: Arc<dyn Log>,
    pub config_loader: Arc<dyn ConfigLoader>,
}

/// 配線: 標準アダプタで App を組み立てる。verbose 時はログを stderr にも流す。
pub fn wire_base(verbose: bool) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let process: Arc<dyn Process> = Arc::new(StdProcess);
    let file_log: Arc<dyn Log> = env_resolver
        .resolve_log_file_path()
        .map(|path| Arc::new(FileJsonLog::new(Arc::clone(&fs), path)) as Arc<dyn Log>)
        .unwrap_or_else(|_| Arc::new(NoopLog));
    let logger: Arc<dyn Log> = if verbose {
        Arc::new(FanoutLog::new(vec![file_log, Arc::new(StderrLog)]))
    } else {
        file_log
    };
    let config_loader: Arc<dyn ConfigLoader> = Arc::new(JsonConfigLoader::new(
        Arc::clone(&fs),
        Arc::clone(&env_resolver),
    ));
    App {
        fs,
        env_resolver,
        process,
        logger,
        config_loader,
    }
}

/// 解決済みの設定からユースケースを組み立てる
pub fn wire_use_case(app: &App, settings: &Settings) -> Result<PromptLogUseCase, Error> {
    let allocator: Arc<dyn SequenceAllocator> = match settings.allocator {
        AllocatorKind::Scan => Arc::new(DirectoryScanAllocator::new(Arc::clone(&app.fs))),
        AllocatorKind::Counter => Arc::new(LockedCounterAllocator::new(
            Arc::clone(&app.fs),
            settings.out_dir.sequence_state_dir(),
        )),
    };
    let record_log: Arc<dyn RecordLog> = match settings.log_format {
        LogFormat::Concat => Arc::new(ConcatRecordLog::new(Arc::clone(&app.fs))),
        LogFormat::Jsonl => Arc::new(JsonLinesRecordLog::new(Arc::clone(&app.fs))),
        LogFormat::Array => Arc::new(ArrayRecordLog::new(Arc::clone(&app.fs))),
    };
    let provider = create_provider(&ProviderConfig {
        provider: settings.provider,
        endpoint: settings.endpoint.clone(),
        api_key: settings.api_key.clone(),
        timeout: Some(settings.timeout),
    })?;
    let completion: Arc<dyn CompletionService> = Arc::new(ProviderCompletionService::new(
        provider,
        Arc::clone(&app.logger),
    ));
    let sync_sink: Arc<dyn SyncSink> = Arc::new(GitSyncSink::new(
        Arc::clone(&app.process),
        settings.out_dir.to_path_buf(),
    ));
    let prompter: Arc<dyn Prompter> = Arc::new(StdinPrompter);

    Ok(PromptLogUseCase::new(PromptLogDeps {
        storage: StorageDeps {
            fs: Arc::clone(&app.fs),
            allocator,
            record_log,
        },
        completion,
        sync_sink,
        prompter,
        log: Arc::clone(&app.logger),
    }))
}
