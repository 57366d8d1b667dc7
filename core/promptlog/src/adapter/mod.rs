//! アダプター（ports::outbound の標準実装）

pub(crate) mod array_record_log;
pub(crate) mod concat_record_log;
pub(crate) mod counter_allocator;
pub(crate) mod git_sync_sink;
pub(crate) mod json_config_loader;
pub(crate) mod jsonl_record_log;
pub(crate) mod provider_completion_service;
pub(crate) mod scan_allocator;
pub(crate) mod stdin_prompter;

pub(crate) use array_record_log::ArrayRecordLog;
pub(crate) use concat_record_log::ConcatRecordLog;
pub(crate) use counter_allocator::LockedCounterAllocator;
pub(crate) use git_sync_sink::GitSyncSink;
pub(crate) use json_config_loader::JsonConfigLoader;
pub(crate) use jsonl_record_log::JsonLinesRecordLog;
pub(crate) use provider_completion_service::ProviderCompletionService;
pub(crate) use scan_allocator::DirectoryScanAllocator;
pub(crate) use stdin_prompter::StdinPrompter;

use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::Path;

/// ログファイルの親ディレクトリを用意する（相対パスで親が空なら何もしない）
pub(crate) fn ensure_parent_dir(fs: &dyn FileSystem, path: &Path) -> Result<(), Error> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs.create_dir_all(parent),
        _ => Ok(()),
    }
}
