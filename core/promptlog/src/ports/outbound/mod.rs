//! Outbound ポート: usecase が外界を使うための trait

pub mod completion_service;
pub mod config_loader;
pub mod prompter;
pub mod record_log;
pub mod sequence_allocator;
pub mod sync_sink;

pub use completion_service::CompletionService;
pub use config_loader::ConfigLoader;
pub use prompter::Prompter;
pub use record_log::RecordLog;
pub use sequence_allocator::SequenceAllocator;
pub use sync_sink::SyncSink;
