//! promptlog 固有のドメイン型（型と不変条件）

pub mod command;
pub mod prompt;
pub mod settings;

pub use command::{AppCommand, RunOptions};
pub use prompt::Prompt;
pub use settings::{AllocatorKind, FileConfig, LogFormat, OutputLayout, Settings, SyncMode};
