//! ユースケース層（ports::outbound 経由でのみ I/O を行う）

pub mod app;
pub mod artifact_indexer;
pub mod settings;
