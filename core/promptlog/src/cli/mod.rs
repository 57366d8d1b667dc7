//! CLI（引数解析と Command への変換）

pub mod args;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
