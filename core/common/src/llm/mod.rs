//! 補完 API プロバイダの実装
//!
//! `/completions` 形式（`{"prompt", "max_tokens"}` → `choices[0].text`）の
//! リクエスト生成・送信・応答解析をプロバイダごとに提供します。

pub mod echo;
pub mod factory;
pub mod openai_completions;
pub mod provider;

pub use factory::{create_provider, ProviderConfig, ProviderType};
pub use provider::{extract_first_choice_text, CompletionProvider};
