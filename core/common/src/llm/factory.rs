//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::domain::ApiKey;
use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::openai_completions::OpenAiCompletionsProvider;
use crate::llm::provider::CompletionProvider;
use std::time::Duration;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderType {
    /// OpenAI Completions 互換
    #[default]
    OpenAi,
    /// Echo（API を呼ばない）
    Echo,
}

impl ProviderType {
    /// API キーが必要か
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAi)
    }
}

impl std::str::FromStr for ProviderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(Self::OpenAi),
            "echo" => Ok(Self::Echo),
            other => Err(Error::invalid_argument(format!(
                "Unknown provider '{}' (expected: openai, echo)",
                other
            ))),
        }
    }
}

/// プロバイダ構築に必要な設定（起動時に一度だけ解決したもの）
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: ProviderType,
    pub endpoint: Option<String>,
    pub api_key: Option<ApiKey>,
    pub timeout: Option<Duration>,
}

/// プロバイダを作成
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn CompletionProvider>, Error> {
    match config.provider {
        ProviderType::OpenAi => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| Error::config("API key is required for the openai provider"))?;
            Ok(Box::new(OpenAiCompletionsProvider::new(
                config.endpoint.clone(),
                api_key,
                config.timeout,
            )?))
        }
        ProviderType::Echo => Ok(Box::new(EchoProvider::new())),
    }
}
