//! OpenAI Completions 互換 (/completions) プロバイダ
//!
//! エンドポイント URL を丸ごと指定する。API キーは構築時に受け取り、Bearer で送る。

use crate::domain::ApiKey;
use crate::error::Error;
use crate::llm::provider::CompletionProvider;
use reqwest::blocking::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://api.openai.com/v1/engines/text-davinci-003/completions";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI Completions 互換プロバイダ
pub struct OpenAiCompletionsProvider {
    endpoint: String,
    api_key: ApiKey,
    client: Client,
}

impl OpenAiCompletionsProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `endpoint` - 補完エンドポイント URL（None のとき DEFAULT_ENDPOINT）
    /// * `api_key` - Authorization ヘッダに載せる API キー
    /// * `timeout` - リクエスト全体のタイムアウト（None のとき DEFAULT_TIMEOUT）
    pub fn new(
        endpoint: Option<String>,
        api_key: ApiKey,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key,
            client,
        })
    }

    /// HTTP クライアントを差し替える（プロキシ設定など）
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

impl CompletionProvider for OpenAiCompletionsProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("Error sending request: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Error reading response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::http_status(status.as_u16(), response_text));
        }

        Ok(response_text)
    }
}
