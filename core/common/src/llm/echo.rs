//! Echo プロバイダの実装
//!
//! 実際の API を呼ばず、プロンプトをそのまま補完として返します。
//! オフラインでの動作確認やテスト用に使用します。

use crate::error::Error;
use crate::llm::provider::CompletionProvider;
use serde_json::{json, Value};

/// Echo プロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しい Echo プロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl CompletionProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let request: Value = serde_json::from_str(request_json)
            .map_err(|e| Error::json(format!("Error parsing request: {}", e)))?;
        let prompt = request["prompt"].as_str().unwrap_or_default();
        // 本物の API と同じ形で返し、応答解析の経路を通す
        Ok(json!({
            "choices": [{ "text": format!(" [echo] {}", prompt), "index": 0 }]
        })
        .to_string())
    }
}
