//! CompletionService の標準実装（CompletionProvider でリクエストを組み立てて送る）

use common::error::Error;
use common::ports::outbound::{CompletionProvider, Log, LogLevel, LogRecord};
use std::sync::Arc;

use crate::ports::outbound::CompletionService;

pub struct ProviderCompletionService {
    provider: Box<dyn CompletionProvider>,
    log: Arc<dyn Log>,
}

impl ProviderCompletionService {
    pub fn new(provider: Box<dyn CompletionProvider>, log: Arc<dyn Log>) -> Self {
        Self { provider, log }
    }
}

impl CompletionService for ProviderCompletionService {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, Error> {
        let payload = self.provider.make_request_payload(prompt, max_tokens);
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Error marshaling payload: {}", e)))?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "completion request")
                .layer("adapter")
                .kind("http")
                .field("provider", self.provider.name())
                .field("max_tokens", max_tokens),
        );

        let body = match self.provider.make_http_request(&request_json) {
            Ok(body) => body,
            Err(e) => {
                let mut rec = LogRecord::new(LogLevel::Error, "completion request failed")
                    .layer("adapter")
                    .kind("http");
                if let Error::HttpStatus { status, .. } = &e {
                    rec = rec.field("status", *status);
                }
                let _ = self.log.log(&rec);
                return Err(e);
            }
        };
        self.provider.parse_response_text(&body)
    }
}
