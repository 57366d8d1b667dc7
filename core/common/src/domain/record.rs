//! プロンプトと補完の組（Record）

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// 1 回の対話で得たプロンプトと補完。キー順は prompt → completions で固定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub prompt: String,
    pub completions: String,
}

impl Record {
    pub fn new(prompt: impl Into<String>, completions: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            completions: completions.into(),
        }
    }

    /// 2 スペースインデントの JSON
    pub fn to_pretty_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::json(format!("Failed to serialize record: {}", e)))
    }

    /// 1 行の JSON（JSONL 用）
    pub fn to_json_line(&self) -> Result<String, Error> {
        serde_json::to_string(self)
            .map_err(|e| Error::json(format!("Failed to serialize record: {}", e)))
    }

    /// pc/pcN.json に書く人間向けの結合テキスト
    pub fn combined_text(&self) -> String {
        format!("Prompt: {}\n\nCompletions: {}", self.prompt, self.completions)
    }
}
