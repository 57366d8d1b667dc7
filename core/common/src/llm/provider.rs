//! 補完プロバイダのトレイト定義

use crate::error::Error;
use serde_json::{json, Value};

/// 補完プロバイダのトレイト
///
/// 各プロバイダ（OpenAI 互換 API、Echo など）はこのトレイトを実装する必要があります。
pub trait CompletionProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `prompt` - ユーザーが入力したプロンプト
    /// * `max_tokens` - 生成トークン数の上限
    fn make_request_payload(&self, prompt: &str, max_tokens: u32) -> Value {
        json!({
            "prompt": prompt,
            "max_tokens": max_tokens,
        })
    }

    /// HTTP リクエストを実行してレスポンス本文を取得
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンス JSON 文字列
    /// * `Err(Error::HttpStatus)` - 成功以外のステータス（本文はそのまま）
    /// * `Err(Error::Http)` - 通信失敗
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスから最初の choice のテキストを抽出
    fn parse_response_text(&self, response_json: &str) -> Result<String, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Error parsing response: {}", e)))?;
        extract_first_choice_text(&v)
    }
}

/// `choices[0].text` を取り出す。choices が無い・空・text が文字列でない場合は Extraction エラー。
pub fn extract_first_choice_text(v: &Value) -> Result<String, Error> {
    let choices = v
        .get("choices")
        .and_then(Value::as_array)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| {
            Error::extraction("Error extracting generated text from response: no choices")
        })?;
    choices[0]
        .get("text")
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or_else(|| {
            Error::extraction("Error extracting generated text from response: first choice has no text")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text() {
        let v = json!({"choices": [{"text": " world"}, {"text": "ignored"}]});
        assert_eq!(extract_first_choice_text(&v).unwrap(), " world");
    }

    #[test]
    fn test_extract_empty_choices() {
        let v = json!({"choices": []});
        let err = extract_first_choice_text(&v).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_extract_missing_choices() {
        let v = json!({"id": "cmpl-1"});
        assert!(matches!(
            extract_first_choice_text(&v),
            Err(Error::Extraction(_))
        ));
    }

    #[test]
    fn test_extract_choice_without_text() {
        let v = json!({"choices": [{"index": 0}]});
        assert!(matches!(
            extract_first_choice_text(&v),
            Err(Error::Extraction(_))
        ));
    }
}
