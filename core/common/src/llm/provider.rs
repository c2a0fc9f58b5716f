//! LLMプロバイダのトレイト定義

use crate::error::Error;
use serde_json::Value;

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（OpenAI、Groq など）はこのトレイトを実装する。
/// テストでは固定応答を返す Stub を実装して差し替える。
pub trait LlmProvider {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストに使うモデル名
    fn model(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `messages` - 送信するメッセージ列（system / user / assistant / tool）
    /// * `function` - 呼び出しを強制する関数（構造化出力用。None なら通常の完了）
    fn make_request_payload(
        &self,
        messages: &[Message],
        function: Option<&FunctionDef>,
    ) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンスを取得
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンスJSON文字列
    /// * `Err(Error::Transport)` - 接続・認証・プロバイダ側の失敗
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキストを抽出（存在しない場合は None）
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error>;

    /// レスポンスから最初のツール呼び出しを取り出す（存在しない場合は None）
    fn parse_tool_call(&self, response_json: &str) -> Result<Option<ToolCallSpec>, Error>;
}

/// 呼び出しを強制する関数の定義（parameters は JSON Schema）
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// ツール呼び出し1件。arguments はモデルが返した生の JSON 文字列（壊れている可能性あり）
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallSpec {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// メッセージ構造体（user / assistant / tool と tool_calls 対応）
#[derive(Debug, Clone)]
pub struct Message {
    pub role: String,
    pub content: String,
    /// assistant がツールを呼んだ場合
    pub tool_calls: Option<Vec<ToolCallSpec>>,
    /// role が "tool" のとき、どの call_id への返答か
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// ツール呼び出し付き assistant（content は空でも可）
    pub fn assistant_with_tool_call(content: impl Into<String>, call: ToolCallSpec) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            tool_calls: Some(vec![call]),
            tool_call_id: None,
        }
    }

    /// ツール結果（role = "tool"）
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
            tool_calls: None,
            tool_call_id: Some(call_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_new() {
        let msg = Message::new("user", "Hello");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "Hello");
        assert!(msg.tool_calls.is_none());
    }

    #[test]
    fn test_message_system() {
        let msg = Message::system("Be strict");
        assert_eq!(msg.role, "system");
    }

    #[test]
    fn test_message_with_multiline_content() {
        let content = "Line 1\nLine 2\nLine 3";
        let msg = Message::user(content);
        assert_eq!(msg.content, "Line 1\nLine 2\nLine 3");
    }

    #[test]
    fn test_message_assistant_with_tool_call() {
        let call = ToolCallSpec {
            id: "call_1".to_string(),
            name: "StrategyEvaluation".to_string(),
            arguments: "{}".to_string(),
        };
        let msg = Message::assistant_with_tool_call("", call.clone());
        assert_eq!(msg.role, "assistant");
        assert_eq!(msg.tool_calls.as_deref(), Some(&[call][..]));
    }

    #[test]
    fn test_message_tool_result() {
        let msg = Message::tool_result("call_1", "Validation Error found");
        assert_eq!(msg.role, "tool");
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
    }
}
