//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! OpenAI と Groq の両方をこの実装で扱う。構造化出力は function calling で行い、
//! 応答スキーマを関数の parameters として渡して tool_choice で呼び出しを強制する。

use crate::error::Error;
use crate::llm::factory::ProviderType;
use crate::llm::provider::{FunctionDef, LlmProvider, Message, ToolCallSpec};
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

const DEFAULT_TEMPERATURE: f64 = 0.0;
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    provider_type: ProviderType,
    model: String,
    base_url: String,
    api_key: String,
    temperature: f64,
    client: reqwest::blocking::Client,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `model` - モデル名（None のときプロバイダ既定）
    /// * `base_url` - ベース URL（None のときプロバイダ既定）
    /// * `api_key_env` - API キーを読む環境変数名（None のときプロバイダ既定）
    /// * `temperature` - 温度（None のとき 0.0）
    /// * `timeout_secs` - HTTP タイムアウト秒（None のとき 120）
    pub fn new(
        provider_type: ProviderType,
        model: Option<String>,
        base_url: Option<String>,
        api_key_env: Option<String>,
        temperature: Option<f32>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, Error> {
        let key_env = api_key_env.unwrap_or_else(|| provider_type.default_api_key_env().to_string());
        let api_key = env::var(&key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::env(format!("{} environment variable is not set", key_env)))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)))
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(
            provider_type,
            model,
            base_url,
            api_key,
            temperature,
            client,
        ))
    }

    fn with_client(
        provider_type: ProviderType,
        model: Option<String>,
        base_url: Option<String>,
        api_key: String,
        temperature: Option<f32>,
        client: reqwest::blocking::Client,
    ) -> Self {
        let model = model.unwrap_or_else(|| provider_type.default_model().to_string());
        let base_url = base_url
            .unwrap_or_else(|| provider_type.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();
        let temperature = temperature.map(f64::from).unwrap_or(DEFAULT_TEMPERATURE);
        Self {
            provider_type,
            model,
            base_url,
            api_key,
            temperature,
            client,
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn parse_json(response_json: &str) -> Result<Value, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::http(format!("Failed to parse response JSON: {}", e)))?;
        // 互換サーバには成功応答でも "error": null を含めるものがある
        if let Some(err) = v.get("error").filter(|e| !e.is_null()) {
            let msg = err["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("API error: {}", msg)));
        }
        Ok(v)
    }
}

fn message_to_json(msg: &Message) -> Value {
    match msg.role.as_str() {
        "tool" => json!({
            "role": "tool",
            "content": msg.content,
            "tool_call_id": msg.tool_call_id.as_deref().unwrap_or("")
        }),
        "assistant" => match msg.tool_calls {
            Some(ref calls) => {
                let tool_calls: Vec<Value> = calls
                    .iter()
                    .map(|tc| {
                        json!({
                            "id": tc.id,
                            "type": "function",
                            "function": {
                                "name": tc.name,
                                "arguments": tc.arguments
                            }
                        })
                    })
                    .collect();
                json!({
                    "role": "assistant",
                    "content": msg.content,
                    "tool_calls": tool_calls
                })
            }
            None => json!({ "role": "assistant", "content": msg.content }),
        },
        role => json!({ "role": role, "content": msg.content }),
    }
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        self.provider_type.as_str()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn make_request_payload(
        &self,
        messages: &[Message],
        function: Option<&FunctionDef>,
    ) -> Result<Value, Error> {
        if messages.is_empty() {
            return Err(Error::invalid_argument("No messages to send"));
        }
        let messages: Vec<Value> = messages.iter().map(message_to_json).collect();

        let mut payload = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "stream": false
        });

        if let Some(f) = function {
            payload["tools"] = json!([{
                "type": "function",
                "function": {
                    "name": f.name,
                    "description": f.description,
                    "parameters": f.parameters
                }
            }]);
            payload["tool_choice"] = json!({
                "type": "function",
                "function": { "name": f.name }
            });
        }

        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // エラーレスポンスを解析してメッセージを抽出
            let error_msg = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
            return Err(Error::http(format!(
                "{} chat completions error: {}",
                self.name(),
                error_msg
            )));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v = Self::parse_json(response_json)?;
        let text = v["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string());
        Ok(text)
    }

    fn parse_tool_call(&self, response_json: &str) -> Result<Option<ToolCallSpec>, Error> {
        let v = Self::parse_json(response_json)?;
        let call = &v["choices"][0]["message"]["tool_calls"][0];
        if call.is_null() {
            return Ok(None);
        }
        // arguments は通常 JSON 文字列だが、オブジェクトで返す互換実装もある
        let arguments = match &call["function"]["arguments"] {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        Ok(Some(ToolCallSpec {
            id: call["id"].as_str().unwrap_or("call_0").to_string(),
            name: call["function"]["name"].as_str().unwrap_or("").to_string(),
            arguments,
        }))
    }
}
