//! 構造化出力ドライバー
//!
//! プロバイダに依存しない共通処理: リクエスト生成 → 送信 → 引数抽出 → スキーマ検証。
//! 検証に失敗した場合は、エラー内容をモデルに返して再生成させる（max_attempts まで）。
//! 通信エラーは再試行しない。

use crate::error::Error;
use crate::llm::provider::{FunctionDef, LlmProvider, Message, ToolCallSpec};
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use crate::schema::ResponseSchema;
use serde_json::Value;
use std::sync::Arc;

/// 既定の試行回数（修復なしの 1 回のみ）
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// 構造化出力ドライバー
pub struct StructuredDriver<P: LlmProvider> {
    provider: P,
    max_attempts: u32,
    log: Arc<dyn Log>,
}

impl<P: LlmProvider> StructuredDriver<P> {
    /// 新しいドライバーを作成（max_attempts は 1 未満なら 1 に切り上げ）
    pub fn new(provider: P, max_attempts: u32, log: Arc<dyn Log>) -> Self {
        Self {
            provider,
            max_attempts: max_attempts.max(1),
            log,
        }
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// スキーマに適合する JSON 値を 1 つ生成させる
    ///
    /// # Returns
    /// * `Ok(Value)` - スキーマ検証済みの値（内容は補正しない）
    /// * `Err(Error::SchemaConformance)` - 全試行で不適合
    /// * `Err(Error::Transport)` - 通信・認証・プロバイダ側の失敗
    pub fn complete_structured(
        &self,
        user_message: &str,
        system_instruction: Option<&str>,
        schema: &ResponseSchema,
    ) -> Result<Value, Error> {
        let function = function_def(schema);
        let mut messages = Vec::new();
        if let Some(system) = system_instruction {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(user_message));

        let mut last_errors = Vec::new();
        for attempt in 1..=self.max_attempts {
            self.log_attempt(attempt);

            let payload = self.provider.make_request_payload(&messages, Some(&function))?;
            let request_json = serde_json::to_string(&payload)
                .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;
            let response_json = self.provider.make_http_request(&request_json)?;

            let (call, raw) = self.extract_arguments(&response_json)?;
            let errors = match parse_and_validate(&raw, schema) {
                Ok(value) => return Ok(value),
                Err(errors) => errors,
            };

            self.log_validation_failure(attempt, &errors);
            if attempt < self.max_attempts {
                push_repair_messages(&mut messages, call, raw, &errors);
            }
            last_errors = errors;
        }

        Err(Error::schema(self.max_attempts, last_errors))
    }

    /// 関数呼び出しの引数を取り出す。呼び出しが無い場合は本文テキストで代用する。
    fn extract_arguments(&self, response_json: &str) -> Result<(Option<ToolCallSpec>, String), Error> {
        if let Some(call) = self.provider.parse_tool_call(response_json)? {
            let raw = call.arguments.clone();
            return Ok((Some(call), raw));
        }
        let text = self.provider.parse_response_text(response_json)?.unwrap_or_default();
        Ok((None, text))
    }

    fn log_attempt(&self, attempt: u32) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "structured completion requested")
                .layer("adapter")
                .kind("llm")
                .field("provider", self.provider.name())
                .field("model", self.provider.model())
                .field("attempt", attempt)
                .field("max_attempts", self.max_attempts),
        );
    }

    fn log_validation_failure(&self, attempt: u32, errors: &[String]) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Warn, "schema validation failed")
                .layer("adapter")
                .kind("llm")
                .field("attempt", attempt)
                .field("errors", errors.to_vec()),
        );
    }
}

fn function_def(schema: &ResponseSchema) -> FunctionDef {
    let description = if schema.description().is_empty() {
        format!(
            "Correctly extracted `{}` with all the required parameters with correct types",
            schema.name()
        )
    } else {
        schema.description().to_string()
    };
    FunctionDef {
        name: schema.name().to_string(),
        description,
        parameters: schema.json_schema().clone(),
    }
}

/// ```json ... ``` で囲まれていれば中身だけを取り出す
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// 生の引数文字列を JSON として読み、スキーマで検証する
fn parse_and_validate(raw: &str, schema: &ResponseSchema) -> Result<Value, Vec<String>> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(vec![format!(
            "response contained neither a `{}` function call nor JSON text",
            schema.name()
        )]);
    }
    let value: Value = serde_json::from_str(body)
        .map_err(|e| vec![format!("arguments are not valid JSON: {}", e)])?;
    schema.validate(&value)?;
    Ok(value)
}

fn repair_message(errors: &[String]) -> String {
    format!(
        "Validation Error found:\n{}\nRecall the function correctly, fix the errors",
        errors.join("\n")
    )
}

fn push_repair_messages(
    messages: &mut Vec<Message>,
    call: Option<ToolCallSpec>,
    raw: String,
    errors: &[String],
) {
    match call {
        Some(call) => {
            let call_id = call.id.clone();
            messages.push(Message::assistant_with_tool_call("", call));
            messages.push(Message::tool_result(call_id, repair_message(errors)));
        }
        None => {
            messages.push(Message::assistant(raw));
            messages.push(Message::user(repair_message(errors)));
        }
    }
}
