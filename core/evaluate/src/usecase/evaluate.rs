//! 戦略評価のユースケース
//!
//! 文書 1 件 → 構造化出力 1 回 → StrategyEvaluation。値はモデルが返したものを補正せずに渡す。

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use common::schema::ResponseSchema;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::domain::{
    strategy_evaluation_schema, Document, InputSource, ModelSelection, ScoreConsistency,
    StrategyEvaluation,
};
use crate::ports::outbound::{DocumentReader, ProfileLister, StructuredCompletion};

/// 評価 1 回分の指定
#[derive(Debug, Clone, Default)]
pub struct EvaluateOptions {
    pub selection: ModelSelection,
    pub system: Option<String>,
}

/// evaluate のユースケース（アダプター経由で I/O を行う）
pub struct EvaluateUseCase {
    completion: Arc<dyn StructuredCompletion>,
    reader: Arc<dyn DocumentReader>,
    profile_lister: Arc<dyn ProfileLister>,
    log: Arc<dyn Log>,
    schema: ResponseSchema,
}

impl EvaluateUseCase {
    pub fn new(
        completion: Arc<dyn StructuredCompletion>,
        reader: Arc<dyn DocumentReader>,
        profile_lister: Arc<dyn ProfileLister>,
        log: Arc<dyn Log>,
    ) -> Result<Self, Error> {
        Ok(Self {
            completion,
            reader,
            profile_lister,
            log,
            schema: ResponseSchema::new(strategy_evaluation_schema())?,
        })
    }

    /// 応答スキーマ（JSON Schema）
    pub fn json_schema(&self) -> &Value {
        self.schema.json_schema()
    }

    pub fn list_profiles(&self) -> Result<(Vec<String>, String), Error> {
        self.profile_lister.list_profiles()
    }

    pub fn read_document(&self, source: &InputSource) -> Result<Document, Error> {
        let document = self.reader.read(source)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "document read")
                .layer("usecase")
                .kind("input")
                .field("source", source.label())
                .field("bytes", document.len()),
        );
        Ok(document)
    }

    /// 文書を評価する
    ///
    /// # Returns
    /// * `Err(Error::InvalidArgument)` - 文書が空（プロバイダは呼ばない）
    /// * `Err(Error::SchemaConformance)` - 応答がスキーマ・型に適合しない
    /// * `Err(Error::Transport)` - 通信・認証・プロバイダ側の失敗
    pub fn evaluate(
        &self,
        document: &Document,
        options: &EvaluateOptions,
    ) -> Result<StrategyEvaluation, Error> {
        if document.is_blank() {
            return Err(Error::invalid_argument(
                "Document is empty. Pass a file path or pipe the strategy text to stdin.",
            ));
        }

        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "evaluation requested")
                .layer("usecase")
                .kind("evaluate")
                .field("document_chars", document.chars().count())
                .field("system_instruction", options.system.is_some()),
        );

        let value = self.completion.complete(
            &options.selection,
            options.system.as_deref(),
            document,
            &self.schema,
        )?;
        let evaluation: StrategyEvaluation = serde_json::from_value(value)
            .map_err(|e| Error::schema_decode(vec![format!("response does not match StrategyEvaluation: {}", e)]))?;

        self.log_consistency(&evaluation.consistency());
        Ok(evaluation)
    }

    fn log_consistency(&self, c: &ScoreConsistency) {
        let level = if c.is_consistent() {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        let _ = self.log.log(
            &LogRecord::new(level, "evaluation consistency")
                .layer("usecase")
                .kind("consistency")
                .field("expected_score_count", c.expected_score_count)
                .field("actual_score_count", c.actual_score_count)
                .field("computed_mean", c.computed_mean)
                .field("declared_overall", c.declared_overall),
        );
    }
}

/// 4 スペースインデントの JSON に整形する
pub fn render_pretty<T: Serialize>(value: &T) -> Result<String, Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| Error::json(format!("Failed to serialize output: {}", e)))?;
    String::from_utf8(buf).map_err(|e| Error::json(format!("Output is not UTF-8: {}", e)))
}

/// 1 行 JSON に整形する（--compact）
pub fn render_compact<T: Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| Error::json(format!("Failed to serialize output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_pretty_uses_four_space_indent() {
        let out = render_pretty(&json!({ "scores": [1], "title": "t" })).unwrap();
        assert_eq!(out, "{\n    \"scores\": [\n        1\n    ],\n    \"title\": \"t\"\n}");
    }

    #[test]
    fn test_render_compact_is_single_line() {
        let out = render_compact(&json!({ "title": "t", "overall_score": 4.2 })).unwrap();
        assert!(!out.contains('\n'));
        assert!(out.contains("\"overall_score\":4.2"));
    }
}
