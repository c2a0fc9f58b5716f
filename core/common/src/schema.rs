//! 宣言的な応答スキーマ
//!
//! フィールド名 → {型, 生成指示} の表からプロバイダに渡す JSON Schema を組み立て、
//! 応答の検証もここで行う。生成指示は `description` としてプロンプトに埋め込まれるだけで、
//! 検証には使わない（検証するのはフィールドの有無と型のみ）。

use crate::error::Error;
use jsonschema::Draft;
use serde_json::{json, Map, Value};

/// 検証エラーとして返す最大件数（修復プロンプトとログが肥大化しないように）
pub const MAX_VALIDATION_ERRORS: usize = 10;

/// フィールドの型
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Number,
    Integer,
    String,
    Boolean,
    Object(ObjectSchema),
    Array(Box<FieldKind>),
}

impl FieldKind {
    pub fn array_of(inner: FieldKind) -> Self {
        Self::Array(Box::new(inner))
    }

    fn to_json_schema(&self) -> Value {
        match self {
            Self::Number => json!({ "type": "number" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::String => json!({ "type": "string" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Object(obj) => obj.to_json_schema(),
            Self::Array(inner) => json!({
                "type": "array",
                "items": inner.to_json_schema()
            }),
        }
    }
}

/// 1 フィールド分の宣言
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// 生成内容を誘導する指示文（JSON Schema の description になる）
    pub instruction: String,
}

/// オブジェクト型の宣言（フィールドは宣言順を保つ）
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    /// フィールドを追加する（ビルダー）
    pub fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        instruction: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            instruction: normalize_instruction(&instruction.into()),
        });
        self
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Draft 2020-12 のオブジェクトスキーマを生成する。
    /// 全フィールド必須・未宣言フィールド不可。ネストしたオブジェクトはインライン展開する。
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for f in &self.fields {
            let mut prop = f.kind.to_json_schema();
            if !f.instruction.is_empty() {
                prop["description"] = json!(f.instruction);
            }
            properties.insert(f.name.clone(), prop);
        }
        let required: Vec<&str> = self.field_names();
        let mut schema = json!({
            "type": "object",
            "title": self.name,
            "properties": properties,
            "required": required,
            "additionalProperties": false
        });
        if !self.description.is_empty() {
            schema["description"] = json!(self.description);
        }
        schema
    }
}

/// 指示文の各行の共通インデントと前後の空行を落とす
///
/// インデントは文字数で数える（全角スペース等のマルチバイト空白を含んでもよい）。
fn normalize_instruction(s: &str) -> String {
    let lines: Vec<&str> = s.lines().collect();
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| strip_indent(l, indent).trim_end())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// 先頭の空白を最大 n 文字まで取り除く
fn strip_indent(line: &str, n: usize) -> &str {
    let start = line
        .char_indices()
        .take_while(|(_, c)| c.is_whitespace())
        .nth(n)
        .map(|(i, _)| i)
        .unwrap_or_else(|| line.len() - line.trim_start().len());
    &line[start..]
}

/// コンパイル済みの応答スキーマ（宣言 + JSON Schema + validator）
pub struct ResponseSchema {
    root: ObjectSchema,
    json_schema: Value,
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for ResponseSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSchema")
            .field("name", &self.root.name)
            .finish()
    }
}

impl ResponseSchema {
    /// 宣言から JSON Schema を生成してコンパイルする
    pub fn new(root: ObjectSchema) -> Result<Self, Error> {
        let json_schema = root.to_json_schema();
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&json_schema)
            .map_err(|e| Error::json(format!("failed to compile response schema '{}': {}", root.name, e)))?;
        Ok(Self {
            root,
            json_schema,
            validator,
        })
    }

    /// ルート型の名前（function calling の関数名にも使う）
    pub fn name(&self) -> &str {
        &self.root.name
    }

    pub fn description(&self) -> &str {
        &self.root.description
    }

    pub fn json_schema(&self) -> &Value {
        &self.json_schema
    }

    /// 応答を検証する。不適合なら最大 MAX_VALIDATION_ERRORS 件のメッセージを返す。
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<String>> {
        if self.validator.is_valid(instance) {
            return Ok(());
        }
        let errors: Vec<String> = self
            .validator
            .iter_errors(instance)
            .take(MAX_VALIDATION_ERRORS)
            .map(|e| e.to_string())
            .collect();
        if errors.is_empty() {
            return Err(vec!["response does not match schema".to_string()]);
        }
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score() -> ObjectSchema {
        ObjectSchema::new("Score", "")
            .field("score", FieldKind::Number, "Score for the evaluation.")
            .field("explanation", FieldKind::String, "Justification.")
    }

    fn root() -> ObjectSchema {
        ObjectSchema::new("Report", "A report")
            .field("title", FieldKind::String, "Title")
            .field("scores", FieldKind::array_of(FieldKind::Object(score())), "All scores")
            .field("overall", FieldKind::Object(score()), "Overall")
    }

    #[test]
    fn test_json_schema_marks_every_field_required() {
        let s = root().to_json_schema();
        assert_eq!(s["type"], "object");
        assert_eq!(s["title"], "Report");
        assert_eq!(s["description"], "A report");
        assert_eq!(s["additionalProperties"], false);
        let required: Vec<&str> = s["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["title", "scores", "overall"]);
        assert_eq!(s["properties"]["scores"]["type"], "array");
        assert_eq!(s["properties"]["scores"]["items"]["properties"]["score"]["type"], "number");
        assert_eq!(s["properties"]["overall"]["description"], "Overall");
    }

    #[test]
    fn test_instruction_is_dedented() {
        let obj = ObjectSchema::new("X", "").field(
            "a",
            FieldKind::String,
            "\n        **Heading**\n\n        Body line.\n    ",
        );
        assert_eq!(obj.fields[0].instruction, "**Heading**\n\nBody line.");
    }

    #[test]
    fn test_instruction_with_multibyte_indent() {
        let obj = ObjectSchema::new("X", "")
            .field("a", FieldKind::String, "  one\n\u{3000}two")
            .field("b", FieldKind::String, "\u{3000}\u{3000}見出し\n\u{3000}\u{3000}  本文");
        assert_eq!(obj.fields[0].instruction, "one\ntwo");
        assert_eq!(obj.fields[1].instruction, "見出し\n  本文");
    }

    #[test]
    fn test_integer_and_boolean_fields() {
        let schema = ResponseSchema::new(
            ObjectSchema::new("Flags", "")
                .field("count", FieldKind::Integer, "")
                .field("enabled", FieldKind::Boolean, ""),
        )
        .unwrap();
        assert_eq!(schema.json_schema()["properties"]["count"]["type"], "integer");
        assert_eq!(schema.json_schema()["properties"]["enabled"]["type"], "boolean");
        assert!(schema.validate(&json!({ "count": 3, "enabled": true })).is_ok());
        assert!(schema.validate(&json!({ "count": 3.5, "enabled": true })).is_err());
        assert!(schema.validate(&json!({ "count": 3, "enabled": "yes" })).is_err());
    }

    #[test]
    fn test_validate_accepts_conforming_value() {
        let schema = ResponseSchema::new(root()).unwrap();
        let v = json!({
            "title": "t",
            "scores": [{ "score": 3, "explanation": "ok" }],
            "overall": { "score": 3.0, "explanation": "ok" }
        });
        assert!(schema.validate(&v).is_ok());
    }

    #[test]
    fn test_validate_reports_missing_field() {
        let schema = ResponseSchema::new(root()).unwrap();
        let v = json!({
            "scores": [],
            "overall": { "score": 3.0, "explanation": "ok" }
        });
        let errors = schema.validate(&v).unwrap_err();
        assert!(!errors.is_empty());
        assert!(errors.iter().any(|e| e.contains("title")), "{:?}", errors);
    }

    #[test]
    fn test_validate_reports_wrong_type_in_nested_array() {
        let schema = ResponseSchema::new(root()).unwrap();
        let v = json!({
            "title": "t",
            "scores": [{ "score": "high", "explanation": "ok" }],
            "overall": { "score": 3.0, "explanation": "ok" }
        });
        assert!(schema.validate(&v).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_field() {
        let schema = ResponseSchema::new(root()).unwrap();
        let v = json!({
            "title": "t",
            "scores": [],
            "overall": { "score": 3.0, "explanation": "ok" },
            "extra": 1
        });
        assert!(schema.validate(&v).is_err());
    }
}
