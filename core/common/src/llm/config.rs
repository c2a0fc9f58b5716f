//! profiles.json 用の設定型
//!
//! プロバイダ名から ProviderType とオプション（base_url / model / api_key_env / temperature /
//! max_attempts / timeout_secs）を解決するための構造体。

use serde::Deserialize;
use std::collections::HashMap;

/// profiles.json のルート
#[derive(Debug, Clone, Default)]
pub struct ProfilesConfig {
    /// 未指定時に使うプロバイダ名
    pub default_provider: Option<String>,
    /// プロバイダ名 -> プロファイル
    pub providers: HashMap<String, ProviderProfile>,
}

/// 1 プロバイダ分の設定
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// プロバイダ種別: openai | groq
    pub type_: ProviderTypeKind,
    /// API のベース URL（省略時は各プロバイダのデフォルト）
    pub base_url: Option<String>,
    /// モデル名（省略時は各プロバイダのデフォルト）
    pub model: Option<String>,
    /// API キーを読む環境変数名（省略時は各プロバイダのデフォルト）
    pub api_key_env: Option<String>,
    /// 温度（省略時は 0.0）
    pub temperature: Option<f32>,
    /// スキーマ不適合時の試行回数上限（省略時は 1）
    pub max_attempts: Option<u32>,
    /// HTTP タイムアウト秒
    pub timeout_secs: Option<u64>,
}

/// JSON の "type" で使うプロバイダ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderTypeKind {
    Openai,
    Groq,
}

/// serde 用の内部構造（type が予約語のため）
#[derive(Debug, Deserialize)]
struct ProfilesConfigRaw {
    #[serde(alias = "default")]
    default_provider: Option<String>,
    providers: Option<HashMap<String, ProviderProfileRaw>>,
}

#[derive(Debug, Deserialize)]
struct ProviderProfileRaw {
    #[serde(rename = "type", alias = "provider")]
    type_: ProviderTypeKindSerde,
    base_url: Option<String>,
    #[serde(alias = "default_model")]
    model: Option<String>,
    api_key_env: Option<String>,
    temperature: Option<f32>,
    #[serde(alias = "max_retries")]
    max_attempts: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ProviderTypeKindSerde {
    #[serde(alias = "gpt")]
    Openai,
    Groq,
}

impl From<ProviderTypeKindSerde> for ProviderTypeKind {
    fn from(s: ProviderTypeKindSerde) -> Self {
        match s {
            ProviderTypeKindSerde::Openai => ProviderTypeKind::Openai,
            ProviderTypeKindSerde::Groq => ProviderTypeKind::Groq,
        }
    }
}

impl ProfilesConfig {
    /// JSON 文字列からパース（ファイル読みは resolver で行う）
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: ProfilesConfigRaw = serde_json::from_str(json)?;
        let providers = raw
            .providers
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, v.into()))
            .collect();
        Ok(ProfilesConfig {
            default_provider: raw.default_provider,
            providers,
        })
    }
}

impl From<ProviderProfileRaw> for ProviderProfile {
    fn from(r: ProviderProfileRaw) -> Self {
        ProviderProfile {
            type_: r.type_.into(),
            base_url: r.base_url,
            model: r.model,
            api_key_env: r.api_key_env,
            temperature: r.temperature,
            max_attempts: r.max_attempts,
            timeout_secs: r.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object() {
        let cfg = ProfilesConfig::parse("{}").unwrap();
        assert!(cfg.default_provider.is_none());
        assert!(cfg.providers.is_empty());
    }

    #[test]
    fn test_parse_default_provider_and_providers() {
        let json = r#"
        {
            "default_provider": "fast",
            "providers": {
                "fast": { "type": "groq", "model": "llama3-8b-8192", "max_attempts": 3 },
                "careful": { "type": "openai", "api_key_env": "MY_OPENAI_KEY", "timeout_secs": 30 },
                "local": { "type": "openai", "base_url": "http://localhost:8080/v1", "temperature": 0.2 }
            }
        }
        "#;
        let cfg = ProfilesConfig::parse(json).unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("fast"));
        assert_eq!(cfg.providers.len(), 3);

        let f = cfg.providers.get("fast").unwrap();
        assert!(matches!(f.type_, ProviderTypeKind::Groq));
        assert_eq!(f.model.as_deref(), Some("llama3-8b-8192"));
        assert_eq!(f.max_attempts, Some(3));

        let c = cfg.providers.get("careful").unwrap();
        assert!(matches!(c.type_, ProviderTypeKind::Openai));
        assert_eq!(c.api_key_env.as_deref(), Some("MY_OPENAI_KEY"));
        assert_eq!(c.timeout_secs, Some(30));

        let l = cfg.providers.get("local").unwrap();
        assert_eq!(l.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(l.temperature, Some(0.2));
    }

    #[test]
    fn test_parse_aliases() {
        let json = r#"
        {
            "default": "x",
            "providers": {
                "x": { "provider": "gpt", "default_model": "gpt-4o-mini", "max_retries": 2 }
            }
        }
        "#;
        let cfg = ProfilesConfig::parse(json).unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("x"));
        let p = cfg.providers.get("x").unwrap();
        assert!(matches!(p.type_, ProviderTypeKind::Openai));
        assert_eq!(p.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(p.max_attempts, Some(2));
    }

    #[test]
    fn test_parse_unknown_type_is_error() {
        let json = r#"{ "providers": { "x": { "type": "gemini" } } }"#;
        assert!(ProfilesConfig::parse(json).is_err());
    }
}
