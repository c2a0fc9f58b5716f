//! プロバイダファクトリー
//!
//! プロバイダタイプと解決済みプロファイルから適切なプロバイダを作成します。

use crate::error::Error;
use crate::llm::openai_compat::OpenAiCompatProvider;
use crate::llm::resolver::ResolvedProvider;

/// プロバイダタイプ
///
/// どちらも Chat Completions 互換 API を話すため、実装は OpenAiCompatProvider を共有し
/// 既定値（ベース URL・モデル・API キーの環境変数）だけが異なる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// OpenAI
    OpenAi,
    /// Groq（OpenAI 互換エンドポイント）
    Groq,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Some(Self::OpenAi),
            "groq" => Some(Self::Groq),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Groq => "groq",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Groq => "https://api.groq.com/openai/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o",
            Self::Groq => "llama3-70b-8192",
        }
    }

    /// API キーを読む環境変数名の既定値
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
        }
    }
}

/// 解決済みプロファイルからプロバイダを作成する
///
/// API キーはここで環境変数から読む。未設定なら Error::Env。
pub fn create_provider(resolved: &ResolvedProvider) -> Result<OpenAiCompatProvider, Error> {
    OpenAiCompatProvider::new(
        resolved.provider_type,
        resolved.model.clone(),
        resolved.base_url.clone(),
        resolved.api_key_env.clone(),
        resolved.temperature,
        resolved.timeout_secs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_from_str() {
        assert_eq!(ProviderType::from_str("openai"), Some(ProviderType::OpenAi));
        assert_eq!(ProviderType::from_str("OpenAI"), Some(ProviderType::OpenAi));
        assert_eq!(ProviderType::from_str("gpt"), Some(ProviderType::OpenAi));
        assert_eq!(ProviderType::from_str("groq"), Some(ProviderType::Groq));
        assert_eq!(ProviderType::from_str("GROQ"), Some(ProviderType::Groq));
        assert_eq!(ProviderType::from_str("gemini"), None);
    }

    #[test]
    fn test_provider_type_as_str() {
        assert_eq!(ProviderType::OpenAi.as_str(), "openai");
        assert_eq!(ProviderType::Groq.as_str(), "groq");
    }

    #[test]
    fn test_provider_defaults() {
        assert_eq!(ProviderType::OpenAi.default_model(), "gpt-4o");
        assert_eq!(ProviderType::Groq.default_model(), "llama3-70b-8192");
        assert_eq!(ProviderType::OpenAi.default_api_key_env(), "OPENAI_API_KEY");
        assert_eq!(ProviderType::Groq.default_api_key_env(), "GROQ_API_KEY");
        assert!(ProviderType::Groq.default_base_url().starts_with("https://api.groq.com"));
    }

    #[test]
    fn test_create_provider_missing_key_is_env_error() {
        let resolved = ResolvedProvider {
            profile_name: "local".to_string(),
            provider_type: ProviderType::OpenAi,
            base_url: None,
            model: None,
            api_key_env: Some("EVALUATE_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            temperature: None,
            max_attempts: None,
            timeout_secs: None,
        };
        let err = create_provider(&resolved).err().expect("expected Err");
        assert!(matches!(err, Error::Env(_)));
        assert!(err.to_string().contains("EVALUATE_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
