//! profiles.json の読み込みとプロバイダ解決

use crate::domain::ProviderName;
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderTypeKind};
use crate::llm::factory::ProviderType;
use crate::ports::outbound::{EnvResolver, FileSystem};

/// プロファイル未指定・default_provider 未設定のときに使うプロバイダ
pub const DEFAULT_PROVIDER: &str = "openai";

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProvider {
    /// 解決に使ったプロファイル名（例: "openai", "fast"）。ログ・エラー表示用
    pub profile_name: String,
    pub provider_type: ProviderType,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub max_attempts: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl ResolvedProvider {
    fn builtin(name: &str, provider_type: ProviderType) -> Self {
        Self {
            profile_name: name.to_string(),
            provider_type,
            base_url: None,
            model: None,
            api_key_env: None,
            temperature: None,
            max_attempts: None,
            timeout_secs: None,
        }
    }

    /// 実際に使うモデル名（未指定ならプロバイダ既定）
    pub fn effective_model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider_type.default_model())
    }
}

/// profiles.json を読み込む。ファイルが無ければ Ok(None)、JSON が壊れていれば Err（メッセージにパス含める）
pub fn load_profiles_config(
    fs: &dyn FileSystem,
    env: &dyn EnvResolver,
) -> Result<Option<ProfilesConfig>, Error> {
    let path = env.resolve_profiles_config_path()?;
    if !fs.exists(path.as_path()) {
        return Ok(None);
    }
    let contents = fs
        .read_to_string(path.as_path())
        .map_err(|e| Error::io_msg(format!("{}: {}", path.display(), e)))?;
    ProfilesConfig::parse(&contents)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
        .map(Some)
}

fn provider_type_kind_to_provider_type(k: ProviderTypeKind) -> ProviderType {
    match k {
        ProviderTypeKind::Openai => ProviderType::OpenAi,
        ProviderTypeKind::Groq => ProviderType::Groq,
    }
}

/// 利用可能なビルトインプロバイダ名
fn builtin_provider_names() -> &'static [&'static str] {
    &["openai", "gpt", "groq"]
}

/// 利用可能なプロファイル名一覧（ビルトイン + profiles.json、ソート済み）とデフォルト名
pub fn list_profiles(cfg: Option<&ProfilesConfig>) -> (Vec<String>, String) {
    let mut names: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !names.contains(k) {
                names.push(k.clone());
            }
        }
    }
    names.sort();
    let default = cfg
        .and_then(|c| c.default_provider.clone())
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
    (names, default)
}

/// 要求されたプロバイダ名（None の場合は default）と ProfilesConfig から ResolvedProvider を解決する。
/// 不明なプロバイダの場合は Error::InvalidArgument で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested.map(|r| r.as_ref()).unwrap_or_else(|| {
        cfg.and_then(|c| c.default_provider.as_deref())
            .unwrap_or(DEFAULT_PROVIDER)
    });

    // 1) cfg.providers に名前があればそれを優先
    if let Some(profile) = cfg.and_then(|c| c.providers.get(effective_name)) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type: provider_type_kind_to_provider_type(profile.type_),
            base_url: profile.base_url.clone(),
            model: profile.model.clone(),
            api_key_env: profile.api_key_env.clone(),
            temperature: profile.temperature,
            max_attempts: profile.max_attempts,
            timeout_secs: profile.timeout_secs,
        });
    }

    // 2) ビルトイン (ProviderType::from_str) を試す
    if let Some(provider_type) = ProviderType::from_str(effective_name) {
        return Ok(ResolvedProvider::builtin(effective_name, provider_type));
    }

    // 3) どれも無ければ usage エラー
    let (available, _) = list_profiles(cfg);
    Err(Error::invalid_argument(format!(
        "Unknown provider: '{}'. Available: {}",
        effective_name,
        available.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HomeDir;
    use crate::llm::config::ProviderProfile;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn profile(type_: ProviderTypeKind) -> ProviderProfile {
        ProviderProfile {
            type_,
            base_url: None,
            model: None,
            api_key_env: None,
            temperature: None,
            max_attempts: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn test_resolve_provider_no_cfg_requested_none() {
        let r = resolve_provider(None, None).unwrap();
        assert_eq!(r.profile_name, "openai");
        assert_eq!(r.provider_type, ProviderType::OpenAi);
        assert!(r.model.is_none());
        assert_eq!(r.effective_model(), "gpt-4o");
    }

    #[test]
    fn test_resolve_provider_no_cfg_requested_groq() {
        let name = ProviderName::new("groq");
        let r = resolve_provider(Some(&name), None).unwrap();
        assert_eq!(r.provider_type, ProviderType::Groq);
        assert_eq!(r.effective_model(), "llama3-70b-8192");
    }

    #[test]
    fn test_resolve_provider_no_cfg_unknown() {
        let name = ProviderName::new("unknown_provider");
        let e = resolve_provider(Some(&name), None).unwrap_err();
        assert!(e.is_usage());
        assert!(e.to_string().contains("Unknown provider"));
        assert!(e.to_string().contains("unknown_provider"));
        assert!(e.to_string().contains("groq"));
    }

    #[test]
    fn test_resolve_provider_cfg_default_provider() {
        let mut p = profile(ProviderTypeKind::Groq);
        p.model = Some("mixtral-8x7b-32768".to_string());
        p.max_attempts = Some(3);
        p.temperature = Some(0.1);
        let cfg = ProfilesConfig {
            default_provider: Some("fast".to_string()),
            providers: HashMap::from([("fast".to_string(), p)]),
        };
        let r = resolve_provider(None, Some(&cfg)).unwrap();
        assert_eq!(r.profile_name, "fast");
        assert_eq!(r.provider_type, ProviderType::Groq);
        assert_eq!(r.effective_model(), "mixtral-8x7b-32768");
        assert_eq!(r.max_attempts, Some(3));
        assert_eq!(r.temperature, Some(0.1));
    }

    #[test]
    fn test_resolve_provider_requested_overrides_default() {
        let cfg = ProfilesConfig {
            default_provider: Some("groq".to_string()),
            providers: HashMap::new(),
        };
        let name = ProviderName::new("openai");
        let r = resolve_provider(Some(&name), Some(&cfg)).unwrap();
        assert_eq!(r.provider_type, ProviderType::OpenAi);
    }

    #[test]
    fn test_resolve_provider_unknown_lists_custom_profiles() {
        let cfg = ProfilesConfig {
            default_provider: None,
            providers: HashMap::from([("my_custom".to_string(), profile(ProviderTypeKind::Openai))]),
        };
        let name = ProviderName::new("nonexistent");
        let msg = resolve_provider(Some(&name), Some(&cfg)).unwrap_err().to_string();
        assert!(msg.contains("nonexistent"));
        assert!(msg.contains("my_custom"));
        assert!(msg.contains("openai"));
    }

    #[test]
    fn test_list_profiles_default() {
        let (names, default) = list_profiles(None);
        assert_eq!(names, vec!["gpt", "groq", "openai"]);
        assert_eq!(default, "openai");
    }

    struct TempHome(PathBuf);

    impl EnvResolver for TempHome {
        fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
            Ok(HomeDir::new(self.0.clone()))
        }
        fn resolve_log_file_path(&self) -> Result<PathBuf, Error> {
            Ok(self.0.join("evaluate.jsonl"))
        }
    }

    #[test]
    fn test_load_profiles_config_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let env = TempHome(dir.path().to_path_buf());
        let fs = crate::adapter::StdFileSystem;
        assert!(load_profiles_config(&fs, &env).unwrap().is_none());
    }

    #[test]
    fn test_load_profiles_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("profiles.json"),
            r#"{ "default_provider": "groq" }"#,
        )
        .unwrap();
        let env = TempHome(dir.path().to_path_buf());
        let fs = crate::adapter::StdFileSystem;
        let cfg = load_profiles_config(&fs, &env).unwrap().unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("groq"));
    }

    #[test]
    fn test_load_profiles_config_broken_json_names_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("profiles.json"), "{ not json").unwrap();
        let env = TempHome(dir.path().to_path_buf());
        let fs = crate::adapter::StdFileSystem;
        let err = load_profiles_config(&fs, &env).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("profiles.json"));
    }
}
