//! 構造化出力アダプタ（profiles.json → プロバイダ生成 → StructuredDriver）
//!
//! プロバイダは呼び出しごとに解決する。--print-schema や -L ではプロファイルも API キーも読まない。

use std::sync::Arc;

use common::error::Error;
use common::llm::{
    create_provider, load_profiles_config, resolve_provider, StructuredDriver, DEFAULT_MAX_ATTEMPTS,
};
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel, LogRecord};
use common::schema::ResponseSchema;
use serde_json::Value;

use crate::domain::ModelSelection;
use crate::ports::outbound::StructuredCompletion;

/// 標準の構造化出力アダプタ
pub struct StdStructuredCompletion {
    fs: Arc<dyn FileSystem>,
    env_resolver: Arc<dyn EnvResolver>,
    log: Arc<dyn Log>,
}

impl StdStructuredCompletion {
    pub fn new(fs: Arc<dyn FileSystem>, env_resolver: Arc<dyn EnvResolver>, log: Arc<dyn Log>) -> Self {
        Self {
            fs,
            env_resolver,
            log,
        }
    }
}

impl StructuredCompletion for StdStructuredCompletion {
    fn complete(
        &self,
        selection: &ModelSelection,
        system_instruction: Option<&str>,
        user_message: &str,
        schema: &ResponseSchema,
    ) -> Result<Value, Error> {
        let cfg_opt = load_profiles_config(self.fs.as_ref(), self.env_resolver.as_ref())?;
        let mut resolved = resolve_provider(selection.profile.as_ref(), cfg_opt.as_ref())?;
        // CLI 指定はプロファイルの値より優先
        if let Some(model) = &selection.model {
            resolved.model = Some(model.to_string());
        }
        let max_attempts = selection
            .max_attempts
            .or(resolved.max_attempts)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "provider resolved")
                .layer("adapter")
                .kind("llm")
                .field("profile", resolved.profile_name.as_str())
                .field("provider", resolved.provider_type.as_str())
                .field("model", resolved.effective_model())
                .field("max_attempts", max_attempts),
        );

        let provider = create_provider(&resolved)?;
        let driver = StructuredDriver::new(provider, max_attempts, Arc::clone(&self.log));
        driver.complete_structured(user_message, system_instruction, schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::{NoopLog, StdFileSystem};
    use common::domain::{HomeDir, ProviderName};
    use common::schema::{FieldKind, ObjectSchema};
    use std::path::PathBuf;

    struct TempHome(PathBuf);

    impl EnvResolver for TempHome {
        fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
            Ok(HomeDir::new(self.0.clone()))
        }
        fn resolve_log_file_path(&self) -> Result<PathBuf, Error> {
            Ok(self.0.join("logs/evaluate.jsonl"))
        }
    }

    fn adapter(home: &std::path::Path) -> StdStructuredCompletion {
        StdStructuredCompletion::new(
            Arc::new(StdFileSystem),
            Arc::new(TempHome(home.to_path_buf())),
            Arc::new(NoopLog),
        )
    }

    fn schema() -> ResponseSchema {
        ResponseSchema::new(ObjectSchema::new("Report", "").field("title", FieldKind::String, "Title"))
            .unwrap()
    }

    #[test]
    fn test_unknown_profile_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let selection = ModelSelection {
            profile: Some(ProviderName::new("nope")),
            ..Default::default()
        };
        let err = adapter(dir.path())
            .complete(&selection, None, "doc", &schema())
            .unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("groq"));
    }

    #[test]
    fn test_missing_api_key_env_is_env_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("profiles.json"),
            r#"{"providers": {"local": {"type": "openai", "api_key_env": "EVALUATE_TEST_KEY_THAT_IS_NEVER_SET"}}}"#,
        )
        .unwrap();
        let selection = ModelSelection {
            profile: Some(ProviderName::new("local")),
            ..Default::default()
        };
        let err = adapter(dir.path())
            .complete(&selection, None, "doc", &schema())
            .unwrap_err();
        assert!(matches!(err, Error::Env(_)), "{:?}", err);
        assert!(err.to_string().contains("EVALUATE_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_malformed_profiles_json_names_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("profiles.json"), "{ not json").unwrap();
        let err = adapter(dir.path())
            .complete(&ModelSelection::default(), None, "doc", &schema())
            .unwrap_err();
        assert!(err.to_string().contains("profiles.json"));
    }
}
