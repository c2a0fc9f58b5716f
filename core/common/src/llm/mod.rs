//! LLMドライバーとプロバイダの実装
//!
//! OpenAI と Groq（どちらも Chat Completions 互換）で共通する処理を提供します。

pub mod config;
pub mod driver;
pub mod factory;
pub mod openai_compat;
pub mod provider;
pub mod resolver;

pub use config::ProfilesConfig;
pub use driver::{StructuredDriver, DEFAULT_MAX_ATTEMPTS};
pub use factory::{create_provider, ProviderType};
pub use openai_compat::OpenAiCompatProvider;
pub use provider::{FunctionDef, LlmProvider, Message, ToolCallSpec};
pub use resolver::{list_profiles, load_profiles_config, resolve_provider, ResolvedProvider};
