//! 構造化評価の共通ライブラリ
//!
//! `evaluate` コマンドから使う機能を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Outbound ポート
pub mod ports;

/// 標準アダプター
pub mod adapter;

/// 宣言的な応答スキーマと検証
pub mod schema;

/// LLMドライバーとプロバイダ
pub mod llm;
