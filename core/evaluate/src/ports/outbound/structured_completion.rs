//! 構造化出力の Outbound ポート
//!
//! usecase はプロバイダ解決や HTTP を知らず、この trait 経由でスキーマ適合済みの JSON 値だけを受け取る。

use crate::domain::ModelSelection;
use common::error::Error;
use common::schema::ResponseSchema;
use serde_json::Value;

/// 文書 1 件に対してスキーマ適合の値を 1 つ生成させる
pub trait StructuredCompletion: Send + Sync {
    /// # Returns
    /// * `Ok(Value)` - スキーマ検証済みの値
    /// * `Err(Error::SchemaConformance)` - 試行回数内に適合しなかった
    /// * `Err(Error::Transport)` - 通信失敗、認証拒否（HTTP 401 等）、プロバイダ側のエラー
    /// * `Err(Error::Env)` - 資格情報が無い（API キーの環境変数が未設定）。リクエストは送っていない
    /// * `Err(Error::InvalidArgument)` / `Err(Error::Json)` - 不明なプロファイル、profiles.json の不備
    fn complete(
        &self,
        selection: &ModelSelection,
        system_instruction: Option<&str>,
        user_message: &str,
        schema: &ResponseSchema,
    ) -> Result<Value, Error>;
}
