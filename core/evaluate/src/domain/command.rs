//! evaluate コマンドの enum（Command Pattern）

use crate::domain::InputSource;
use common::domain::{ModelName, ProviderName};

/// プロバイダ・モデルの選択（CLI 指定。未指定は profiles.json の値を使う）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSelection {
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub max_attempts: Option<u32>,
}

/// evaluate の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluateCommand {
    /// ヘルプ表示
    Help,
    /// プロファイル一覧表示
    ListProfiles,
    /// 応答スキーマ（JSON Schema）を表示して終了。ネットワークは使わない
    PrintSchema,
    /// 文書を評価して結果を表示
    Evaluate {
        input: InputSource,
        selection: ModelSelection,
        system: Option<String>,
        compact: bool,
    },
}
