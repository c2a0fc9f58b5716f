//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリ・設定ファイル・ログファイルの場所を環境変数から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. EVALUATE_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/evaluate（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/evaluate
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// プロバイダプロファイル設定ファイルのパス（resolve_home_dir() 直下の profiles.json）
    fn resolve_profiles_config_path(&self) -> Result<PathBuf, Error> {
        Ok(self.resolve_home_dir()?.join("profiles.json"))
    }

    /// JSONL ログの出力先。EVALUATE_LOG_FILE があればそれ、なければ <home>/logs/evaluate.jsonl
    fn resolve_log_file_path(&self) -> Result<PathBuf, Error>;
}
