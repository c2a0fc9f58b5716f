//! エラーハンドリング
//!
//! 失敗の種類ごとに variant を分け、終了コードは `exit_code()` で一元的に決める。
//! スキーマ不適合（プロンプトを直して再実行すべき）と通信失敗（認証やネットワークを確認すべき）は
//! 呼び出し側で区別できるよう別 variant にしている。

/// 終了コード: 引数不正・環境不備（sysexits EX_USAGE）
pub const EXIT_USAGE: i32 = 64;
/// 終了コード: 応答データがスキーマに適合しない（EX_DATAERR）
pub const EXIT_DATA: i32 = 65;
/// 終了コード: I/O・通信失敗（EX_IOERR）
pub const EXIT_IO: i32 = 74;

/// エラー型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// 環境変数の不足など
    #[error("{0}")]
    Env(String),
    /// ファイル I/O
    #[error("{0}")]
    Io(String),
    /// JSON のシリアライズ／パース（設定ファイル等）
    #[error("{0}")]
    Json(String),
    /// ネットワーク・認証・プロバイダ側の失敗
    #[error("transport error: {0}")]
    Transport(String),
    /// モデル出力が宣言済みスキーマに適合しなかった（修復リトライを使い切った後）
    ///
    /// attempts は試行回数が分かる場合のみ（結果型への変換で失敗した場合は None）
    #[error("{}", schema_message(*.attempts, .errors))]
    SchemaConformance { attempts: Option<u32>, errors: Vec<String> },
}

fn schema_message(attempts: Option<u32>, errors: &[String]) -> String {
    match attempts {
        Some(n) => format!(
            "response does not conform to schema after {} attempt(s): {}",
            n,
            errors.join("; ")
        ),
        None => format!("response does not conform to schema: {}", errors.join("; ")),
    }
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn schema(attempts: u32, errors: Vec<String>) -> Self {
        Self::SchemaConformance {
            attempts: Some(attempts),
            errors,
        }
    }

    /// 検証済みの値を結果型に変換できなかった
    pub fn schema_decode(errors: Vec<String>) -> Self {
        Self::SchemaConformance {
            attempts: None,
            errors,
        }
    }

    /// usage を表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_schema_conformance(&self) -> bool {
        matches!(self, Self::SchemaConformance { .. })
    }

    /// プロセスの終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::Env(_) => EXIT_USAGE,
            Self::SchemaConformance { .. } => EXIT_DATA,
            Self::Io(_) | Self::Json(_) | Self::Transport(_) => EXIT_IO,
        }
    }
}
