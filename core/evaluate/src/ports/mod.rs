//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（LLM・文書入力・プロファイル設定）を使うための trait

pub mod inbound;
pub mod outbound;
