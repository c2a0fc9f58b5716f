//! 文書読み込みの Outbound ポート

use crate::domain::{Document, InputSource};
use common::error::Error;

/// ファイルまたは標準入力から文書本文を読む
pub trait DocumentReader: Send + Sync {
    fn read(&self, source: &InputSource) -> Result<Document, Error>;
}
