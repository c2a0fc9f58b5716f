//! 評価対象の文書と入力元

use std::path::PathBuf;

/// 評価対象の戦略文書（プロバイダに user メッセージとしてそのまま送る本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document(String);

impl Document {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// 空白のみの文書は評価できない
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::ops::Deref for Document {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 文書の読み込み元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// 位置引数から決める（省略または "-" は標準入力）
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => Self::Stdin,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }

    /// ログ用の表示名
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_string(),
            Self::File(p) => p.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_document() {
        assert!(Document::new("").is_blank());
        assert!(Document::new(" \n\t ").is_blank());
        assert!(!Document::new("Strategic Partnership Proposal").is_blank());
    }

    #[test]
    fn test_input_source_from_arg() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(InputSource::from_arg(Some("-")), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some("plan.txt")),
            InputSource::File(PathBuf::from("plan.txt"))
        );
        assert_eq!(InputSource::from_arg(Some("plan.txt")).label(), "plan.txt");
    }
}
