//! 文書読み込みアダプタ（ファイルは FileSystem 経由、"-" は標準入力）

use std::io::Read;
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::FileSystem;

use crate::domain::{Document, InputSource};
use crate::ports::outbound::DocumentReader;

/// 標準の文書読み込み
pub struct StdDocumentReader {
    fs: Arc<dyn FileSystem>,
}

impl StdDocumentReader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl DocumentReader for StdDocumentReader {
    fn read(&self, source: &InputSource) -> Result<Document, Error> {
        match source {
            InputSource::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| Error::io_msg(format!("Failed to read stdin: {}", e)))?;
                Ok(Document::new(buf))
            }
            InputSource::File(path) => {
                let meta = self
                    .fs
                    .metadata(path)
                    .map_err(|e| Error::io_msg(format!("{}: {}", path.display(), e)))?;
                if meta.is_dir() {
                    return Err(Error::invalid_argument(format!(
                        "{}: is a directory",
                        path.display()
                    )));
                }
                self.fs
                    .read_to_string(path)
                    .map(Document::new)
                    .map_err(|e| Error::io_msg(format!("{}: {}", path.display(), e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;

    fn reader() -> StdDocumentReader {
        StdDocumentReader::new(Arc::new(StdFileSystem))
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal.txt");
        std::fs::write(&path, "Strategic Partnership Proposal\n").unwrap();
        let doc = reader().read(&InputSource::File(path)).unwrap();
        assert_eq!(&*doc, "Strategic Partnership Proposal\n");
    }

    #[test]
    fn test_read_bundled_demo_document() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../demos/partnership_proposal.txt");
        let doc = reader().read(&InputSource::File(path)).unwrap();
        assert!(!doc.is_blank());
        assert!(doc.starts_with("Strategic Partnership Proposal"));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = reader().read(&InputSource::File(path)).unwrap_err();
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_read_directory_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = reader()
            .read(&InputSource::File(dir.path().to_path_buf()))
            .unwrap_err();
        assert!(err.is_usage());
    }
}
