//! evaluate 固有のアダプタ（Outbound ポートの実装）

pub mod document_reader;
pub mod profile_lister;
pub mod structured_completion;
pub mod stub_completion;

pub use document_reader::StdDocumentReader;
pub use profile_lister::StdProfileLister;
pub use structured_completion::StdStructuredCompletion;
#[cfg(test)]
pub use stub_completion::{StubCompletion, StubDocumentReader, StubProfileLister};
