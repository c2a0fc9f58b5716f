//! Outbound ポート: usecase が外界（LLM・入力・設定）を使うための trait

pub mod document_reader;
pub mod profile_lister;
pub mod structured_completion;

pub use document_reader::DocumentReader;
pub use profile_lister::ProfileLister;
pub use structured_completion::StructuredCompletion;
