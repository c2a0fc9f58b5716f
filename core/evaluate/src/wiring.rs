//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{
    EnvResolver, FileJsonLog, FileSystem, Log, NoopLog, StdEnvResolver, StdFileSystem,
};
use common::error::Error;

use crate::adapter::{StdDocumentReader, StdProfileLister, StdStructuredCompletion};
use crate::usecase::EvaluateUseCase;

/// main から使う組み立て済みのアプリケーション
pub struct App {
    pub logger: Arc<dyn Log>,
    pub use_case: EvaluateUseCase,
}

/// ログ出力先が解決できなければ NoopLog
fn build_logger(fs: &Arc<dyn FileSystem>, env_resolver: &dyn EnvResolver) -> Arc<dyn Log> {
    match env_resolver.resolve_log_file_path() {
        Ok(path) => Arc::new(FileJsonLog::new(Arc::clone(fs), path)),
        Err(_) => Arc::new(NoopLog),
    }
}

/// 配線: 標準アダプタで EvaluateUseCase を組み立てる
pub fn wire_evaluate() -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let logger = build_logger(&fs, env_resolver.as_ref());

    let completion = Arc::new(StdStructuredCompletion::new(
        Arc::clone(&fs),
        Arc::clone(&env_resolver),
        Arc::clone(&logger),
    ));
    let reader = Arc::new(StdDocumentReader::new(Arc::clone(&fs)));
    let profile_lister = Arc::new(StdProfileLister::new(Arc::clone(&fs), Arc::clone(&env_resolver)));
    let use_case = EvaluateUseCase::new(completion, reader, profile_lister, Arc::clone(&logger))?;
    Ok(App { logger, use_case })
}
