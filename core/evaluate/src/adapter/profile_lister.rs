//! プロファイル一覧取得アダプタ（common::llm の load_profiles_config / list_profiles を使用）

use std::sync::Arc;

use common::error::Error;
use common::llm::{list_profiles, load_profiles_config};
use common::ports::outbound::{EnvResolver, FileSystem};

use crate::ports::outbound::ProfileLister;

/// 標準プロファイル一覧取得（profiles.json + ビルトイン）
pub struct StdProfileLister {
    fs: Arc<dyn FileSystem>,
    env_resolver: Arc<dyn EnvResolver>,
}

impl StdProfileLister {
    pub fn new(fs: Arc<dyn FileSystem>, env_resolver: Arc<dyn EnvResolver>) -> Self {
        Self { fs, env_resolver }
    }
}

impl ProfileLister for StdProfileLister {
    fn list_profiles(&self) -> Result<(Vec<String>, String), Error> {
        let cfg_opt = load_profiles_config(self.fs.as_ref(), self.env_resolver.as_ref())?;
        Ok(list_profiles(cfg_opt.as_ref()))
    }
}
