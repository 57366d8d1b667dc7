//! 設定ファイル（<home>/config.json）の読み込み

use common::error::Error;
use common::ports::outbound::{EnvResolver, FileSystem};
use std::sync::Arc;

use crate::domain::FileConfig;
use crate::ports::outbound::ConfigLoader;

pub struct JsonConfigLoader {
    fs: Arc<dyn FileSystem>,
    env_resolver: Arc<dyn EnvResolver>,
}

impl JsonConfigLoader {
    pub fn new(fs: Arc<dyn FileSystem>, env_resolver: Arc<dyn EnvResolver>) -> Self {
        Self { fs, env_resolver }
    }
}

impl ConfigLoader for JsonConfigLoader {
    fn load(&self) -> Result<FileConfig, Error> {
        // ホームが解決できない環境では設定ファイル無しとして扱う
        let home = match self.env_resolver.resolve_home_dir() {
            Ok(h) => h,
            Err(_) => return Ok(FileConfig::default()),
        };
        let path = home.config_file();
        if !self.fs.exists(&path) {
            return Ok(FileConfig::default());
        }
        let text = self.fs.read_to_string(&path)?;
        serde_json::from_str(&text).map_err(|e| {
            Error::config(format!("Invalid config file '{}': {}", path.display(), e))
        })
    }
}
