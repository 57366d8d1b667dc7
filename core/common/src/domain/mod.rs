//! ドメイン型（Newtype）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

pub mod artifact;
pub mod record;

use std::path::{Path, PathBuf};

pub use artifact::{artifact_file_name, Artifact, Category, SequenceNumber};
pub use record::Record;

/// ホームディレクトリのパス（設定ファイル・構造化ログの置き場）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// 設定ファイル（config.json）
    pub fn config_file(&self) -> PathBuf {
        self.0.join("config.json")
    }

    /// ログ格納ディレクトリ（state/logs）
    pub fn logs_dir(&self) -> PathBuf {
        self.0.join("state").join("logs")
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

/// 出力先直下の内部状態ディレクトリ名（連番カウンタなど。同期対象に含めない）
pub const STATE_DIR_NAME: &str = ".promptlog";

/// 成果物の出力先ディレクトリ（prompt/ pc/ compl/ とログファイルの親）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutDir(PathBuf);

impl OutDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// カテゴリごとのディレクトリ
    pub fn category_dir(&self, category: &Category) -> PathBuf {
        self.0.join(category.dir())
    }

    /// 連番カウンタファイルの置き場（.promptlog/seq）
    pub fn sequence_state_dir(&self) -> PathBuf {
        self.0.join(STATE_DIR_NAME).join("seq")
    }
}

impl std::ops::Deref for OutDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for OutDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

/// API キー（Debug では伏せる）
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
