//! 成果物（Artifact）のカテゴリと連番

use std::path::PathBuf;

/// 成果物カテゴリ（ディレクトリ名・ファイル名接頭辞・拡張子）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    dir: String,
    prefix: String,
    extension: String,
}

impl Category {
    pub fn new(
        dir: impl Into<String>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    /// プロンプトのみ: prompt/promptN.txt
    pub fn prompt() -> Self {
        Self::new("prompt", "prompt", "txt")
    }

    /// プロンプトと補完の結合: pc/pcN.json
    pub fn combined() -> Self {
        Self::new("pc", "pc", "json")
    }

    /// 補完のみ: compl/complN.json
    pub fn completion() -> Self {
        Self::new("compl", "compl", "json")
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// カテゴリ内の連番（1 始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    pub const FIRST: SequenceNumber = SequenceNumber(1);

    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// 既存エントリ数から次の番号を作る（count + 1）
    pub fn after_count(count: usize) -> Self {
        Self(count as u64 + 1)
    }

    /// 次の番号。u64 の上限を超える場合は None
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// `prefix{N}.extension` を組み立てる。空白を受け付けないファイルシステム向けに空白は除去する。
pub fn artifact_file_name(prefix: &str, seq: SequenceNumber, extension: &str) -> String {
    let name = format!("{}{}.{}", prefix, seq, extension);
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// 書き出し済みの成果物 1 件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub category: String,
    pub seq: SequenceNumber,
    pub path: PathBuf,
}
