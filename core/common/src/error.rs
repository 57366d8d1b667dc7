//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。終了コードは sysexits.h の値に揃える。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正（使い方の誤り・空のプロンプト）
    #[error("{0}")]
    InvalidArgument(String),
    /// 設定不備（API キー未設定・設定ファイル不正）
    #[error("{0}")]
    Config(String),
    /// ファイル・ディレクトリの作成・読み書き失敗
    #[error("{0}")]
    Io(String),
    /// 通信失敗（接続・タイムアウト・本文読み取り）
    #[error("{0}")]
    Http(String),
    /// 成功以外の HTTP ステータス（本文はそのまま保持）
    #[error("Error response: {status}\n{body}")]
    HttpStatus { status: u16, body: String },
    /// JSON のシリアライズ・パース失敗
    #[error("{0}")]
    Json(String),
    /// 応答に choices[0].text が無い
    #[error("{0}")]
    Extraction(String),
    /// バージョン管理への同期失敗（呼び出し側で致命扱いしない）
    #[error("{0}")]
    Sync(String),
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Error::HttpStatus {
            status,
            body: body.into(),
        }
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn extraction(msg: impl Into<String>) -> Self {
        Error::Extraction(msg.into())
    }

    pub fn sync(msg: impl Into<String>) -> Self {
        Error::Sync(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Error::System(msg.into())
    }

    /// プロセスの終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Json(_) | Error::Extraction(_) => 65,
            Error::Http(_) | Error::HttpStatus { .. } => 69,
            Error::Sync(_) | Error::System(_) => 70,
            Error::Io(_) => 74,
            Error::Config(_) => 78,
        }
    }

    /// 使い方の表示が必要なエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
