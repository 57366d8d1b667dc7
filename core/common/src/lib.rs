//! promptlog 共通ライブラリ
//!
//! CLI（`promptlog`）から使うエラー型・ドメイン型・ポート・標準アダプター・
//! 補完 API プロバイダを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Ports & Adapters のポート定義
pub mod ports;

/// 標準アダプター（std::fs / std::env / std::process）
pub mod adapter;

/// 補完 API プロバイダ
pub mod llm;
