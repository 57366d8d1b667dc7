//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（補完 API・連番・集約ログ・同期・端末）を使うための trait

pub mod inbound;
pub mod outbound;
