//! ポート定義（common は outbound のみ）
//!
//! 入口（UseCaseRunner）は promptlog 側が持つ。

pub mod outbound;
