//! parts-lookup
//!
//! 部品在庫スプレッドシートを読み込み、色・部品名・カテゴリ・寸法で
//! 絞り込んで一覧表示するCLI。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod render;
pub mod session;
