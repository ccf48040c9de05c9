//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Sheet has no header row")]
    EmptySheet,

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Unknown field: {0} (use color, name, category or dimensions)")]
    UnknownField(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
