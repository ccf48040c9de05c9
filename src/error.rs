use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("在庫ファイルが指定されていません。引数で渡すか `parts-lookup config --set-inventory PATH` で設定してください")]
    NoInventory,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] parts_lookup_common::Error),
}

impl From<dialoguer::Error> for LookupError {
    fn from(e: dialoguer::Error) -> Self {
        LookupError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
