use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocLinkError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("台帳（.xlsx）が見つかりません: {0}")]
    NoWorkbook(String),

    #[error("台帳の候補が複数あります（1つに絞るか --workbook で指定してください）: {}", .0.join(", "))]
    MultipleWorkbooks(Vec<String>),

    #[error("ドキュメントフォルダが見つかりません: {0}")]
    NoDocumentFolder(String),

    #[error("ドキュメントフォルダの候補が複数あります（1つに絞るか --folder で指定してください）: {}", .0.join(", "))]
    MultipleDocumentFolders(Vec<String>),

    #[error("Excel読み込みエラー: {0}")]
    WorkbookRead(String),

    #[error("Excel保存エラー: {0}")]
    WorkbookWrite(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] doclink_common::Error),
}

pub type Result<T> = std::result::Result<T, DocLinkError>;
