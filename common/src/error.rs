//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 正規化後のキーが衝突した（どちらのファイルにリンクすべきか決められない）
    #[error("ドキュメントIDが重複しています: {key} ({first} / {second})")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
