//! 台帳（スプレッドシート）ストア
//!
//! 照合処理からは「グリッドを読む」「セルにリンクを付ける」「保存する」の3操作だけが見える。
//! `StoreGuard` で包んで開くと、途中でエラーになっても付けたリンクを保存してから閉じる。

pub mod reader;
pub mod writer;
mod xlsx;

pub use xlsx::XlsxStore;

use crate::error::Result;
use doclink_common::{CellGrid, Hyperlink};
use std::path::PathBuf;
use tracing::{error, warn};

/// 台帳ストア
pub trait SheetStore {
    /// 照合対象のグリッド（シート・テーブル）を台帳の順に返す
    fn grids(&mut self) -> Result<Vec<CellGrid>>;

    /// セルにハイパーリンクを付ける
    fn set_hyperlink(&mut self, sheet: &str, link: &Hyperlink) -> Result<()>;

    /// 保存して保存先を返す
    fn save(&mut self) -> Result<PathBuf>;
}

/// ストアのスコープ管理
///
/// `commit` で保存、`discard` で保存せずに閉じる。
/// どちらも呼ばれずに破棄された場合（エラーで抜けた場合）は、そこまでのリンクを保存する。
/// `read_only` で開いた場合は何があっても保存しない。
pub struct StoreGuard<S: SheetStore> {
    store: S,
    closed: bool,
}

impl<S: SheetStore> StoreGuard<S> {
    pub fn new(store: S) -> Self {
        Self { store, closed: false }
    }

    pub fn read_only(store: S) -> Self {
        Self { store, closed: true }
    }

    pub fn store(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn commit(mut self) -> Result<PathBuf> {
        self.closed = true;
        self.store.save()
    }

    pub fn discard(mut self) {
        self.closed = true;
    }
}

impl<S: SheetStore> Drop for StoreGuard<S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        match self.store.save() {
            Ok(path) => warn!(path = %path.display(), "処理を中断しました。途中までのリンクを保存しました"),
            Err(e) => error!("途中までのリンクを保存できませんでした: {}", e),
        }
    }
}
