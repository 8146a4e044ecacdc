//! セルグリッド
//!
//! ワークシート全体、またはシート上のテーブル1つ分の「表示テキスト」を保持する。
//! 読み込み側で1セル・1行の範囲も含めて必ず2次元の行列に揃えるので、
//! 照合処理はセル値の形を気にしなくてよい。

use crate::header::HeaderLocation;
use serde::Serialize;
use std::fmt;

/// シート（自由形式）のヘッダー探索行数
pub const SHEET_HEADER_ROWS: usize = 3;
/// テーブルのヘッダー探索行数（見出し行は1行に決まっている）
pub const TABLE_HEADER_ROWS: usize = 1;

/// グリッドの出どころ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GridSource {
    Sheet { sheet: String },
    Table { sheet: String, table: String },
}

impl GridSource {
    /// ハイパーリンクを書き込むシート名
    pub fn sheet(&self) -> &str {
        match self {
            GridSource::Sheet { sheet } => sheet,
            GridSource::Table { sheet, .. } => sheet,
        }
    }
}

impl fmt::Display for GridSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridSource::Sheet { sheet } => write!(f, "シート「{}」", sheet),
            GridSource::Table { sheet, table } => write!(f, "テーブル「{}」({})", table, sheet),
        }
    }
}

/// 表示テキストの2次元配列
///
/// 座標はすべてシート上の絶対位置（0始まり）。
/// `rows[0][0]` が `origin` に対応する。
#[derive(Debug, Clone)]
pub struct CellGrid {
    pub source: GridSource,
    pub origin: (u32, u32),
    pub rows: Vec<Vec<String>>,
}

impl CellGrid {
    pub fn new(source: GridSource, origin: (u32, u32), rows: Vec<Vec<String>>) -> Self {
        Self { source, origin, rows }
    }

    /// ヘッダー探索の行数
    pub fn search_window(&self) -> usize {
        match self.source {
            GridSource::Sheet { .. } => SHEET_HEADER_ROWS,
            GridSource::Table { .. } => TABLE_HEADER_ROWS,
        }
    }

    /// 探索対象になるグリッド先頭からの行数
    ///
    /// シートはシートの1行目から数える（使用範囲が下にずれていれば、その分だけ減る）。
    /// テーブルは見出し行の1行のみ。
    pub fn search_rows(&self) -> usize {
        match self.source {
            GridSource::Sheet { .. } => SHEET_HEADER_ROWS.saturating_sub(self.origin.0 as usize),
            GridSource::Table { .. } => TABLE_HEADER_ROWS,
        }
    }

    /// 値の入ったセルが1つもない
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.trim().is_empty()))
    }

    /// 絶対座標でセルを取得（範囲外・行の途中で切れている場合は空文字）
    pub fn cell(&self, row: u32, col: u32) -> &str {
        if row < self.origin.0 || col < self.origin.1 {
            return "";
        }
        let r = (row - self.origin.0) as usize;
        let c = (col - self.origin.1) as usize;
        self.rows
            .get(r)
            .and_then(|cells| cells.get(c))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// 先頭 `k` 行を (絶対行, 絶対列, テキスト) で行優先に列挙
    pub fn header_cells(&self, k: usize) -> impl Iterator<Item = (u32, u32, &str)> + '_ {
        let (row0, col0) = self.origin;
        self.rows.iter().take(k).enumerate().flat_map(move |(r, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(c, text)| (row0 + r as u32, col0 + c as u32, text.as_str()))
        })
    }

    /// ヘッダーより下の行について、ヘッダー列のセルを (絶対行, テキスト) で列挙
    pub fn column_below(&self, header: HeaderLocation) -> impl Iterator<Item = (u32, &str)> + '_ {
        let first = (header.row + 1).max(self.origin.0);
        let last = self.origin.0 + self.rows.len() as u32;
        (first..last).map(move |row| (row, self.cell(row, header.col)))
    }
}
