//! ヘッダー位置の検出
//!
//! 台帳のID列は決まった位置にあるとは限らない（タイトル行や注記の下にずれる）ため、
//! 先頭数行を左から右へ走査して見出しラベルを探す。

use crate::grid::CellGrid;
use serde::Serialize;

/// 既定の見出しラベル
pub const DEFAULT_HEADER_LABEL: &str = "Document ID";

/// 見出しセルの位置（シート上の絶対座標、0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderLocation {
    pub row: u32,
    pub col: u32,
}

/// セルのテキストが見出しラベルで始まるか
///
/// 先頭の空白は無視する。ラベル直後が英数字か `_` なら別の語とみなす
/// （"Document ID (legacy)" は一致、"Document IDs"・"Document ID_old"・"XDocument ID" は不一致）。
pub fn label_matches(text: &str, label: &str) -> bool {
    if label.is_empty() {
        return false;
    }
    match text.trim_start().strip_prefix(label) {
        Some(rest) => !rest.chars().next().is_some_and(is_word_char),
        None => false,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// グリッドの探索範囲から最初に一致したセルを返す
///
/// シートは1〜3行目、テーブルは見出し行だけを見る。
/// 見つからないのはエラーではない（IDを持たないシートもある）。
pub fn locate(grid: &CellGrid, label: &str) -> Option<HeaderLocation> {
    grid.header_cells(grid.search_rows())
        .find(|(_, _, text)| label_matches(text, label))
        .map(|(row, col, _)| HeaderLocation { row, col })
}
