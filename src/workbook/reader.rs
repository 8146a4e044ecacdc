//! 台帳の読み込み（calamine）
//!
//! シートごとのセル値と、照合用の `CellGrid`（表示テキスト）を取り出す。
//! テーブル（ListObject）を持つシートはテーブル単位、それ以外はシートの使用範囲全体を1グリッドにする。

use crate::error::{DocLinkError, Result};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use doclink_common::{CellGrid, GridSource};
use std::path::Path;
use tracing::debug;

/// シート1枚分の生データ（保存時にそのまま書き戻す）
#[derive(Debug, Clone)]
pub struct SheetData {
    pub name: String,
    pub range: Range<Data>,
    /// 数式（先頭の `=` なし）
    pub formulas: Range<String>,
    pub tables: Vec<TableDef>,
}

/// テーブルの定義（保存時に作り直す）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub name: String,
    /// 見出し行を含む範囲（絶対座標）
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
    pub columns: Vec<String>,
}

impl TableDef {
    /// calamine のテーブルデータ範囲から作る（データ行がなければ None）
    pub fn from_data(name: &str, columns: &[String], data: &Range<Data>) -> Option<Self> {
        let (first_row, first_col) = data.start()?;
        let (last_row, last_col) = data.end()?;
        if first_row == 0 {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            first_row: first_row - 1,
            first_col,
            last_row,
            last_col,
            columns: columns.to_vec(),
        })
    }
}

/// 読み込み結果
pub struct LoadedWorkbook {
    pub sheets: Vec<SheetData>,
    pub grids: Vec<CellGrid>,
}

/// 台帳を開いて全シートを読み込む
///
/// 読み込み後はファイルハンドルを保持しない（同じパスへの上書き保存を妨げないため）。
pub fn load(path: &Path) -> Result<LoadedWorkbook> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e: calamine::XlsxError| DocLinkError::WorkbookRead(format!("{}: {}", path.display(), e)))?;

    workbook
        .load_tables()
        .map_err(|e| DocLinkError::WorkbookRead(format!("テーブル定義: {}", e)))?;

    let mut sheets = Vec::new();
    let mut grids = Vec::new();

    for name in workbook.sheet_names().to_vec() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| DocLinkError::WorkbookRead(format!("{}: {}", name, e)))?;

        let formulas = workbook
            .worksheet_formula(&name)
            .map_err(|e| DocLinkError::WorkbookRead(format!("{} (数式): {}", name, e)))?;

        let table_names: Vec<String> = workbook
            .table_names_in_sheet(&name)
            .into_iter()
            .cloned()
            .collect();

        let mut tables = Vec::new();
        if table_names.is_empty() {
            grids.push(sheet_grid(&name, &range));
        } else {
            for table_name in table_names {
                let table = workbook
                    .table_by_name(&table_name)
                    .map_err(|e| DocLinkError::WorkbookRead(format!("{}: {}", table_name, e)))?;
                debug!(sheet = %name, table = %table_name, "テーブルを検出");
                tables.extend(TableDef::from_data(&table_name, table.columns(), table.data()));
                grids.push(table_grid(&name, &table_name, table.columns(), table.data()));
            }
        }

        sheets.push(SheetData {
            name,
            range,
            formulas,
            tables,
        });
    }

    Ok(LoadedWorkbook { sheets, grids })
}

/// シートの使用範囲をグリッドに変換
pub fn sheet_grid(sheet: &str, range: &Range<Data>) -> CellGrid {
    let source = GridSource::Sheet { sheet: sheet.to_string() };
    match range.start() {
        Some(origin) => CellGrid::new(source, origin, range_texts(range)),
        None => CellGrid::new(source, (0, 0), Vec::new()),
    }
}

/// テーブルをグリッドに変換（1行目が見出し行）
///
/// calamine のテーブルデータは見出し行を含まないので、列名を先頭に足す。
pub fn table_grid(sheet: &str, table: &str, columns: &[String], data: &Range<Data>) -> CellGrid {
    let source = GridSource::Table {
        sheet: sheet.to_string(),
        table: table.to_string(),
    };

    match data.start() {
        Some((first_row, first_col)) if first_row > 0 => {
            let mut rows = Vec::with_capacity(data.height() + 1);
            rows.push(columns.to_vec());
            rows.extend(range_texts(data));
            CellGrid::new(source, (first_row - 1, first_col), rows)
        }
        // データ行のないテーブルは空グリッド扱い
        _ => CellGrid::new(source, (0, 0), Vec::new()),
    }
}

fn range_texts(range: &Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .map(|row| row.iter().map(display_text).collect())
        .collect()
}

/// セルの表示テキスト
///
/// 整数値の数値セルは "1001.0" ではなく "1001" にする。
pub fn display_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
